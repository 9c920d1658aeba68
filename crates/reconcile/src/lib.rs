pub mod artifacts;
pub mod flag;
pub mod poller;
pub mod session;

pub use artifacts::{Artifact, ArtifactInstaller, DeployReport};
pub use flag::FlagReconciler;
pub use poller::{PollerConfig, StatePoller};
pub use session::save_pending;

#[cfg(test)]
mod test_flag;
#[cfg(test)]
mod test_poller;
