use dso_admin_common::prelude::*;
use tracing::{debug, info};

/// Persist pending configuration changes, if any. Returns true when a commit
/// was made.
pub fn save_pending<S: ConfigSession>(session: &S) -> Result<bool, RemoteError> {
    if !session.has_pending_changes()? {
        debug!("no pending configuration changes");
        return Ok(false);
    }

    session.commit()?;
    info!("saved pending configuration changes");
    Ok(true)
}
