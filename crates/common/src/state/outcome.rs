use serde::{Deserialize, Serialize};

use crate::error::{PollError, ReconcileError};

/// Desired state of the required tokens.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileMode {
    Enable,
    Disable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "reason", rename_all = "snake_case")]
pub enum ReconcileResult {
    NoOpAlreadyEnabled,
    NoOpAlreadyDisabled,
    Enabled,
    Disabled,
    Failed(ReconcileError),
}

impl ReconcileResult {
    pub fn is_success(&self) -> bool {
        !matches!(self, ReconcileResult::Failed(_))
    }

    /// True when new arguments were written to the remote host
    pub fn wrote_changes(&self) -> bool {
        matches!(self, ReconcileResult::Enabled | ReconcileResult::Disabled)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReconcileResult::NoOpAlreadyEnabled => "already enabled",
            ReconcileResult::NoOpAlreadyDisabled => "already disabled",
            ReconcileResult::Enabled => "enabled",
            ReconcileResult::Disabled => "disabled",
            ReconcileResult::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum PollOutcome {
    /// The terminal state was read, or the connection dropped after the
    /// intermediate state was observed
    Terminal(String),
    TimedOut,
    ConnectionLost,
    Cancelled,
    Error(PollError),
}

impl PollOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PollOutcome::Terminal(_))
    }
}

/// Where a poll session currently is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollerState {
    Connecting,
    Connected,
    /// The intermediate state was observed at least once
    Stopping,
    Stopped,
    ConnectionLost,
}
