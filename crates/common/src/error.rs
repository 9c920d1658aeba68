use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;
use thiserror::Error;

/// Serializes an error as `{ "type": <kebab type string>, "error": <message> }`
#[macro_export]
macro_rules! impl_serialize_error {
    ($name:path) => {
        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                use ::serde::ser::SerializeStruct;

                let mut state = serializer.serialize_struct("Error", 2)?;
                state.serialize_field("type", AsRef::<str>::as_ref(self))?;
                state.serialize_field("error", &self.to_string())?;
                state.end()
            }
        }
    };
}

/// Result of a single call into the remote administrative collaborator.
///
/// A dropped or refused connection is kept apart from every other failure so
/// callers can branch on it explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
#[serde(tag = "type", content = "error", rename_all = "kebab-case")]
pub enum RemoteError {
    #[error("connection error: {0}")]
    Connection(String),
    #[error("remote error: {0}")]
    Other(String),
}

impl RemoteError {
    pub fn connection(e: impl ToString) -> Self {
        Self::Connection(e.to_string())
    }

    pub fn other(e: impl ToString) -> Self {
        Self::Other(e.to_string())
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ReconcileError {
    #[error("failed to read current arguments: {0}")]
    ReadError(#[source] RemoteError),
    #[error("failed to write arguments: {0}")]
    WriteError(#[source] RemoteError),
}

impl_serialize_error!(ReconcileError);

impl ReconcileError {
    /// Short machine readable reason, e.g. `read-error`
    pub fn reason(&self) -> &str {
        self.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum PollError {
    #[strum(serialize = "unexpected-instance-count")]
    #[error("expected exactly one instance for `{query}`, found {count}")]
    AmbiguousTarget { query: String, count: usize },
    #[error("failed to discover `{query}`: {source}")]
    DiscoveryError {
        query: String,
        #[source]
        source: RemoteError,
    },
    #[error("failed to read state: {0}")]
    ReadError(#[source] RemoteError),
}

impl_serialize_error!(PollError);

impl PollError {
    pub fn reason(&self) -> &str {
        self.as_ref()
    }
}

#[derive(Debug, Error, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum DeployError {
    #[error("failed to read artifact directory `{path}`: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to list installed applications: {0}")]
    ListError(#[source] RemoteError),
    #[error("failed to install `{name}`: {source}")]
    InstallError {
        name: String,
        #[source]
        source: RemoteError,
    },
}

impl_serialize_error!(DeployError);

#[derive(Debug, Clone, PartialEq, Eq, Error, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum TokenError {
    #[error("at least one required token must be configured")]
    Empty,
    #[error("required tokens must not be blank")]
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid endpoint `{0}`, expected `cell/node/server`")]
pub struct EndpointParseError(pub String);
