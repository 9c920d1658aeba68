use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::EndpointParseError;

/// Identity of a remote server process. Only used to address the admin bridge
/// and to label log lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RemoteEndpoint {
    pub cell: String,
    pub node: String,
    pub server: String,
}

impl RemoteEndpoint {
    pub fn new(cell: impl Into<String>, node: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            cell: cell.into(),
            node: node.into(),
            server: server.into(),
        }
    }
}

impl Display for RemoteEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.cell, self.node, self.server)
    }
}

impl FromStr for RemoteEndpoint {
    type Err = EndpointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(cell), Some(node), Some(server), None)
                if [cell, node, server].iter().all(|p| !p.trim().is_empty()) =>
            {
                Ok(Self::new(cell, node, server))
            }
            _ => Err(EndpointParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for RemoteEndpoint {
    type Error = EndpointParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RemoteEndpoint> for String {
    fn from(value: RemoteEndpoint) -> Self {
        value.to_string()
    }
}

/// Handle to a remote managed object returned by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectRef(pub String);

impl ObjectRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
