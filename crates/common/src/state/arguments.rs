use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Snapshot of a remote process's argument list.
///
/// Order is significant and duplicates are kept as-is. Membership checks use
/// exact string equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArgumentList(Vec<String>);

impl ArgumentList {
    pub fn new(args: Vec<String>) -> Self {
        Self(args)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|arg| arg == token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl<S: Into<String>> FromIterator<S> for ArgumentList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for ArgumentList {
    fn from(args: Vec<String>) -> Self {
        Self(args)
    }
}

impl Display for ArgumentList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}
