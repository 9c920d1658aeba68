use std::path::PathBuf;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::ArgumentList;
use crate::{constant::DSO_BOOT_DIR, error::TokenError};

/// Tokens that must be present together or absent together.
///
/// Declared order is kept (it decides the order missing tokens are appended
/// in) and duplicates are dropped. The set is fixed once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequiredTokens(IndexSet<String>);

impl RequiredTokens {
    pub fn new<I, S>(tokens: I) -> Result<Self, TokenError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: IndexSet<String> = tokens.into_iter().map(Into::into).collect();
        if set.is_empty() {
            return Err(TokenError::Empty);
        }
        if set.iter().any(|t| t.trim().is_empty()) {
            return Err(TokenError::Blank);
        }
        Ok(Self(set))
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

    /// True only when every token is present. Partial presence is not enough.
    pub fn is_satisfied_by(&self, args: &ArgumentList) -> bool {
        self.0.iter().all(|token| args.contains(token))
    }

    /// True when at least one token is present.
    pub fn is_touched_by(&self, args: &ArgumentList) -> bool {
        self.0.iter().any(|token| args.contains(token))
    }

    /// The tokens missing from `args`, in declared order.
    pub fn missing_from<'a>(&'a self, args: &'a ArgumentList) -> impl Iterator<Item = &'a str> {
        self.iter().filter(|token| !args.contains(token))
    }

    /// `args` followed by every missing token, in declared order.
    pub fn merged_into(&self, args: &ArgumentList) -> ArgumentList {
        args.iter()
            .chain(self.missing_from(args))
            .map(str::to_owned)
            .collect()
    }

    /// `args` with every occurrence of every token removed.
    pub fn stripped_from(&self, args: &ArgumentList) -> ArgumentList {
        args.iter()
            .filter(|arg| !self.0.contains(*arg))
            .map(str::to_owned)
            .collect()
    }
}

impl<'de> Deserialize<'de> for RequiredTokens {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tokens = Vec::<String>::deserialize(deserializer)?;
        Self::new(tokens).map_err(serde::de::Error::custom)
    }
}

/// Location of a DSO install, from which the jvm arguments that load the
/// clustering boot jar are derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsoArgs {
    /// Root of the DSO installation on the node
    pub install_root: PathBuf,
    /// File name of the boot jar generated for the node's jvm
    pub boot_jar: String,
    /// Cluster configuration, either a path or `host:port`
    pub tc_config: String,
}

impl DsoArgs {
    pub fn boot_jar_path(&self) -> PathBuf {
        self.install_root.join(DSO_BOOT_DIR).join(&self.boot_jar)
    }

    pub fn tokens(&self) -> Result<RequiredTokens, TokenError> {
        RequiredTokens::new([
            format!("-Xbootclasspath/p:{}", self.boot_jar_path().display()),
            format!("-Dtc.install-root={}", self.install_root.display()),
            format!("-Dtc.config={}", self.tc_config),
        ])
    }
}
