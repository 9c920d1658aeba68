use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result, bail};
use clap::Args;
use dso_admin_common::prelude::*;
use dso_admin_reconcile::PollerConfig;
use serde::Deserialize;

/// Settings read from the optional YAML config file. Flags given on the
/// command line take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub url: Option<String>,
    pub endpoint: Option<RemoteEndpoint>,
    pub timeout_secs: Option<u64>,
    /// Literal required tokens
    pub tokens: Option<RequiredTokens>,
    /// Derive the required tokens from a DSO install
    pub dso: Option<DsoArgs>,
    pub poll: PollFileConfig,
    pub install: Option<InstallOptions>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollFileConfig {
    pub query: Option<String>,
    pub attribute: Option<String>,
    pub terminal: Option<String>,
    pub intermediate: Option<String>,
    pub interval_secs: Option<u64>,
    pub max_wait_secs: Option<u64>,
    pub disconnect_retries: Option<u32>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Poller settings from the file, on top of the defaults
    pub fn poller(&self) -> PollerConfig {
        let poll = &self.poll;
        let defaults = PollerConfig::default();
        PollerConfig {
            query: poll.query.clone().unwrap_or(defaults.query),
            attribute: poll.attribute.clone().unwrap_or(defaults.attribute),
            terminal: poll.terminal.clone().unwrap_or(defaults.terminal),
            intermediate: poll.intermediate.clone().unwrap_or(defaults.intermediate),
            interval: poll
                .interval_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.interval),
            max_wait: poll.max_wait_secs.map(Duration::from_secs),
            disconnect_retries: poll
                .disconnect_retries
                .unwrap_or(defaults.disconnect_retries),
        }
    }
}

/// Where the required tokens come from.
#[derive(Debug, Default, Args)]
pub struct TokenArgs {
    /// A required jvm argument. Repeat for several. Overrides any other token
    /// source.
    #[clap(long = "token", allow_hyphen_values = true)]
    pub tokens: Vec<String>,
    /// Root of the DSO install on the node, used to derive the tokens
    #[clap(long, env = "DSO_INSTALL_ROOT")]
    pub install_root: Option<std::path::PathBuf>,
    /// File name of the DSO boot jar inside `<install-root>/lib/dso-boot`
    #[clap(long, env = "DSO_BOOT_JAR")]
    pub boot_jar: Option<String>,
    /// Cluster configuration passed as `-Dtc.config`, a path or `host:port`
    #[clap(long, env = "DSO_TC_CONFIG")]
    pub tc_config: Option<String>,
}

impl TokenArgs {
    pub fn resolve(&self, file: &FileConfig) -> Result<RequiredTokens> {
        if !self.tokens.is_empty() {
            return Ok(RequiredTokens::new(self.tokens.iter().cloned())?);
        }

        if let Some(install_root) = &self.install_root {
            let (Some(boot_jar), Some(tc_config)) = (&self.boot_jar, &self.tc_config) else {
                bail!("--install-root requires both --boot-jar and --tc-config");
            };
            let dso = DsoArgs {
                install_root: install_root.clone(),
                boot_jar: boot_jar.clone(),
                tc_config: tc_config.clone(),
            };
            return Ok(dso.tokens()?);
        }

        if let Some(tokens) = &file.tokens {
            return Ok(tokens.clone());
        }

        if let Some(dso) = &file.dso {
            return Ok(dso.tokens()?);
        }

        bail!("no required tokens configured, use --token, --install-root or a config file")
    }
}
