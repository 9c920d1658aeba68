use std::{path::PathBuf, time::Duration};

use anyhow::{Context as _, Result};
use clap::{Parser, ValueHint};
use dso_admin_common::{
    constant::{
        DEFAULT_ADMIN_URL, DEFAULT_REQUEST_TIMEOUT, ENV_ADMIN_CONFIG, ENV_ADMIN_ENDPOINT,
        ENV_ADMIN_URL,
    },
    state::RemoteEndpoint,
};

use crate::{client::HttpAdminClient, config::FileConfig};

#[derive(Debug, Parser)]
#[clap(name = "dso-admin", version)]
pub struct Cli {
    /// The url the administrative http bridge is on.
    #[clap(short, long, env = ENV_ADMIN_URL, value_hint = ValueHint::Url)]
    url: Option<String>,
    /// The server to administer, as `cell/node/server`.
    #[clap(short, long, env = ENV_ADMIN_ENDPOINT)]
    endpoint: Option<RemoteEndpoint>,
    /// YAML file with defaults for every other option.
    #[clap(short, long, env = ENV_ADMIN_CONFIG, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
    /// Timeout of a single request to the bridge, in seconds.
    #[clap(long)]
    timeout: Option<u64>,
    /// Log debug output.
    #[clap(short, long, global = true)]
    pub verbose: bool,
    /// The subcommand to run.
    #[clap(subcommand)]
    pub subcommand: crate::Commands,
}

/// Everything a subcommand talking to the bridge needs.
pub struct Context {
    pub admin: HttpAdminClient,
    pub file: FileConfig,
}

impl Cli {
    /// Runs the subcommand. Returns false when the command's outcome is a
    /// failure that was already reported.
    pub fn run(self) -> Result<bool> {
        if let crate::Commands::Autocomplete { shell } = self.subcommand {
            crate::Commands::autocomplete(shell);
            return Ok(true);
        }

        let file = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let url = self
            .url
            .or_else(|| file.url.clone())
            .unwrap_or_else(|| DEFAULT_ADMIN_URL.to_string());
        let endpoint = self
            .endpoint
            .or_else(|| file.endpoint.clone())
            .context("no endpoint given, use --endpoint cell/node/server")?;
        let timeout = self
            .timeout
            .or(file.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let admin = HttpAdminClient::new(&url, endpoint, timeout)
            .with_context(|| format!("invalid admin url `{url}`"))?;

        self.subcommand.run(&Context { admin, file })
    }
}
