use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use dso_admin_common::prelude::*;
use dso_admin_reconcile::StatePoller;
use serde_json::json;
use tokio::signal::unix::{SignalKind, signal};
use tracing::{error, info, warn};

use super::print_json;
use crate::Context;

#[derive(Debug, Parser)]
pub struct AwaitShutdown {
    /// Seconds between two state reads.
    #[clap(long)]
    interval: Option<u64>,
    /// Give up after this many seconds.
    #[clap(long)]
    max_wait: Option<u64>,
    /// Discovery pattern of the server to watch. Must match exactly one
    /// object.
    #[clap(long)]
    query: Option<String>,
    /// Extra reads attempted when the connection drops while the server is
    /// stopping.
    #[clap(long)]
    disconnect_retries: Option<u32>,
}

impl AwaitShutdown {
    pub fn run(self, ctx: &Context) -> Result<bool> {
        let mut config = ctx.file.poller();
        if let Some(interval) = self.interval {
            config.interval = Duration::from_secs(interval);
        }
        if let Some(max_wait) = self.max_wait {
            config.max_wait = Some(Duration::from_secs(max_wait));
        }
        if let Some(query) = self.query {
            config.query = query;
        }
        if let Some(retries) = self.disconnect_retries {
            config.disconnect_retries = retries;
        }

        let cancel = CancelToken::new();
        cancel_on_signal(cancel.clone())?;

        let endpoint = ctx.admin.endpoint();
        let mut poller = StatePoller::new(&ctx.admin, config).with_cancel(cancel);
        let outcome = poller.run();

        match &outcome {
            PollOutcome::Terminal(state) => info!("{endpoint} is {state}"),
            PollOutcome::TimedOut => error!("timed out waiting for {endpoint} to stop"),
            PollOutcome::ConnectionLost => {
                error!("lost the connection to {endpoint} before it started stopping")
            }
            PollOutcome::Cancelled => warn!("stopped waiting for {endpoint}"),
            PollOutcome::Error(e) => error!("{endpoint}: {e}"),
        }

        print_json(&json!({
            "endpoint": endpoint,
            "target": poller.target(),
            "state": poller.state(),
            "outcome": &outcome,
        }))?;

        Ok(outcome.is_success())
    }
}

/// Cancel `cancel` on SIGINT or SIGTERM. Both handlers are installed before
/// this returns; the watcher runs on its own thread for the rest of the
/// process.
pub(crate) fn cancel_on_signal(cancel: CancelToken) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let (mut interrupt, mut terminate) = {
        let _guard = rt.enter();
        (
            signal(SignalKind::interrupt())?,
            signal(SignalKind::terminate())?,
        )
    };

    std::thread::spawn(move || {
        rt.block_on(async move {
            tokio::select! {
                _ = interrupt.recv() => {},
                _ = terminate.recv() => {},
            }

            info!("received shutdown signal, cancelling");
            cancel.cancel();
        })
    });

    Ok(())
}
