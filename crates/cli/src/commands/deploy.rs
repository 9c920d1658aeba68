use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, ValueHint};
use dso_admin_reconcile::{ArtifactInstaller, save_pending};
use serde_json::json;
use tracing::{error, info};

use super::print_json;
use crate::Context;

#[derive(Debug, Parser)]
pub struct Deploy {
    /// Directory holding the `.war` archives.
    #[clap(long, value_hint = ValueHint::DirPath)]
    dir: PathBuf,
    /// Leave the installed applications unsaved.
    #[clap(long)]
    no_save: bool,
}

impl Deploy {
    pub fn run(self, ctx: &Context) -> Result<bool> {
        let options = ctx.file.install.clone().unwrap_or_default();
        let installer = ArtifactInstaller::new(&ctx.admin, options);

        let report = match installer.deploy_dir(&self.dir) {
            Ok(report) => report,
            Err(e) => {
                error!("{}: {e}", ctx.admin.endpoint());
                print_json(&json!({
                    "endpoint": ctx.admin.endpoint(),
                    "error": e,
                }))?;
                return Ok(false);
            }
        };

        info!(
            "{}: installed {} application(s), {} already installed",
            ctx.admin.endpoint(),
            report.installed.len(),
            report.skipped.len()
        );

        let saved = if !report.installed.is_empty() && !self.no_save {
            save_pending(&ctx.admin).context("failed to save the configuration")?
        } else {
            false
        };

        print_json(&json!({
            "endpoint": ctx.admin.endpoint(),
            "report": report,
            "saved": saved,
        }))?;

        Ok(true)
    }
}
