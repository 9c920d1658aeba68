use anyhow::{Context as _, Result};
use clap::Parser;
use dso_admin_common::prelude::*;
use dso_admin_reconcile::{FlagReconciler, save_pending};
use serde_json::json;
use tracing::{error, info};

use super::print_json;
use crate::{Context, config::TokenArgs};

#[derive(Debug, Parser)]
pub struct Reconcile {
    /// Whether the required arguments should be present or absent.
    #[clap(long, value_enum)]
    mode: ReconcileMode,
    /// Leave a changed configuration unsaved.
    #[clap(long)]
    no_save: bool,
    #[clap(flatten)]
    tokens: TokenArgs,
}

impl Reconcile {
    pub fn run(self, ctx: &Context) -> Result<bool> {
        let tokens = self.tokens.resolve(&ctx.file)?;
        let flags = FlagReconciler::new(&ctx.admin, tokens, ctx.admin.endpoint().clone());

        let result = flags.reconcile(self.mode);
        match &result {
            ReconcileResult::Failed(e) => error!("{}: {e}", flags.endpoint()),
            result => info!("{}: {}", flags.endpoint(), result.label()),
        }

        let saved = if result.wrote_changes() && !self.no_save {
            save_pending(&ctx.admin).context("failed to save the configuration")?
        } else {
            false
        };

        print_json(&json!({
            "endpoint": flags.endpoint(),
            "result": &result,
            "saved": saved,
        }))?;

        Ok(result.is_success())
    }
}

pub fn status(ctx: &Context, tokens: &TokenArgs) -> Result<bool> {
    let tokens = tokens.resolve(&ctx.file)?;
    let flags = FlagReconciler::new(&ctx.admin, tokens, ctx.admin.endpoint().clone());

    let enabled = flags.is_enabled()?;
    info!(
        "{}: required arguments are {}",
        flags.endpoint(),
        if enabled { "present" } else { "absent" }
    );

    print_json(&json!({
        "endpoint": flags.endpoint(),
        "enabled": enabled,
        "tokens": flags.tokens(),
    }))?;

    Ok(true)
}
