use anyhow::Result;
use clap::{CommandFactory, Parser};
use serde::Serialize;

use crate::{Cli, Context, config::TokenArgs};

mod deploy;
mod reconcile;
mod shutdown;

#[derive(Debug, Parser)]
pub enum Commands {
    /// Generate shell completions.
    #[command(arg_required_else_help = true)]
    Autocomplete {
        /// Which shell you want to generate completions for.
        shell: clap_complete::Shell,
    },
    /// Show whether the required jvm arguments are present.
    Status {
        #[clap(flatten)]
        tokens: TokenArgs,
    },
    /// Add or remove the required jvm arguments.
    #[clap(alias = "r")]
    Reconcile(reconcile::Reconcile),
    /// Wait until the server has shut down.
    #[clap(alias = "await")]
    AwaitShutdown(shutdown::AwaitShutdown),
    /// Install every archive of a directory that is not installed yet.
    Deploy(deploy::Deploy),
}

impl Commands {
    pub fn autocomplete(shell: clap_complete::Shell) {
        let mut cmd = Cli::command();
        let cmd_name = cmd.get_name().to_string();

        clap_complete::generate(shell, &mut cmd, cmd_name, &mut std::io::stdout());
    }

    pub fn run(self, ctx: &Context) -> Result<bool> {
        match self {
            Commands::Autocomplete { shell } => {
                Self::autocomplete(shell);
                Ok(true)
            }
            Commands::Status { tokens } => reconcile::status(ctx, &tokens),
            Commands::Reconcile(reconcile) => reconcile.run(ctx),
            Commands::AwaitShutdown(shutdown) => shutdown.run(ctx),
            Commands::Deploy(deploy) => deploy.run(ctx),
        }
    }
}

pub(crate) fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
