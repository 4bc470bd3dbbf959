//! Sign-in commands.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use colored::Colorize;

use trophycalc_session::{FetchOutcome, complete_callback};

use crate::cli::GlobalArgs;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Finish sign-in from the redirect the backend sent the browser to
    Callback(CallbackArgs),
}

#[derive(Args, Debug)]
pub struct CallbackArgs {
    /// Redirect URL or path, e.g. /auth/callback?token=...
    pub redirect_url: String,
}

pub async fn handle(cmd: AuthCommand, global: &GlobalArgs) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Callback(args) => callback(args, global).await,
    }
}

async fn callback(args: CallbackArgs, global: &GlobalArgs) -> Result<()> {
    let config = Config::load(global)?;
    // No reactor here: a stale stored token must not race the new one
    let store = config.open_store()?;

    complete_callback(&store, &args.redirect_url).context("Failed to complete sign-in")?;

    eprintln!("{}", "Signing in...".dimmed());

    let outcome = store.fetch_user().await.context("Failed to load user")?;
    let (FetchOutcome::Loaded, Some(user)) = (outcome, store.user()) else {
        bail!("Sign-in failed: the backend did not accept the token");
    };

    output::success("Signed in successfully");
    println!();
    output::user(&user);

    Ok(())
}
