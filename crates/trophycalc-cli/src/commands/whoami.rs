//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the user as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WhoamiArgs, global: &GlobalArgs) -> Result<()> {
    let config = Config::load(global)?;
    let session = config.start_session()?;

    let user = session
        .settled()
        .await
        .user
        .context("Not signed in. Run 'trophycalc auth callback' first.")?;

    if args.json {
        output::json_pretty(&user)?;
    } else {
        output::user(&user);
    }

    Ok(())
}
