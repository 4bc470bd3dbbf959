//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub fn run(_args: LogoutArgs, global: &GlobalArgs) -> Result<()> {
    let config = Config::load(global)?;
    let store = config.open_store()?;

    store.logout().context("Failed to remove stored token")?;

    output::success("Signed out");
    Ok(())
}
