//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::{
    auth::AuthCommand, logout::LogoutArgs, route::RouteArgs, whoami::WhoamiArgs,
};

/// Local development API, used when nothing else is configured.
pub const DEFAULT_API: &str = "http://127.0.0.1:8000/api";

/// TrophyCalc session tool.
#[derive(Parser, Debug)]
#[command(name = "trophycalc")]
#[command(author, version = env!("TROPHYCALC_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings shared by every command that touches the session.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// TrophyCalc API base URL
    #[arg(long, env = "TROPHYCALC_API", default_value = DEFAULT_API, global = true)]
    pub api: String,

    /// Directory holding the persisted session (defaults to the platform data dir)
    #[arg(long, env = "TROPHYCALC_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign-in operations
    Auth(AuthCommand),

    /// Display the signed-in user
    Whoami(WhoamiArgs),

    /// Sign out and forget the stored token
    Logout(LogoutArgs),

    /// Resolve a web client path to its route and tab title
    Route(RouteArgs),
}
