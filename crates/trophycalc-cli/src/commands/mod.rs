//! Subcommand implementations.

pub mod auth;
pub mod logout;
pub mod route;
pub mod whoami;
