//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use trophycalc_core::User;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print the fields of a user profile.
pub fn user(user: &User) {
    field("Name", &user.name);
    field("Email", &user.email);
    field("Steam ID", &user.steam_id_64);
    field("Profile", &user.profile_url);
    match user.created() {
        Some(at) => field("Member since", &at.format("%Y-%m-%d").to_string()),
        None => field("Member since", &user.created_at),
    }
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
