use std::path::Path;
use std::process::{Command, Output};

/// Token the mock backend accepts.
pub const GOOD_TOKEN: &str = "42|good";

/// Run the CLI binary with an isolated data directory and API URL.
pub fn run_cli(args: &[&str], data_dir: &Path, api: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_trophycalc"));
    cmd.args(args);
    cmd.env("TROPHYCALC_DATA_DIR", data_dir);
    cmd.env("TROPHYCALC_API", api);
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], data_dir: &Path, api: &str) -> String {
    let output = run_cli(args, data_dir, api);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure.
pub fn run_cli_failure(args: &[&str], data_dir: &Path, api: &str) -> String {
    let output = run_cli(args, data_dir, api);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Body of `GET /user` for the signed-in test user.
pub fn user_json() -> serde_json::Value {
    serde_json::json!({
        "id": 42,
        "name": "Gordon",
        "email": "gordon@example.com",
        "avatar": "https://avatars.example.com/gordon.jpg",
        "profile_url": "https://steamcommunity.com/id/gordon/",
        "steam_id_64": "76561197960287930",
        "profile_updated_at": "2024-05-01T12:00:00.000000Z",
        "created_at": "2024-01-15T08:30:00.000000Z",
        "updated_at": "2024-05-01T12:00:00.000000Z"
    })
}
