//! Runtime configuration resolved from flags and environment.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use trophycalc_core::ApiUrl;
use trophycalc_file::FileSlot;
use trophycalc_http::ApiClient;
use trophycalc_session::{SessionContext, SessionStore};

use crate::cli::GlobalArgs;

/// Validated settings for commands that touch the session.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiUrl,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let api = ApiUrl::new(&args.api).context("Invalid API URL")?;

        let data_dir = match &args.data_dir {
            Some(dir) => dir.clone(),
            None => ProjectDirs::from("", "", "trophycalc")
                .context("Could not determine data directory")?
                .data_dir()
                .to_path_buf(),
        };

        debug!(api = %api, data_dir = %data_dir.display(), "Configuration loaded");
        Ok(Self { api, data_dir })
    }

    pub fn slot(&self) -> FileSlot {
        FileSlot::in_dir(&self.data_dir)
    }

    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::new(self.api.clone()).context("Failed to create HTTP client")
    }

    /// Open the stored session without resolving its token.
    pub fn open_store(&self) -> Result<SessionStore> {
        SessionStore::open(self.slot(), self.client()?).context("Failed to open session")
    }

    /// Restore the stored session and start resolving its token.
    pub fn start_session(&self) -> Result<SessionContext> {
        SessionContext::start(self.slot(), self.client()?).context("Failed to open session")
    }
}
