//! trophycalc-core - Core TrophyCalc session types and traits.

pub mod error;
pub mod memory;
pub mod routes;
pub mod token;
pub mod traits;
pub mod types;

pub use error::Error;
pub use memory::MemorySlot;
pub use routes::{Route, document_title};
pub use token::Token;
pub use traits::{CredentialSlot, UserSource};
pub use types::{ApiUrl, User};

/// Slot key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "auth_token";

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
