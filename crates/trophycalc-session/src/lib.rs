//! trophycalc-session - Authentication session lifecycle.
//!
//! A [`SessionStore`] owns the bearer token and the user it resolves to.
//! Every token change is published as a [`TokenChange`]; the [`Reactor`]
//! subscribes to those events and fetches or clears the user so that the
//! session settles in one of the [`SessionState`]s. [`SessionContext`] ties
//! a store and its reactor together for the lifetime of an application.

mod callback;
mod context;
mod fetch;
mod reactor;
mod state;
mod store;

pub use callback::{complete_callback, token_from_redirect};
pub use context::SessionContext;
pub use fetch::{FetchHandle, FetchOutcome};
pub use reactor::Reactor;
pub use state::{Reaction, SessionState, Snapshot, TokenChange};
pub use store::SessionStore;
