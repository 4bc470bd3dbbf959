//! User profile source trait.

use async_trait::async_trait;

use crate::{Result, Token, User};

/// Exchanges a bearer token for the profile of the user it belongs to.
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Fetch the user authenticated by `token`.
    ///
    /// Any error means the token could not be resolved right now; callers
    /// decide whether that is fatal for the session.
    async fn current_user(&self, token: &Token) -> Result<User>;
}

#[async_trait]
impl<T: UserSource + ?Sized> UserSource for std::sync::Arc<T> {
    async fn current_user(&self, token: &Token) -> Result<User> {
        (**self).current_user(token).await
    }
}
