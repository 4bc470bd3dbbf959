//! Session states and the reactor transition table.

use trophycalc_core::{Token, User};

/// Where the session stands, derived from which halves are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No credential. Never logged in.
    NoToken,
    /// A credential whose user has not been resolved (yet).
    TokenNoUser,
    /// Logged in.
    TokenWithUser,
}

/// What the reactor does when it observes a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Force the user to absent.
    ClearUser,
    /// Resolve the token into a user.
    FetchUser,
    /// Nothing to do.
    Idle,
}

impl SessionState {
    pub fn of(token_present: bool, user_present: bool) -> Self {
        match (token_present, user_present) {
            (false, _) => SessionState::NoToken,
            (true, false) => SessionState::TokenNoUser,
            (true, true) => SessionState::TokenWithUser,
        }
    }

    /// Transition table of the token-change reactor.
    ///
    /// A cached user is never re-fetched, even when the token it was
    /// resolved from has since been replaced.
    pub fn reaction(self) -> Reaction {
        match self {
            SessionState::NoToken => Reaction::ClearUser,
            SessionState::TokenNoUser => Reaction::FetchUser,
            SessionState::TokenWithUser => Reaction::Idle,
        }
    }
}

/// Point-in-time view of the session, as seen by consumers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub token: Option<Token>,
    pub user: Option<User>,
}

impl Snapshot {
    /// True only when both a token and a user are present.
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn state(&self) -> SessionState {
        SessionState::of(self.token.is_some(), self.user.is_some())
    }
}

/// Event raised on every `set_token`, including repeats of the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenChange {
    Set,
    Cleared,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table() {
        assert_eq!(SessionState::NoToken.reaction(), Reaction::ClearUser);
        assert_eq!(SessionState::TokenNoUser.reaction(), Reaction::FetchUser);
        assert_eq!(SessionState::TokenWithUser.reaction(), Reaction::Idle);
    }

    #[test]
    fn user_without_token_is_no_token() {
        assert_eq!(SessionState::of(false, true), SessionState::NoToken);
    }

    #[test]
    fn token_alone_is_not_logged_in() {
        let snapshot = Snapshot {
            token: Some(Token::new("T1").unwrap()),
            user: None,
        };
        assert!(!snapshot.is_logged_in());
        assert_eq!(snapshot.state(), SessionState::TokenNoUser);
        assert!(!Snapshot::default().is_logged_in());
    }
}
