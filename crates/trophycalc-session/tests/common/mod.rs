#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use trophycalc_core::error::{ProtocolError, StorageError, TransportError};
use trophycalc_core::{CredentialSlot, Result, Token, User, UserSource};

/// Build a user with fixed timestamps.
pub fn user(id: u64) -> User {
    User {
        id,
        name: format!("player{}", id),
        email: format!("player{}@example.com", id),
        avatar: format!("https://avatars.example.com/{}.jpg", id),
        profile_url: format!("https://steamcommunity.com/profiles/7656119796028{:04}", id),
        steam_id_64: format!("7656119796028{:04}", id),
        profile_updated_at: Some("2024-05-01T12:00:00.000000Z".to_string()),
        created_at: "2024-01-10T08:30:00.000000Z".to_string(),
        updated_at: "2024-05-01T12:00:00.000000Z".to_string(),
    }
}

#[derive(Clone)]
enum Reply {
    User(User),
    Unauthorized,
    Unreachable,
}

/// Scripted user source that records every call.
#[derive(Clone)]
pub struct FakeSource {
    reply: Reply,
    calls: Arc<AtomicUsize>,
    tokens: Arc<Mutex<Vec<String>>>,
    gate: Option<Arc<Semaphore>>,
}

impl FakeSource {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
            tokens: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    pub fn returning(user: User) -> Self {
        Self::new(Reply::User(user))
    }

    pub fn unauthorized() -> Self {
        Self::new(Reply::Unauthorized)
    }

    pub fn unreachable() -> Self {
        Self::new(Reply::Unreachable)
    }

    /// Hold every call until the returned semaphore gets a permit.
    pub fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }

    /// Wait until at least `n` calls have started.
    pub async fn wait_for_calls(&self, n: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.calls() < n {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("timed out waiting for user fetch");
    }
}

#[async_trait]
impl UserSource for FakeSource {
    async fn current_user(&self, token: &Token) -> Result<User> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tokens.lock().unwrap().push(token.as_str().to_string());

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        match &self.reply {
            Reply::User(user) => Ok(user.clone()),
            Reply::Unauthorized => Err(ProtocolError::new(
                401,
                None,
                Some("Unauthenticated.".to_string()),
            )
            .into()),
            Reply::Unreachable => Err(TransportError::Connection {
                message: "connection refused".to_string(),
            }
            .into()),
        }
    }
}

/// Slot whose reads or writes always fail.
pub struct BrokenSlot {
    pub fail_reads: bool,
}

impl BrokenSlot {
    fn error(operation: &'static str, key: &str) -> trophycalc_core::Error {
        StorageError::Io {
            operation,
            key: key.to_string(),
            message: "disk unavailable".to_string(),
        }
        .into()
    }
}

impl CredentialSlot for BrokenSlot {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads {
            Err(Self::error("read", key))
        } else {
            Ok(None)
        }
    }

    fn set(&self, key: &str, _value: &str) -> Result<()> {
        Err(Self::error("write", key))
    }

    fn delete(&self, key: &str) -> Result<()> {
        Err(Self::error("delete", key))
    }
}

/// Let spawned tasks run for a while.
pub async fn settle_tasks() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}
