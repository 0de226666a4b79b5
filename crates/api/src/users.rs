//! In-memory wallet user store.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// A signed-in wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub wallet: String,
    /// Unix milliseconds of the first sign-in.
    pub created_at: u64,
}

/// Users keyed by wallet. Lost on restart.
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<HashMap<String, User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the user for `wallet`, creating it on first sight.
    pub async fn upsert_by_wallet(&self, wallet: &str) -> User {
        let mut users = self.users.write().await;
        if let Some(existing) = users.get(wallet) {
            return existing.clone();
        }

        let user = User {
            id: Uuid::new_v4(),
            wallet: wallet.to_string(),
            created_at: unix_millis(),
        };
        info!(wallet = %wallet, id = %user.id, "USER_CREATED");
        users.insert(wallet.to_string(), user.clone());
        user
    }

    pub async fn get(&self, wallet: &str) -> Option<User> {
        self.users.read().await.get(wallet).cloned()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
