// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::resolver::UserLookup;
use crate::auth::{PublicRoutes, TokenCodec};
use crate::models::User;
use crate::store::InMemoryStore;

/// Shared application state.
///
/// The token codec and public route set are built once at startup and are
/// read-only from then on; only the store is behind a lock.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub tokens: Arc<TokenCodec>,
    pub public_routes: Arc<PublicRoutes>,
}

impl AppState {
    pub fn new(store: InMemoryStore, tokens: TokenCodec, public_routes: PublicRoutes) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            tokens: Arc::new(tokens),
            public_routes: Arc::new(public_routes),
        }
    }
}

impl UserLookup for AppState {
    async fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.store.read().await.find_user_by_email(email)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::auth::password;

    const TEST_SECRET: &[u8] = b"unit-test-secret-of-32-bytes-ok!";
    const OTHER_SECRET: &[u8] = b"a-different-secret-of-32-bytes!!";
    const TEST_TTL: i64 = 86_400;

    /// Fresh state with an empty store and a fixed test secret.
    pub fn state() -> AppState {
        AppState::new(
            InMemoryStore::new(),
            TokenCodec::new(TEST_SECRET, TEST_TTL).expect("test secret is long enough"),
            PublicRoutes::defaults(),
        )
    }

    /// A codec signing with a different key, for forged-token cases.
    pub fn codec_with_other_secret() -> TokenCodec {
        TokenCodec::new(OTHER_SECRET, TEST_TTL).expect("test secret is long enough")
    }

    /// Insert a user with a real password hash and return the record.
    pub async fn seed_user(state: &AppState, email: &str, password_plain: &str) -> User {
        let hash = password::hash_password(password_plain).expect("hashing succeeds");
        state
            .store
            .write()
            .await
            .create_user(email, "Test User", hash)
            .expect("email is unused")
    }
}
