// Access tokens held for the lifetime of the process: no eviction, no persistence
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
pub struct TokenStore {
    tokens: RwLock<HashMap<String, String>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores (or replaces) the Imgur access token for a user.
    /// Returns false when the map is poisoned and nothing was written.
    pub fn store(&self, username: &str, access_token: &str) -> bool {
        match self.tokens.write() {
            Ok(mut tokens) => {
                tokens.insert(username.to_string(), access_token.to_string());
                true
            }
            Err(_) => {
                log::error!("❌ Token store lock poisoned, token for {} not stored", username);
                false
            }
        }
    }

    pub fn get(&self, username: &str) -> Option<String> {
        self.tokens.read().ok()?.get(username).cloned()
    }

    /// Reverse lookup: which user was this token issued to
    pub fn username_for(&self, access_token: &str) -> Option<String> {
        self.tokens
            .read()
            .ok()?
            .iter()
            .find(|(_, token)| token.as_str() == access_token)
            .map(|(username, _)| username.clone())
    }
}

/// Leaves the lock poisoned, as a writer that panicked would
#[cfg(test)]
pub(crate) fn poison(store: &TokenStore) {
    let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _guard = store.tokens.write();
        panic!("writer died holding the token lock");
    }));
}
