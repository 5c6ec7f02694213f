use super::UserRepository;
use crate::models::User;
use crate::utils::AppError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// User store kept in process memory, used when no DATABASE_URL is configured
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> AppError {
    AppError::Database("in-memory user store lock poisoned".to_string())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.get(username).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.contains_key(username))
    }

    async fn save(&self, user: User) -> Result<User, AppError> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        if users.contains_key(&user.username) {
            return Err(AppError::AlreadyExists(format!(
                "username '{}' is already registered",
                user.username
            )));
        }
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn push_image_url(&self, username: &str, url: &str) -> Result<bool, AppError> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        match users.get_mut(username) {
            Some(user) => {
                user.image_urls.push(url.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
