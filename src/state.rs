use crate::database::UserRepository;
use crate::imgur::ImgurClient;
use crate::utils::TokenStore;
use std::sync::Arc;

/// Shared by every worker through `web::Data<AppState>`
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub tokens: TokenStore,
    pub imgur: ImgurClient,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepository>, imgur: ImgurClient) -> Self {
        Self {
            users,
            tokens: TokenStore::new(),
            imgur,
        }
    }
}
