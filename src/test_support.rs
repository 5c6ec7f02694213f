//! Shared helpers for unit tests: a throwaway Imgur double served by actix-web
//! on an ephemeral port, and an `ImgurClient` pointed at it.

use crate::config::ImgurConfig;
use crate::database::UserRepository;
use crate::imgur::ImgurClient;
use crate::models::User;
use crate::utils::AppError;
use actix_web::{web, App, HttpServer};
use async_trait::async_trait;

pub const CLIENT_ID: &str = "client-123";
pub const CLIENT_SECRET: &str = "secret-456";
pub const REDIRECT_URI: &str = "http://localhost:8080/api/callback";

pub fn imgur_client(base: &str) -> ImgurClient {
    ImgurClient::new(&ImgurConfig {
        client_id: CLIENT_ID.to_string(),
        client_secret: CLIENT_SECRET.to_string(),
        redirect_uri: REDIRECT_URI.to_string(),
        api_base: format!("{}/3", base),
        oauth_base: format!("{}/oauth2", base),
        timeout_secs: 5,
    })
    .expect("failed to build test Imgur client")
}

/// Client whose requests can never connect
pub fn unreachable_imgur() -> ImgurClient {
    imgur_client("http://127.0.0.1:1")
}

/// Serves `routes` on 127.0.0.1 and returns a client aimed at it.
/// Mock paths mirror Imgur's: `/3/...` for the API, `/oauth2/...` for OAuth.
pub async fn spawn_imgur<F>(routes: F) -> ImgurClient
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let server = HttpServer::new(move || App::new().configure(routes.clone()))
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("failed to bind mock Imgur");

    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());

    imgur_client(&format!("http://{}", addr))
}

/// User store that is always down
pub struct FailingUserRepository;

fn store_down() -> AppError {
    AppError::Database("connection refused".to_string())
}

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn find_by_username(&self, _username: &str) -> Result<Option<User>, AppError> {
        Err(store_down())
    }

    async fn exists_by_username(&self, _username: &str) -> Result<bool, AppError> {
        Err(store_down())
    }

    async fn save(&self, _user: User) -> Result<User, AppError> {
        Err(store_down())
    }

    async fn push_image_url(&self, _username: &str, _url: &str) -> Result<bool, AppError> {
        Err(store_down())
    }
}
