//! Imgur API v3 + OAuth2 endpoints.
//!
//! `ImgurClient` only carries what every call needs (credentials, base URLs
//! and a pooled reqwest client). The calls themselves live in
//! `services::auth_service` and `services::image_service`.

pub mod types;

pub use types::*;

use crate::config::ImgurConfig;
use crate::utils::AppError;
use std::time::Duration;

#[derive(Clone)]
pub struct ImgurClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    api_base: String,
    oauth_base: String,
}

impl ImgurClient {
    pub fn new(config: &ImgurConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        log::info!("🖼️  Imgur client ready (api: {}, oauth: {})", config.api_base, config.oauth_base);

        Ok(Self {
            http,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            api_base: config.api_base.clone(),
            oauth_base: config.oauth_base.clone(),
        })
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// `{api_base}/{path}`, e.g. `api_url("image/abc")`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    /// `{oauth_base}/{path}`, e.g. `oauth_url("token")`
    pub fn oauth_url(&self, path: &str) -> String {
        format!("{}/{}", self.oauth_base, path.trim_start_matches('/'))
    }
}
