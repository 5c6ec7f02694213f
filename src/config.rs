use crate::utils::AppError;
use std::env;

const DEFAULT_IMGUR_API_BASE: &str = "https://api.imgur.com/3";
const DEFAULT_IMGUR_OAUTH_BASE: &str = "https://api.imgur.com/oauth2";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the service on the in-memory user store
    pub database_url: Option<String>,
    pub cors_origins: Vec<String>,
    pub imgur: ImgurConfig,
}

#[derive(Clone, Debug)]
pub struct ImgurConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub api_base: String,
    pub oauth_base: String,
    pub timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            optional(key).ok_or_else(|| AppError::Config(format!("{} must be set", key)))
        };

        let port = match optional("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("PORT '{}' is not a valid port: {}", raw, e)))?,
            None => 8080,
        };

        let timeout_secs = match optional("IMGUR_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                AppError::Config(format!("IMGUR_TIMEOUT_SECS '{}' is not a number: {}", raw, e))
            })?,
            None => 30,
        };

        let cors_origins = optional("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(AppConfig {
            host: optional("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url: optional("DATABASE_URL"),
            cors_origins,
            imgur: ImgurConfig {
                client_id: required("IMGUR_CLIENT_ID")?,
                client_secret: required("IMGUR_CLIENT_SECRET")?,
                redirect_uri: required("IMGUR_REDIRECT_URI")?,
                api_base: trim_base(
                    optional("IMGUR_API_BASE").unwrap_or_else(|| DEFAULT_IMGUR_API_BASE.to_string()),
                ),
                oauth_base: trim_base(
                    optional("IMGUR_OAUTH_BASE")
                        .unwrap_or_else(|| DEFAULT_IMGUR_OAUTH_BASE.to_string()),
                ),
                timeout_secs,
            },
        })
    }
}

fn trim_base(base: String) -> String {
    base.trim_end_matches('/').to_string()
}
