use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(String),
    Database(String),
    AlreadyExists(String),
    InvalidRequest(String),
    Hashing(String),
    /// Imgur answered, but not with what we asked for
    Imgur { status: Option<u16>, message: String },
    /// The request never got a usable answer (connect, timeout, body decode)
    Transport(String),
}

impl AppError {
    pub fn imgur(status: Option<u16>, message: impl Into<String>) -> Self {
        AppError::Imgur {
            status,
            message: message.into(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::AlreadyExists(msg) => write!(f, "Already exists: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::Hashing(msg) => write!(f, "Password hashing error: {}", msg),
            AppError::Imgur {
                status: Some(status),
                message,
            } => write!(f, "Imgur API responded with status {}: {}", status, message),
            AppError::Imgur {
                status: None,
                message,
            } => write!(f, "Imgur API error: {}", message),
            AppError::Transport(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(e: bcrypt::BcryptError) -> Self {
        AppError::Hashing(e.to_string())
    }
}
