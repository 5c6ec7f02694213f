pub mod auth;
pub mod security_headers;

pub use auth::{access_token, BearerToken};
pub use security_headers::SecurityHeaders;
