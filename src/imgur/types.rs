use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Every Imgur API v3 response is wrapped as `{ "data": ..., "success": ..., "status": ... }`.
/// Only `data` is read, the HTTP status already says whether the call worked.
#[derive(Debug, Deserialize)]
pub struct ImgurEnvelope<T> {
    pub data: Option<T>,
}

/// Image object exactly as Imgur sent it. Clients get it back untouched,
/// `null` values and unexpected types included; we only read a few keys.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct ImgurImage(pub Map<String, Value>);

impl ImgurImage {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    pub fn link(&self) -> Option<&str> {
        self.str_field("link")
    }

    pub fn deletehash(&self) -> Option<&str> {
        self.str_field("deletehash")
    }
}

/// Result of the OAuth2 authorization-code exchange
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OAuthToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
    pub token_type: Option<String>,
    pub account_username: Option<String>,
    pub account_id: Option<u64>,
}

/// A file received from the client, forwarded as the `image` part
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}
