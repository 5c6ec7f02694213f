use crate::imgur::{ImgurClient, OAuthToken};
use crate::utils::{AppError, TokenStore};

/// Imgur authorization page the user is redirected to.
/// `state` comes back untouched on the callback; we use it to carry the username.
pub fn authorization_url(imgur: &ImgurClient, state: Option<&str>) -> String {
    let mut params = vec![
        ("client_id", imgur.client_id()),
        ("response_type", "code"),
        ("redirect_uri", imgur.redirect_uri()),
    ];
    if let Some(state) = state {
        params.push(("state", state));
    }

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", imgur.oauth_url("authorize"), query_string)
}

/// Exchange authorization code for an access token
pub async fn exchange_auth_code_for_access_token(
    imgur: &ImgurClient,
    authorization_code: &str,
) -> Result<OAuthToken, AppError> {
    log::info!("🔐 Exchanging authorization code for access token...");

    let response = imgur
        .http()
        .post(imgur.oauth_url("token"))
        .form(&[
            ("client_id", imgur.client_id()),
            ("client_secret", imgur.client_secret()),
            ("code", authorization_code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", imgur.redirect_uri()),
        ])
        .send()
        .await
        .map_err(|e| AppError::Transport(format!("Failed to exchange code: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        log::warn!("❌ Token endpoint answered {}: {}", status, body);
        return Err(AppError::imgur(
            Some(status.as_u16()),
            "Failed to exchange authorization code",
        ));
    }

    let tokens: serde_json::Value = response
        .json()
        .await
        .map_err(|e| AppError::Transport(format!("Failed to parse token response: {}", e)))?;

    let access_token = tokens["access_token"]
        .as_str()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::imgur(None, "No access token in response"))?;

    log::info!("✅ Access token retrieved");

    Ok(OAuthToken {
        access_token: access_token.to_string(),
        refresh_token: tokens["refresh_token"].as_str().map(String::from),
        expires_in: tokens["expires_in"].as_u64(),
        token_type: tokens["token_type"].as_str().map(String::from),
        account_username: tokens["account_username"].as_str().map(String::from),
        account_id: tokens["account_id"].as_u64(),
    })
}

// Store access token for a user. False when the token could not be kept.
pub fn store_access_token(tokens: &TokenStore, username: &str, access_token: &str) -> bool {
    log::info!("💾 Storing access token for {}", username);
    tokens.store(username, access_token)
}

// Get the stored access token for a user
pub fn get_access_token_for_user(tokens: &TokenStore, username: &str) -> Option<String> {
    tokens.get(username)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, CLIENT_ID, CLIENT_SECRET, REDIRECT_URI};
    use actix_web::{web, HttpResponse};
    use std::collections::HashMap;

    #[test]
    fn authorization_url_encodes_redirect_and_state() {
        let imgur = test_support::imgur_client("https://api.imgur.com");

        let url = authorization_url(&imgur, Some("john summers"));

        assert_eq!(
            url,
            "https://api.imgur.com/oauth2/authorize?client_id=client-123&response_type=code\
             &redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fapi%2Fcallback&state=john%20summers"
        );
        assert!(!authorization_url(&imgur, None).contains("state="));
    }

    async fn token_endpoint(form: web::Form<HashMap<String, String>>) -> HttpResponse {
        let expected = [
            ("client_id", CLIENT_ID),
            ("client_secret", CLIENT_SECRET),
            ("code", "auth_code_123"),
            ("grant_type", "authorization_code"),
            ("redirect_uri", REDIRECT_URI),
        ];
        let all_present = expected
            .iter()
            .all(|(k, v)| form.get(*k).map(String::as_str) == Some(*v));

        if !all_present {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": "invalid_grant" }));
        }

        HttpResponse::Ok().json(serde_json::json!({
            "access_token": "access_token_123",
            "refresh_token": "refresh_456",
            "expires_in": 315360000,
            "token_type": "bearer",
            "account_username": "john_summers",
            "account_id": 42
        }))
    }

    #[actix_web::test]
    async fn exchange_posts_the_five_form_fields() {
        let imgur = test_support::spawn_imgur(|cfg| {
            cfg.route("/oauth2/token", web::post().to(token_endpoint));
        })
        .await;

        let token = exchange_auth_code_for_access_token(&imgur, "auth_code_123")
            .await
            .unwrap();

        assert_eq!(token.access_token, "access_token_123");
        assert_eq!(token.refresh_token.as_deref(), Some("refresh_456"));
        assert_eq!(token.account_username.as_deref(), Some("john_summers"));
        assert_eq!(token.account_id, Some(42));
    }

    #[actix_web::test]
    async fn rejected_code_is_an_imgur_error() {
        let imgur = test_support::spawn_imgur(|cfg| {
            cfg.route("/oauth2/token", web::post().to(token_endpoint));
        })
        .await;

        let result = exchange_auth_code_for_access_token(&imgur, "stale_code").await;

        assert!(matches!(
            result,
            Err(AppError::Imgur { status: Some(400), .. })
        ));
    }

    #[actix_web::test]
    async fn body_without_access_token_is_an_error() {
        let imgur = test_support::spawn_imgur(|cfg| {
            cfg.route(
                "/oauth2/token",
                web::post().to(|| async {
                    HttpResponse::Ok().json(serde_json::json!({ "token_type": "bearer" }))
                }),
            );
        })
        .await;

        let result = exchange_auth_code_for_access_token(&imgur, "auth_code_123").await;

        match result {
            Err(AppError::Imgur { status: None, message }) => {
                assert_eq!(message, "No access token in response")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn unreachable_token_endpoint_is_a_transport_error() {
        let imgur = test_support::unreachable_imgur();

        let result = exchange_auth_code_for_access_token(&imgur, "auth_code_123").await;

        assert!(matches!(result, Err(AppError::Transport(_))));
    }

    #[test]
    fn stored_tokens_are_looked_up_by_username() {
        let tokens = TokenStore::new();
        assert!(store_access_token(&tokens, "john_summers", "access_token_123"));

        assert_eq!(
            get_access_token_for_user(&tokens, "john_summers").as_deref(),
            Some("access_token_123")
        );
        assert!(get_access_token_for_user(&tokens, "someone_else").is_none());
    }
}
