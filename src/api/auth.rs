use actix_web::{http::header, web, Either, HttpResponse};
use serde::Deserialize;
use crate::services::{auth_service, user_service};
use crate::state::AppState;
use crate::utils::AppError;

#[derive(Debug, Deserialize, utoipa::IntoParams, utoipa::ToSchema)]
#[into_params(parameter_in = Query)]
pub struct RegisterParams {
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AuthorizeQuery {
    pub username: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackQuery {
    pub code: Option<String>,
    /// Username passed through `authorize`
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Accepts the fields as a form body or as query parameters
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Auth",
    params(RegisterParams),
    responses(
        (status = 200, description = "User registered", body = String),
        (status = 400, description = "Username already exists or fields missing", body = String),
        (status = 500, description = "User store failure", body = String)
    )
)]
pub async fn register(
    state: web::Data<AppState>,
    params: Either<web::Form<RegisterParams>, web::Query<RegisterParams>>,
) -> HttpResponse {
    let params = match params {
        Either::Left(form) => form.into_inner(),
        Either::Right(query) => query.into_inner(),
    };
    log::info!("📝 POST /api/register - username: {}", params.username);

    if params.username.trim().is_empty() || params.password.is_empty() {
        log::warn!("❌ Registration rejected: username and password are required");
        return HttpResponse::BadRequest().body("Username and password are required");
    }

    match user_service::is_user_already_registered(state.users.as_ref(), &params.username).await {
        Ok(true) => {
            log::warn!("⚠️ Username {} already exists. User needs to authorize.", params.username);
            return HttpResponse::BadRequest().body("Username already exists!Proceed to authorize.");
        }
        Ok(false) => {}
        Err(e) => {
            log::error!("❌ Registration failed: {} - {}", params.username, e);
            return HttpResponse::InternalServerError().body(format!("Failed to register user: {}", e));
        }
    }

    match user_service::register_user(
        state.users.as_ref(),
        &params.firstname,
        &params.lastname,
        &params.username,
        &params.password,
    )
    .await
    {
        Ok(_) => {
            log::info!("✅ User {} successfully registered", params.username);
            HttpResponse::Ok().body("User successfully registered, proceed to authorize")
        }
        // Lost a race with a concurrent registration
        Err(AppError::AlreadyExists(_)) => {
            HttpResponse::BadRequest().body("Username already exists!Proceed to authorize.")
        }
        Err(e) => {
            log::error!("❌ Registration failed: {} - {}", params.username, e);
            HttpResponse::InternalServerError().body(format!("Failed to register user: {}", e))
        }
    }
}

/// Redirect user to Imgur's OAuth authorization page
#[utoipa::path(
    get,
    path = "/api/authorize",
    tag = "Auth",
    params(AuthorizeQuery),
    responses(
        (status = 302, description = "Redirect to the Imgur consent page"),
        (status = 400, description = "User not registered", body = String)
    )
)]
pub async fn authorize(
    state: web::Data<AppState>,
    query: web::Query<AuthorizeQuery>,
) -> HttpResponse {
    log::info!("🔐 GET /api/authorize - username: {}", query.username);

    match user_service::is_user_already_registered(state.users.as_ref(), &query.username).await {
        Ok(true) => {}
        Ok(false) => {
            log::warn!("⚠️ User {} not registered", query.username);
            return HttpResponse::BadRequest().body("Please register first.");
        }
        Err(e) => {
            log::error!("❌ Failed to look up {}: {}", query.username, e);
            return HttpResponse::InternalServerError().body(format!("Failed to look up user: {}", e));
        }
    }

    let authorization_url = auth_service::authorization_url(&state.imgur, Some(&query.username));

    log::info!("✅ Redirecting {} to Imgur", query.username);
    HttpResponse::Found()
        .append_header((header::LOCATION, authorization_url))
        .finish()
}

/// Imgur redirects here with the authorization code
#[utoipa::path(
    get,
    path = "/api/callback",
    tag = "Auth",
    params(CallbackQuery),
    responses(
        (status = 200, description = "Access token issued", body = String),
        (status = 400, description = "Authorization denied or code missing", body = String),
        (status = 500, description = "Code exchange failed or token not stored", body = String)
    )
)]
pub async fn callback(
    state: web::Data<AppState>,
    query: web::Query<CallbackQuery>,
) -> HttpResponse {
    log::info!("🔐 GET /api/callback - Processing Imgur OAuth");

    if let Some(error) = &query.error {
        log::error!("❌ OAuth error: {}", error);
        return HttpResponse::BadRequest().body(format!("Authorization denied: {}", error));
    }

    let code = match query.code.as_deref().filter(|c| !c.is_empty()) {
        Some(c) => c,
        None => {
            log::error!("❌ No authorization code provided");
            return HttpResponse::BadRequest().body("Missing authorization code");
        }
    };

    let token = match auth_service::exchange_auth_code_for_access_token(&state.imgur, code).await {
        Ok(token) => token,
        Err(e) => {
            log::error!("❌ Error exchanging authorization code: {}", e);
            return HttpResponse::InternalServerError()
                .body(format!("Error exchanging authorization code: {}", e));
        }
    };

    if let Some(username) = query.state.as_deref() {
        match user_service::is_user_already_registered(state.users.as_ref(), username).await {
            Ok(true) => {
                if !auth_service::store_access_token(&state.tokens, username, &token.access_token) {
                    return HttpResponse::InternalServerError()
                        .body("Failed to store access token, please authorize again");
                }
            }
            Ok(false) => log::warn!("⚠️ Callback state names unknown user {}, token not stored", username),
            Err(e) => log::error!("❌ Failed to look up {}: {}, token not stored", username, e),
        }
    }

    log::info!("✅ Callback success. Access token provided.");
    HttpResponse::Ok().body(format!("Access Token: {}", token.access_token))
}
