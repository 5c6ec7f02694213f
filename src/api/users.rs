use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use crate::middleware::access_token;
use crate::models::UserDetails;
use crate::services::{auth_service, user_service};
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserDetailsQuery {
    pub username: String,
}

/// Details of a registered user. The password hash is never returned.
/// Once a user has authorized through the callback, only that user's token may read them.
#[utoipa::path(
    get,
    path = "/api/user-details",
    tag = "Users",
    params(UserDetailsQuery),
    responses(
        (status = 200, description = "User details", body = UserDetails),
        (status = 403, description = "User not authenticated, or token issued to another user"),
        (status = 404, description = "No such user"),
        (status = 500, description = "User store failure")
    ),
    security(("bearer_auth" = []))
)]
pub async fn user_details(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<UserDetailsQuery>,
) -> HttpResponse {
    log::info!("👤 GET /api/user-details - username: {}", query.username);

    let token = match access_token(&req) {
        Some(token) => token,
        None => {
            log::warn!("⚠️ User not authenticated");
            return HttpResponse::Forbidden().json(serde_json::Value::Null);
        }
    };

    if let Some(issued) = auth_service::get_access_token_for_user(&state.tokens, &query.username) {
        if issued != token {
            log::warn!("⚠️ Token does not belong to {}", query.username);
            return HttpResponse::Forbidden().json(serde_json::Value::Null);
        }
    }

    match user_service::get_user_info(state.users.as_ref(), &query.username).await {
        Ok(Some(user)) => {
            log::info!("✅ User details retrieval successful");
            HttpResponse::Ok().json(UserDetails::from(user))
        }
        Ok(None) => {
            log::warn!("⚠️ User {} not found", query.username);
            HttpResponse::NotFound().json(serde_json::Value::Null)
        }
        Err(e) => {
            log::error!("❌ Failed to load {}: {}", query.username, e);
            HttpResponse::InternalServerError().json(serde_json::Value::Null)
        }
    }
}
