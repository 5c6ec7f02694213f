pub mod auth;
pub mod health;
pub mod images;
pub mod swagger;
pub mod users;

use actix_web::web;
use crate::middleware::BearerToken;

/// Registers `/health` and the `/api` scope. Each fixed path is its own
/// resource, so a wrong method gets 405 instead of reaching `/{image_id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .wrap(BearerToken)
                .service(web::resource("/register").route(web::post().to(auth::register)))
                .service(web::resource("/authorize").route(web::get().to(auth::authorize)))
                .service(web::resource("/callback").route(web::get().to(auth::callback)))
                .service(web::resource("/upload-image").route(web::post().to(images::upload_image)))
                .service(web::resource("/user/images").route(web::get().to(images::get_user_images)))
                .service(web::resource("/user-details").route(web::get().to(users::user_details)))
                .service(
                    web::resource("/{image_id}")
                        .route(web::get().to(images::get_image))
                        .route(web::delete().to(images::delete_image)),
                ),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryUserRepository;
    use crate::state::AppState;
    use crate::test_support;
    use actix_web::{http::StatusCode, test, App};
    use std::sync::Arc;

    #[actix_web::test]
    async fn fixed_paths_are_never_read_as_image_ids() {
        let state = web::Data::new(AppState::new(
            Arc::new(InMemoryUserRepository::new()),
            test_support::unreachable_imgur(),
        ));
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let wrong_methods = [
            test::TestRequest::get().uri("/api/register"),
            test::TestRequest::delete().uri("/api/register"),
            test::TestRequest::delete().uri("/api/authorize"),
            test::TestRequest::delete().uri("/api/callback"),
            test::TestRequest::get().uri("/api/upload-image"),
            test::TestRequest::delete().uri("/api/user-details"),
        ];

        for req in wrong_methods {
            let req = req
                .insert_header(("Authorization", "Bearer access_token_123"))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        }
    }
}
