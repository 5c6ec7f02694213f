use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Imgur Gateway API",
        version = "1.0.0",
        description = "Registers local users, runs the Imgur OAuth2 authorization-code flow and proxies image operations to Imgur. \n\n**Authentication:** Image and user endpoints require the Imgur access token as a Bearer token.\n\n**Flow:**\n1. `POST /api/register`\n2. `GET /api/authorize?username=...` (browser)\n3. Imgur redirects to `/api/callback`, which returns the access token\n4. Call the image endpoints with `Authorization: Bearer <token>`"
    ),
    paths(
        // Auth
        crate::api::auth::register,
        crate::api::auth::authorize,
        crate::api::auth::callback,

        // Images
        crate::api::images::upload_image,
        crate::api::images::get_user_images,
        crate::api::images::get_image,
        crate::api::images::delete_image,

        // Users
        crate::api::users::user_details,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::models::UserDetails,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Local registration and the Imgur OAuth2 authorization-code exchange."),
        (name = "Images", description = "Upload, view, list and delete images on Imgur with the user's access token."),
        (name = "Users", description = "Registered user details and upload history."),
        (name = "Health", description = "Health check endpoint for monitoring service status."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Imgur access token returned by /api/callback"))
                        .build()
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route_and_the_bearer_scheme() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/register",
            "/api/authorize",
            "/api/callback",
            "/api/upload-image",
            "/api/user/images",
            "/api/user-details",
            "/api/{image_id}",
            "/api/{delete_hash}",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
