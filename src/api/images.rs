use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use futures::TryStreamExt;
use serde_json::json;
use crate::imgur::UploadFile;
use crate::middleware::access_token;
use crate::services::{image_service, user_service};
use crate::state::AppState;
use crate::utils::AppError;

const FILE_FIELD: &str = "file";

/// Reads the `file` part of the upload; other parts are drained and ignored
async fn read_file_part(payload: &mut Multipart) -> Result<Option<UploadFile>, AppError> {
    let mut upload = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("Malformed multipart body: {}", e)))?
    {
        let disposition = field.content_disposition().cloned();
        let is_file = disposition
            .as_ref()
            .and_then(|cd| cd.get_name())
            .map_or(false, |name| name == FILE_FIELD);

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::InvalidRequest(format!("Malformed multipart body: {}", e)))?
        {
            if is_file {
                bytes.extend_from_slice(&chunk);
            }
        }

        if is_file && upload.is_none() {
            upload = Some(UploadFile {
                file_name: disposition
                    .as_ref()
                    .and_then(|cd| cd.get_filename())
                    .map(String::from),
                content_type: field.content_type().map(|mime| mime.to_string()),
                bytes,
            });
        }
    }

    Ok(upload)
}

/// Upload image to Imgur (use OAuth access token)
#[utoipa::path(
    post,
    path = "/api/upload-image",
    tag = "Images",
    request_body(content_type = "multipart/form-data", description = "Image in a part named `file`"),
    responses(
        (status = 200, description = "Imgur link of the uploaded image", body = String),
        (status = 400, description = "No `file` part in the request", body = String),
        (status = 403, description = "User not authenticated", body = String),
        (status = 500, description = "Upload failed", body = String)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_image(
    req: HttpRequest,
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> HttpResponse {
    log::info!("📤 POST /api/upload-image");

    let token = match access_token(&req) {
        Some(token) => token,
        None => {
            log::warn!("⚠️ User not authenticated");
            return HttpResponse::Forbidden().body("User not authenticated");
        }
    };

    let file = match read_file_part(&mut payload).await {
        Ok(Some(file)) => file,
        Ok(None) => {
            log::warn!("❌ Upload without a '{}' part", FILE_FIELD);
            return HttpResponse::BadRequest().body("Missing 'file' part");
        }
        Err(e) => {
            log::warn!("❌ {}", e);
            return HttpResponse::BadRequest().body(e.to_string());
        }
    };

    let image = match image_service::upload_image(&state.imgur, file, &token).await {
        Ok(image) => image,
        Err(e) => {
            log::error!("❌ Upload failed: {}", e);
            return HttpResponse::InternalServerError().body(format!("Failed to upload image: {}", e));
        }
    };

    let link = match image.link() {
        Some(link) => link.to_string(),
        None => {
            log::error!("❌ Imgur accepted the upload but returned no link");
            return HttpResponse::InternalServerError()
                .body("Failed to upload image: no link in Imgur response");
        }
    };

    // Attribute the upload when the token was issued through our callback
    if let Some(username) = state.tokens.username_for(&token) {
        if let Err(e) = user_service::record_image_url(state.users.as_ref(), &username, &link).await {
            log::error!("❌ Could not record {} for {}: {}", link, username, e);
        }
    }

    log::info!("✅ Image upload successful: {}", link);
    HttpResponse::Ok().body(link)
}

/// View all images of the token's Imgur account
#[utoipa::path(
    get,
    path = "/api/user/images",
    tag = "Images",
    responses(
        (status = 200, description = "Imgur image objects of the account"),
        (status = 403, description = "User not authenticated"),
        (status = 500, description = "Retrieval failed, empty list")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user_images(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    log::info!("📚 GET /api/user/images");

    let token = match access_token(&req) {
        Some(token) => token,
        None => {
            log::warn!("⚠️ User not authenticated");
            return HttpResponse::Forbidden().json(json!([{ "error": "User not authenticated" }]));
        }
    };

    match image_service::get_user_images(&state.imgur, &token).await {
        Ok(images) => {
            log::info!("✅ User images retrieved successfully ({})", images.len());
            HttpResponse::Ok().json(images)
        }
        Err(e) => {
            log::error!("❌ Images retrieval failed: {}", e);
            HttpResponse::InternalServerError().json(json!([]))
        }
    }
}

/// View image (use OAuth access token)
#[utoipa::path(
    get,
    path = "/api/{image_id}",
    tag = "Images",
    params(("image_id" = String, Path, description = "Imgur image id")),
    responses(
        (status = 200, description = "Imgur image object"),
        (status = 403, description = "User not authenticated"),
        (status = 404, description = "Image not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_image(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let image_id = path.into_inner();
    log::info!("🔍 GET /api/{}", image_id);

    let token = match access_token(&req) {
        Some(token) => token,
        None => {
            log::warn!("⚠️ User not authenticated");
            return HttpResponse::Forbidden().json(serde_json::Value::Null);
        }
    };

    match image_service::get_image(&state.imgur, &image_id, &token).await {
        Ok(Some(image)) => {
            log::info!("✅ Image {} retrieved successfully", image_id);
            HttpResponse::Ok().json(image)
        }
        Ok(None) => {
            log::warn!("⚠️ Image {} not found", image_id);
            HttpResponse::NotFound().json(serde_json::Value::Null)
        }
        Err(e) => {
            log::error!("❌ Image {} retrieval failed: {}", image_id, e);
            HttpResponse::NotFound().json(serde_json::Value::Null)
        }
    }
}

/// Delete image from Imgur (use OAuth access token)
#[utoipa::path(
    delete,
    path = "/api/{delete_hash}",
    tag = "Images",
    params(("delete_hash" = String, Path, description = "Imgur delete hash (or image id for owned images)")),
    responses(
        (status = 200, description = "Image deleted successfully", body = String),
        (status = 403, description = "User not authenticated", body = String),
        (status = 404, description = "Image not found", body = String),
        (status = 502, description = "Imgur unreachable", body = String)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_image(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let delete_hash = path.into_inner();
    log::info!("🗑️ DELETE /api/{}", delete_hash);

    let token = match access_token(&req) {
        Some(token) => token,
        None => {
            log::warn!("⚠️ User not authenticated");
            return HttpResponse::Forbidden().body("User not authenticated");
        }
    };

    match image_service::delete_image(&state.imgur, &delete_hash, &token).await {
        Ok(true) => {
            log::info!("✅ Image deleted successfully");
            HttpResponse::Ok().body("Image deleted successfully")
        }
        Ok(false) => {
            log::warn!("⚠️ Image {} not found", delete_hash);
            HttpResponse::NotFound().body("Image not found")
        }
        Err(e) => {
            log::error!("❌ Image deletion failed: {}", e);
            HttpResponse::BadGateway().body(format!("Failed to delete image: {}", e))
        }
    }
}
