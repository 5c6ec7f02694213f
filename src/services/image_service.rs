use crate::imgur::{ImgurClient, ImgurEnvelope, ImgurImage, UploadFile};
use crate::utils::AppError;
use reqwest::multipart::{Form, Part};

/// Upload an image to Imgur using the user's OAuth access token
pub async fn upload_image(
    imgur: &ImgurClient,
    file: UploadFile,
    access_token: &str,
) -> Result<ImgurImage, AppError> {
    log::info!("📤 Uploading image ({} bytes) to Imgur", file.bytes.len());

    let mut image_part = Part::bytes(file.bytes)
        .file_name(file.file_name.unwrap_or_else(|| "upload".to_string()));
    if let Some(content_type) = file.content_type.as_deref() {
        image_part = image_part
            .mime_str(content_type)
            .map_err(|e| AppError::InvalidRequest(format!("Invalid content type: {}", e)))?;
    }

    let form = Form::new()
        .part("image", image_part)
        .text("type", "file")
        .text("public", "true");

    let response = imgur
        .http()
        .post(imgur.api_url("image"))
        .bearer_auth(access_token)
        .multipart(form)
        .send()
        .await
        .map_err(|e| AppError::Transport(format!("Failed to upload image: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        log::warn!("❌ Imgur upload answered {}", status);
        return Err(AppError::imgur(Some(status.as_u16()), "image upload rejected"));
    }

    let envelope: ImgurEnvelope<ImgurImage> = response
        .json()
        .await
        .map_err(|e| AppError::Transport(format!("Failed to parse upload response: {}", e)))?;

    let image = envelope
        .data
        .ok_or_else(|| AppError::imgur(None, "No 'data' field in response"))?;

    log::info!("✅ Image uploaded: {}", image.link().unwrap_or("<no link>"));
    Ok(image)
}

/// Get image from Imgur by ID. `None` when Imgur doesn't hand one back.
pub async fn get_image(
    imgur: &ImgurClient,
    image_id: &str,
    access_token: &str,
) -> Result<Option<ImgurImage>, AppError> {
    log::info!("🔍 Fetching image {} from Imgur", image_id);

    let response = imgur
        .http()
        .get(imgur.api_url(&format!("image/{}", urlencoding::encode(image_id))))
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| AppError::Transport(format!("Failed to fetch image: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        log::warn!("⚠️ Imgur answered {} for image {}", status, image_id);
        return Ok(None);
    }

    // A 2xx body we can't read is treated like a missing image
    match response.json::<ImgurEnvelope<ImgurImage>>().await {
        Ok(envelope) => Ok(envelope.data),
        Err(e) => {
            log::warn!("⚠️ Unreadable image response for {}: {}", image_id, e);
            Ok(None)
        }
    }
}

/// Delete an image from Imgur. True iff Imgur accepted the deletion.
pub async fn delete_image(
    imgur: &ImgurClient,
    delete_hash: &str,
    access_token: &str,
) -> Result<bool, AppError> {
    log::info!("🗑️ Deleting image {} from Imgur", delete_hash);

    let response = imgur
        .http()
        .delete(imgur.api_url(&format!("image/{}", urlencoding::encode(delete_hash))))
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| AppError::Transport(format!("Failed to delete image: {}", e)))?;

    let deleted = response.status().is_success();
    if !deleted {
        log::warn!("⚠️ Imgur answered {} deleting {}", response.status(), delete_hash);
    }
    Ok(deleted)
}

/// Get all images of the account the token belongs to
pub async fn get_user_images(
    imgur: &ImgurClient,
    access_token: &str,
) -> Result<Vec<ImgurImage>, AppError> {
    log::info!("📚 Fetching account images from Imgur");

    let response = imgur
        .http()
        .get(imgur.api_url("account/me/images"))
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| AppError::Transport(format!("HTTP error fetching user images: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        log::error!("❌ Failed to retrieve images. Status code: {}", status);
        log::error!("   Response body: {}", body);
        return Err(AppError::imgur(Some(status.as_u16()), "Error fetching images"));
    }

    let envelope: ImgurEnvelope<Vec<ImgurImage>> = response
        .json()
        .await
        .map_err(|e| AppError::Transport(format!("Failed to parse images response: {}", e)))?;

    let images = envelope
        .data
        .ok_or_else(|| AppError::imgur(None, "No 'data' field in response"))?;

    log::info!("✅ Retrieved {} images", images.len());
    Ok(images)
}
