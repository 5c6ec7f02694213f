use crate::database::UserRepository;
use crate::models::User;
use crate::utils::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};

// User registration
pub async fn register_user(
    repo: &dyn UserRepository,
    firstname: &str,
    lastname: &str,
    username: &str,
    password: &str,
) -> Result<User, AppError> {
    log::info!("📝 Registering user: {}", username);

    // bcrypt is CPU bound, keep it off the actix worker
    let plain = password.to_string();
    let hashed_password = tokio::task::spawn_blocking(move || hash(plain, DEFAULT_COST))
        .await
        .map_err(|e| AppError::Hashing(format!("hashing task failed: {}", e)))??;

    let new_user = User {
        user_id: ObjectId::new().to_hex(),
        firstname: firstname.to_string(),
        lastname: lastname.to_string(),
        username: username.to_string(),
        password: hashed_password,
        image_urls: Vec::new(),
        created_at: Some(BsonDateTime::now()),
    };

    let saved = repo.save(new_user).await?;

    log::info!("✅ User registered successfully: {}", username);
    Ok(saved)
}

pub async fn is_user_already_registered(
    repo: &dyn UserRepository,
    username: &str,
) -> Result<bool, AppError> {
    repo.exists_by_username(username).await
}

/// Returns the user only when the username exists and the password matches its hash
pub async fn authenticate_user(
    repo: &dyn UserRepository,
    username: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let user = match repo.find_by_username(username).await? {
        Some(user) => user,
        None => {
            log::warn!("⚠️ Unknown user: {}", username);
            return Ok(None);
        }
    };

    let plain = password.to_string();
    let stored = user.password.clone();
    let verified = tokio::task::spawn_blocking(move || verify(plain, &stored))
        .await
        .map_err(|e| AppError::Hashing(format!("verification task failed: {}", e)))?;

    // A hash bcrypt can't parse is treated as a mismatch
    match verified {
        Ok(true) => {
            log::info!("✅ Credentials match for {}", username);
            Ok(Some(user))
        }
        Ok(false) => {
            log::warn!("⚠️ Credentials do not match for {}", username);
            Ok(None)
        }
        Err(e) => {
            log::error!("❌ Stored password hash for {} is unusable: {}", username, e);
            Ok(None)
        }
    }
}

pub async fn get_user_info(
    repo: &dyn UserRepository,
    username: &str,
) -> Result<Option<User>, AppError> {
    repo.find_by_username(username).await
}

/// Appends an uploaded image link to the user's history
pub async fn record_image_url(
    repo: &dyn UserRepository,
    username: &str,
    url: &str,
) -> Result<bool, AppError> {
    let recorded = repo.push_image_url(username, url).await?;
    if recorded {
        log::info!("🖼️  Image {} recorded for {}", url, username);
    } else {
        log::warn!("⚠️ Cannot record image for unknown user {}", username);
    }
    Ok(recorded)
}
