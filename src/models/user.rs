use mongodb::bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};

/// Documento da collection "users"
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub user_id: String,  // PRIMARY IDENTIFIER - ObjectId hex gerado no registro
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub password: String, // bcrypt hash
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<BsonDateTime>,
}

/// What clients get to see of a user: everything but the password hash
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct UserDetails {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub image_urls: Vec<String>,
    pub created_at: Option<String>,
}

impl From<User> for UserDetails {
    fn from(user: User) -> Self {
        UserDetails {
            id: user.user_id,
            firstname: user.firstname,
            lastname: user.lastname,
            username: user.username,
            image_urls: user.image_urls,
            created_at: user
                .created_at
                .and_then(|dt| dt.try_to_rfc3339_string().ok()),
        }
    }
}
