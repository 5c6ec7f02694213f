mod memory;

pub use memory::InMemoryUserRepository;

use crate::models::User;
use crate::utils::AppError;
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};

const USERS_COLLECTION: &str = "users";
const DUPLICATE_KEY: i32 = 11000;

/// Persistence for the single `User` entity
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError>;

    /// Fails with `AlreadyExists` when the username is taken
    async fn save(&self, user: User) -> Result<User, AppError>;

    /// Returns false when no user has that username
    async fn push_image_url(&self, username: &str, url: &str) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, AppError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .rsplit('/')
            .next()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty() && !s.contains(':'))
            .unwrap_or("imgur_gateway");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    async fn ensure_indexes(&self) -> Result<(), AppError> {
        log::info!("🔧 Creating database indexes...");

        let users = self.collection::<mongodb::bson::Document>(USERS_COLLECTION);

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match users.create_index(username_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(username) unique"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}

pub struct MongoUserRepository {
    users: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &MongoDB) -> Self {
        Self {
            users: db.collection::<User>(USERS_COLLECTION),
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.find_one(doc! { "username": username }).await?)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        let count = self
            .users
            .count_documents(doc! { "username": username })
            .await?;
        Ok(count > 0)
    }

    async fn save(&self, user: User) -> Result<User, AppError> {
        match self.users.insert_one(&user).await {
            Ok(_) => Ok(user),
            Err(e) if is_duplicate_key(&e) => Err(AppError::AlreadyExists(format!(
                "username '{}' is already registered",
                user.username
            ))),
            Err(e) => Err(e.into()),
        }
    }

    async fn push_image_url(&self, username: &str, url: &str) -> Result<bool, AppError> {
        let result = self
            .users
            .update_one(
                doc! { "username": username },
                doc! { "$push": { "image_urls": url } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }
}
