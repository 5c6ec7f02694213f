mod api;
mod config;
mod database;
mod imgur;
mod middleware;
mod models;
mod services;
mod state;
mod utils;

#[cfg(test)]
mod test_support;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::database::{InMemoryUserRepository, MongoDB, MongoUserRepository, UserRepository};
use crate::imgur::ImgurClient;
use crate::state::AppState;

fn to_io(e: utils::AppError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Configuration (.env + environment)
    let config = AppConfig::from_env().map_err(|e| {
        log::error!("❌ {}", e);
        to_io(e)
    })?;

    log::info!("🚀 Starting Imgur Gateway...");

    let users: Arc<dyn UserRepository> = match config.database_url.as_deref() {
        Some(database_url) => {
            let db = MongoDB::new(database_url).await.map_err(|e| {
                log::error!("❌ Failed to connect to MongoDB: {}", e);
                to_io(e)
            })?;
            log::info!("✅ MongoDB connected successfully");
            Arc::new(MongoUserRepository::new(&db))
        }
        None => {
            log::warn!("⚠️  DATABASE_URL not set, users are kept in memory and lost on restart");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    let imgur = ImgurClient::new(&config.imgur).map_err(to_io)?;
    let state = web::Data::new(AppState::new(users, imgur));

    let host = config.host.clone();
    let port = config.port;
    let cors_origins = config.cors_origins.clone();

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
