use std::io;

use actix_identity::IdentityMiddleware;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use config::{Config, Environment, File};
use tera::Tera;

use rango::db::establish_connection_pool;
use rango::models::config::ServerConfig;
use rango::repository::DieselRepository;
use rango::routes::configure;

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(Environment::with_prefix("APP"))
        .build()?
        .try_deserialize()
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let server_config = load_config().map_err(|e| {
        log::error!("Failed to load configuration: {e}");
        io::Error::other(e)
    })?;

    let secret_key = Key::try_from(server_config.secret.as_bytes()).map_err(|e| {
        log::error!("Cookie secret must be at least 64 bytes: {e}");
        io::Error::other(e)
    })?;

    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        log::error!("Failed to establish database connection pool: {e}");
        io::Error::other(e)
    })?;
    let repo = DieselRepository::new(pool);

    let tera = Tera::new(&server_config.templates_dir).map_err(|e| {
        log::error!("Failed to load templates: {e}");
        io::Error::other(e)
    })?;

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let bind_address = (server_config.address.clone(), server_config.port);
    let secure_cookies = server_config.secure_cookies;
    log::info!("Starting Rango on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(secure_cookies)
                    .build(),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .configure(configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
