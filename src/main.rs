use std::io;

use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use tera::Tera;

use inventory_catalog::db::{establish_connection_pool, run_migrations};
use inventory_catalog::models::config::ServerConfig;
use inventory_catalog::repository::DieselRepository;
use inventory_catalog::routes;

fn other_error(message: String) -> io::Error {
    log::error!("{message}");
    io::Error::other(message)
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = ServerConfig::load().map_err(|e| other_error(e.to_string()))?;

    let pool = establish_connection_pool(&server_config.database_url)
        .map_err(|e| other_error(format!("Failed to establish database connection: {e}")))?;
    {
        let mut conn = pool
            .get()
            .map_err(|e| other_error(format!("Failed to get database connection: {e}")))?;
        run_migrations(&mut conn)
            .map_err(|e| other_error(format!("Failed to run migrations: {e}")))?;
    }
    let repo = DieselRepository::new(pool);

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| other_error(format!("Template parsing error(s): {e}")))?;

    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| other_error(format!("Invalid secret key: {e}")))?;
    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Starting catalog server on {}:{}",
        bind_address.0,
        bind_address.1
    );

    let assets_dir = server_config.assets_dir.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(Logger::default())
            .service(Files::new("/assets", &assets_dir))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(tera.clone()))
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
