use actix_files::Files;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use tera::Tera;

use pushkind_listings::config::ServerConfig;
use pushkind_listings::repository::InMemoryRepository;
use pushkind_listings::routes::api::api_v1_draft;
use pushkind_listings::routes::drafts::{
    add_variant, leave_draft, publish_draft, remove_variant, save_draft, show_draft,
    update_draft, upload_document, upload_image,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ServerConfig::from_env();

    let secret_key = match config.secret.as_deref().map(|secret| Key::try_from(secret.as_bytes())) {
        Some(Ok(key)) => key,
        Some(Err(e)) => {
            log::error!("SECRET_KEY is unusable: {e:?}");
            std::process::exit(1);
        }
        None => {
            log::warn!("SECRET_KEY is not set, sessions will not survive a restart");
            Key::generate()
        }
    };

    let repo = InMemoryRepository::with_limits(config.draft_idle_ttl, config.max_drafts);

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    let address = config.address.clone();
    let port = config.port;
    let domain = config.domain.clone();

    log::info!("Listening on {address}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(domain.clone()))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(show_draft)
            .service(update_draft)
            .service(add_variant)
            .service(remove_variant)
            .service(publish_draft)
            .service(save_draft)
            .service(upload_image)
            .service(upload_document)
            .service(leave_draft)
            .service(api_v1_draft)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(config.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
