use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, middleware, web};

use supplier_intake::db::establish_connection_pool;
use supplier_intake::models::config::{ServerConfig, StorageConfig};
use supplier_intake::notify::{EmailNotifier, SmtpMailer, SupplierNotifier};
use supplier_intake::rate_limit::InMemoryRateLimiter;
use supplier_intake::repository::DieselRepository;
use supplier_intake::routes;
use supplier_intake::storage::{LocalStorage, ObjectStorage, S3Storage};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = ServerConfig::load().map_err(std::io::Error::other)?;

    let pool = establish_connection_pool(&config.database_url).map_err(std::io::Error::other)?;
    let repo = web::Data::new(DieselRepository::new(pool));

    let storage: Arc<dyn ObjectStorage> = match &config.storage {
        StorageConfig::S3 {
            bucket,
            region,
            endpoint_url,
        } => Arc::new(S3Storage::new(bucket.clone(), region.clone(), endpoint_url.clone()).await),
        StorageConfig::Local {
            base_path,
            base_url,
        } => Arc::new(
            LocalStorage::new(base_path, base_url.clone())
                .await
                .map_err(std::io::Error::other)?,
        ),
    };
    let storage = web::Data::from(storage);

    let mailer = SmtpMailer::from_config(&config.smtp, &config.notifications.from)
        .map_err(std::io::Error::other)?;
    let notifier: Arc<dyn SupplierNotifier> = Arc::new(
        EmailNotifier::new(
            Arc::new(mailer),
            config.notifications.internal_recipients.clone(),
        )
        .map_err(std::io::Error::other)?,
    );
    let notifier = web::Data::from(notifier);

    let limiter = web::Data::new(InMemoryRateLimiter::new(
        config.rate_limit.max_submissions,
        Duration::from_secs(config.rate_limit.window_secs),
    ));

    let bind_address = config.bind_address.clone();
    log::info!("Starting supplier intake service on {bind_address}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(routes::cors_headers())
            .app_data(repo.clone())
            .app_data(storage.clone())
            .app_data(notifier.clone())
            .app_data(limiter.clone())
            .app_data(routes::json_config())
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
