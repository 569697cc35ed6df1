use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use weight_matcher::config::Settings;
use weight_matcher::core::Matcher;
use weight_matcher::routes::{self, AppState};
use weight_matcher::services::{PostgresStore, Store};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    // Initialize logging; LOG_LEVEL / LOG_FORMAT override the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Weight Matcher service...");

    let store = match &settings.database.url {
        Some(url) => {
            let max_conn = settings.database.max_connections.unwrap_or(10);
            let store = PostgresStore::new(
                url,
                max_conn,
                settings.database.min_connections.unwrap_or(1),
                settings.database.acquire_timeout_secs.unwrap_or(5),
                settings.database.idle_timeout_secs.unwrap_or(600),
            )
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
            })?;

            info!("PostgreSQL store initialized (max: {} connections)", max_conn);
            Store::Postgres(store)
        }
        None => {
            info!("No database configured, keeping entries in memory");
            Store::memory()
        }
    };

    let rules = settings.pairing_rules();
    let matcher = Matcher::new(rules);

    info!("Matcher initialized with rules: {:?}", rules);

    let app_state = AppState {
        store: Arc::new(store),
        matcher,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
