use actix_web::{App, HttpServer, web};
use tracing::info;
use tracing_subscriber::{Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod auth;
mod config;
mod db;
mod shutdown;

use crate::api::{health::health_config, job::JobService, job::handlers::job_config, validation};
use crate::auth::AuthKeys;
use crate::shutdown::ShutdownCoordinator;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config::Config {
        database_url,
        jwt_secret,
        bind_addr,
        bind_port,
        max_payload_size,
        max_db_connections,
        log_dir,
    } = config::Config::from_env().expect("Failed to load configuration");

    std::fs::create_dir_all(&log_dir).expect("Failed to create logs directory");

    // File-based logging with daily rotation and level separation,
    // plus console output. Files land as logs/info.YYYY-MM-DD.log etc.
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let info_file = tracing_appender::rolling::daily(&log_dir, "info.log");
    let warn_file = tracing_appender::rolling::daily(&log_dir, "warn.log");
    let error_file = tracing_appender::rolling::daily(&log_dir, "error.log");

    let info_layer = tracing_subscriber::fmt::layer()
        .with_writer(info_file)
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);

    let warn_layer = tracing_subscriber::fmt::layer()
        .with_writer(warn_file)
        .with_ansi(false)
        .with_filter(LevelFilter::WARN);

    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(error_file)
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(info_layer)
        .with(warn_layer)
        .with(error_layer)
        .init();

    info!("Starting jobtrack-api");
    info!("  - Max payload size: {} bytes", max_payload_size);
    info!("  - Max database connections: {}", max_db_connections);

    let pool = db::connection::get_connection(&database_url, max_db_connections)
        .await
        .expect("Failed to connect to database");
    info!("Database connection pool established");

    // Auto-migrate on startup
    db::migrations::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let auth_keys = web::Data::new(AuthKeys::from_secret(&jwt_secret));
    let server_pool = pool.clone();

    let server = HttpServer::new(move || {
        let job_service = web::Data::new(JobService::new(server_pool.clone()));

        let payload_config = web::PayloadConfig::default().limit(max_payload_size);

        App::new()
            .app_data(web::Data::new(server_pool.clone())) // Share DB pool across workers
            .app_data(job_service)
            .app_data(auth_keys.clone())
            .app_data(payload_config)
            .app_data(validation::json_config()) // Global validation config
            .configure(health_config)
            .configure(job_config)
    });

    info!("Server starting on http://{}:{}", bind_addr, bind_port);

    let server = server.bind((bind_addr.as_str(), bind_port))?.run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, pool)
        .wait_for_shutdown()
        .await
}
