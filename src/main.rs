use std::env;

use actix_cors::Cors;
use actix_web::{http::header, middleware::NormalizePath, web, App, HttpServer};
use fan_store_backend::{
    background_task::start_session_purge_task,
    build_state,
    constants::{DEFAULT_LOG_FILTER, START_TIME},
    graceful_shutdown::shutdown_signal,
    middlewares::auth::AuthMiddleware,
    routes::configure_routes,
    settings::{AppConfig, AuthMode},
};
use once_cell::sync::Lazy;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    // Production logs are shipped as JSON lines
    if env::var("APP_ENV").is_ok_and(|v| v.eq_ignore_ascii_case("production")) {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn build_cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    if origins.iter().any(|origin| origin == "*") {
        cors.allow_any_origin()
    } else {
        origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
            .supports_credentials()
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();
    Lazy::force(&START_TIME);

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        }
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let state = match build_state(&config).await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            tracing::error!("Could not initialise storage: {}", e);
            std::process::exit(1);
        }
    };
    let store = state.store.clone();

    let purge_task = match config.auth_mode() {
        AuthMode::Session => Some(tokio::spawn(start_session_purge_task(store.clone()))),
        AuthMode::Jwt => None,
    };

    let server_addr = format!("{}:{}", config.host, config.port);
    let max_json_payload_bytes = config.max_json_payload_bytes;
    let origins = config.cors_origins();

    tracing::info!(
        "Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(AuthMiddleware)
            .wrap(NormalizePath::trim())
            .wrap(build_cors(&origins))
            .wrap(TracingLogger::default())
            .configure(|cfg| configure_routes(cfg, max_json_payload_bytes))
    })
    .workers(config.worker_count)
    .disable_signals()
    .bind(&server_addr)?
    .run();

    let handle = server.handle();

    tokio::select! {
        res = server => {
            if let Err(e) = res {
                tracing::error!("Server error: {}", e);
            }
        },
        _ = shutdown_signal() => {
            handle.stop(true).await;
        }
    }

    if let Some(task) = purge_task {
        task.abort();
    }
    store.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}
