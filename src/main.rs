//! ReliefHub server — disaster reporting and volunteer coordination.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use reliefhub_api::{AppState, build_router};
use reliefhub_auth::jwt::{JwtDecoder, JwtEncoder};
use reliefhub_auth::password::PasswordHasher;
use reliefhub_core::config::AppConfig;
use reliefhub_core::error::AppError;
use reliefhub_database::memory::{
    MemoryDisasterStore, MemoryNotificationStore, MemoryUserStore,
};
use reliefhub_database::repositories::{
    DisasterRepository, NotificationRepository, UserRepository,
};
use reliefhub_database::store::{DisasterStore, NotificationStore, UserStore};
use reliefhub_realtime::hub::ConnectionHub;
use reliefhub_service::auth::AuthService;
use reliefhub_service::disaster::DisasterService;
use reliefhub_service::notification::{NotificationFanout, NotificationService};
use reliefhub_storage::images::ImageStore;
use reliefhub_storage::local::LocalStorageProvider;

#[tokio::main]
async fn main() {
    let env = std::env::var("RELIEFHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging from configuration (RUST_LOG wins).
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    info!("Starting ReliefHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Stores ───────────────────────────────────────────────────
    let (users, disasters, notifications): (
        Arc<dyn UserStore>,
        Arc<dyn DisasterStore>,
        Arc<dyn NotificationStore>,
    ) = match config.database.backend.as_str() {
        "memory" => {
            warn!("Using in-memory stores; all data is lost at process exit");
            (
                Arc::new(MemoryUserStore::new()),
                Arc::new(MemoryDisasterStore::new()),
                Arc::new(MemoryNotificationStore::new()),
            )
        }
        _ => {
            let pool = reliefhub_database::connection::create_pool(&config.database).await?;
            reliefhub_database::migration::run_migrations(&pool).await?;
            (
                Arc::new(UserRepository::new(pool.clone())),
                Arc::new(DisasterRepository::new(pool.clone())),
                Arc::new(NotificationRepository::new(pool)),
            )
        }
    };

    // ── Image storage ────────────────────────────────────────────
    let provider = Arc::new(LocalStorageProvider::new(&config.storage.root).await?);
    let image_store = Arc::new(ImageStore::new(provider));

    // ── Auth ─────────────────────────────────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    // ── Realtime hub + notification fan-out consumer ─────────────
    let hub = Arc::new(ConnectionHub::new());
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let fanout = Arc::new(NotificationFanout::new(
        Arc::clone(&users),
        Arc::clone(&notifications),
        Arc::clone(&hub),
    ));
    let _fanout_task = fanout.spawn(events_rx);

    // ── Services ─────────────────────────────────────────────────
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&users),
        password_hasher,
        jwt_encoder,
    ));
    let disaster_service = Arc::new(DisasterService::new(
        Arc::clone(&disasters),
        Arc::clone(&notifications),
        events_tx,
    ));
    let notification_service = Arc::new(NotificationService::new(Arc::clone(&notifications)));

    // ── HTTP server ──────────────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        config: Arc::new(config),
        users,
        jwt_decoder,
        auth_service,
        disaster_service,
        notification_service,
        image_store,
        hub,
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server failed: {e}")))
}

/// Resolves when the process receives a shutdown signal.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
