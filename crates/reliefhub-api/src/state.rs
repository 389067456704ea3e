//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use reliefhub_auth::jwt::JwtDecoder;
use reliefhub_core::config::AppConfig;
use reliefhub_database::store::UserStore;
use reliefhub_realtime::hub::ConnectionHub;
use reliefhub_service::auth::AuthService;
use reliefhub_service::disaster::DisasterService;
use reliefhub_service::notification::NotificationService;
use reliefhub_storage::images::ImageStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,

    /// User store, consulted by the identity resolver on every request.
    pub users: Arc<dyn UserStore>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,

    /// Account management service.
    pub auth_service: Arc<AuthService>,
    /// Disaster lifecycle service.
    pub disaster_service: Arc<DisasterService>,
    /// Notification query service.
    pub notification_service: Arc<NotificationService>,

    /// Report image storage.
    pub image_store: Arc<ImageStore>,
    /// WebSocket connection hub.
    pub hub: Arc<ConnectionHub>,
}
