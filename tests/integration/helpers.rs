//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tokio::sync::{Mutex, mpsc};
use tower::ServiceExt;
use uuid::Uuid;

use reliefhub_api::{AppState, build_router};
use reliefhub_auth::jwt::{JwtDecoder, JwtEncoder};
use reliefhub_auth::password::PasswordHasher;
use reliefhub_core::config::AppConfig;
use reliefhub_core::events::DisasterEvent;
use reliefhub_database::memory::{
    MemoryDisasterStore, MemoryNotificationStore, MemoryUserStore,
};
use reliefhub_database::store::{DisasterStore, NotificationStore, UserStore};
use reliefhub_entity::user::{CreateUser, UserRole};
use reliefhub_realtime::hub::ConnectionHub;
use reliefhub_service::auth::AuthService;
use reliefhub_service::disaster::DisasterService;
use reliefhub_service::notification::{NotificationFanout, NotificationService};
use reliefhub_storage::images::ImageStore;
use reliefhub_storage::local::LocalStorageProvider;

/// Password used for every test account.
pub const TEST_PASSWORD: &str = "password123";

/// A decoded response: status plus parsed JSON body.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Test application over the in-memory stores.
///
/// The fan-out consumer task is *not* spawned; tests call
/// [`TestApp::drain_events`] to run pending fan-outs deterministically.
pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryUserStore>,
    pub hub: Arc<ConnectionHub>,
    fanout: Arc<NotificationFanout>,
    events_rx: Mutex<mpsc::UnboundedReceiver<DisasterEvent>>,
    hasher: PasswordHasher,
}

impl TestApp {
    /// Build a fully wired application with empty stores.
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.storage.root = std::env::temp_dir()
            .join(format!("reliefhub-it-{}", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned();

        let users = Arc::new(MemoryUserStore::new());
        let disasters = Arc::new(MemoryDisasterStore::new());
        let notifications = Arc::new(MemoryNotificationStore::new());

        let users_dyn: Arc<dyn UserStore> = users.clone();
        let disasters_dyn: Arc<dyn DisasterStore> = disasters.clone();
        let notifications_dyn: Arc<dyn NotificationStore> = notifications.clone();

        let provider = Arc::new(
            LocalStorageProvider::new(&config.storage.root)
                .await
                .expect("storage root"),
        );
        let image_store = Arc::new(ImageStore::new(provider));

        let password_hasher = Arc::new(PasswordHasher::new());
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let hub = Arc::new(ConnectionHub::new());
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let fanout = Arc::new(NotificationFanout::new(
            Arc::clone(&users_dyn),
            Arc::clone(&notifications_dyn),
            Arc::clone(&hub),
        ));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&users_dyn),
            password_hasher,
            jwt_encoder,
        ));
        let disaster_service = Arc::new(DisasterService::new(
            Arc::clone(&disasters_dyn),
            Arc::clone(&notifications_dyn),
            events_tx,
        ));
        let notification_service = Arc::new(NotificationService::new(notifications_dyn));

        let state = AppState {
            config: Arc::new(config),
            users: users_dyn,
            jwt_decoder,
            auth_service,
            disaster_service,
            notification_service,
            image_store,
            hub: Arc::clone(&hub),
        };

        Self {
            router: build_router(state),
            users,
            hub,
            fanout,
            events_rx: Mutex::new(events_rx),
            hasher: PasswordHasher::new(),
        }
    }

    /// Run every pending lifecycle event through the fan-out consumer.
    pub async fn drain_events(&self) {
        let mut rx = self.events_rx.lock().await;
        while let Ok(event) = rx.try_recv() {
            self.fanout.handle_event(&event).await;
        }
    }

    /// Issue one request against the router.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router response");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Register an account through the API, returning its token and ID.
    pub async fn register(&self, name: &str, email: &str, role: &str) -> (String, Uuid) {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": TEST_PASSWORD,
                    "role": role,
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

        let token = response.body["token"].as_str().expect("token").to_string();
        let id = response.body["user"]["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("user id");
        (token, id)
    }

    /// Seed an admin account directly in the store (admins cannot
    /// self-register), returning its token via login.
    pub async fn create_admin(&self, name: &str, email: &str) -> (String, Uuid) {
        let password_hash = self.hasher.hash_password(TEST_PASSWORD).expect("hash");
        let admin = self
            .users
            .create(&CreateUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
                role: UserRole::Admin,
                location: String::new(),
                phone: String::new(),
                skills: vec![],
            })
            .await
            .expect("admin");

        (self.login(email).await, admin.id)
    }

    /// Log in through the API, returning the token.
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "email": email,
                    "password": TEST_PASSWORD,
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["token"].as_str().expect("token").to_string()
    }

    /// Create a valid disaster report through the API, returning its ID.
    pub async fn create_disaster(&self, token: &str, title: &str) -> Uuid {
        let response = self
            .request("POST", "/api/disasters", Some(disaster_payload(title)), Some(token))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["disaster"]["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("disaster id")
    }
}

/// A valid JSON creation payload.
pub fn disaster_payload(title: &str) -> Value {
    serde_json::json!({
        "title": title,
        "description": "Water level rising fast near the old bridge",
        "type": "flood",
        "severity": "high",
        "location": {
            "address": "12 Bridge St",
            "coordinates": { "lat": 48.2, "lng": 16.37 }
        }
    })
}
