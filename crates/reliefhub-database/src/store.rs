//! Capability interfaces over persistence.
//!
//! The disaster lifecycle and notification fan-out depend only on these
//! traits, never on a concrete persistence technology. Two implementations
//! exist: the PostgreSQL repositories in [`crate::repositories`] and the
//! in-memory stores in [`crate::memory`].

use async_trait::async_trait;
use uuid::Uuid;

use reliefhub_core::result::AppResult;
use reliefhub_core::types::pagination::{PageRequest, PageResponse};
use reliefhub_entity::disaster::{
    BoundingBox, Disaster, DisasterFilter, DisasterUpdate, NewDisaster, StatusChange, Visibility,
};
use reliefhub_entity::notification::{NewNotification, Notification};
use reliefhub_entity::user::{CreateUser, ProfileUpdate, User, UserRole};

/// Store for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user. Fails with a validation error when the email is
    /// already registered.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Apply a partial profile update and return the updated user.
    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> AppResult<User>;

    /// Replace a user's password hash.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()>;

    /// Record a successful login.
    async fn touch_last_login(&self, id: Uuid) -> AppResult<()>;

    /// Soft-(de)activate an account. A deactivated account keeps its data
    /// but can no longer authenticate and drops out of fan-out recipient
    /// sets.
    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<User>;

    /// List all active users holding any of the given roles.
    async fn find_active_by_roles(&self, roles: &[UserRole]) -> AppResult<Vec<User>>;

    /// List every non-admin user, newest first.
    async fn find_non_admins(&self) -> AppResult<Vec<User>>;

    /// Delete a user by ID. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Store for disaster reports.
#[async_trait]
pub trait DisasterStore: Send + Sync + 'static {
    /// Find a disaster by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Disaster>>;

    /// Persist a new report with status `pending`.
    async fn create(&self, data: &NewDisaster) -> AppResult<Disaster>;

    /// List reports visible to the caller, newest first, with conjunctive
    /// caller filters and pagination.
    async fn list(
        &self,
        visibility: &Visibility,
        filter: &DisasterFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Disaster>>;

    /// List visible reports whose coordinates fall inside the box, newest
    /// first.
    async fn find_in_box(
        &self,
        visibility: &Visibility,
        bbox: &BoundingBox,
    ) -> AppResult<Vec<Disaster>>;

    /// Atomically transition a *pending* report. Returns `Ok(None)` when no
    /// pending row matched the ID — either the record is gone or another
    /// caller transitioned it first (the compare-and-swap lost).
    async fn transition_status(
        &self,
        id: Uuid,
        change: &StatusChange,
    ) -> AppResult<Option<Disaster>>;

    /// Apply a partial details update. Returns `Ok(None)` when the record
    /// does not exist.
    async fn update_details(
        &self,
        id: Uuid,
        update: &DisasterUpdate,
    ) -> AppResult<Option<Disaster>>;

    /// Delete a report by ID. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Store for notifications.
#[async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    /// Persist one notification row.
    async fn create(&self, data: &NewNotification) -> AppResult<Notification>;

    /// List a recipient's notifications, newest first, capped at `limit`.
    async fn find_recent_by_recipient(
        &self,
        recipient_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<Notification>>;

    /// Count a recipient's unread notifications.
    async fn count_unread(&self, recipient_id: Uuid) -> AppResult<i64>;

    /// Mark one of the recipient's notifications as read. Returns `Ok(None)`
    /// when the notification does not exist or belongs to someone else.
    async fn mark_read(&self, id: Uuid, recipient_id: Uuid) -> AppResult<Option<Notification>>;

    /// Mark all of the recipient's notifications as read. Returns the number
    /// of rows updated.
    async fn mark_all_read(&self, recipient_id: Uuid) -> AppResult<u64>;

    /// Delete one of the recipient's notifications. Returns `true` if a row
    /// was removed.
    async fn delete(&self, id: Uuid, recipient_id: Uuid) -> AppResult<bool>;

    /// Delete every notification referencing a disaster. Returns the number
    /// of rows removed.
    async fn delete_for_disaster(&self, disaster_id: Uuid) -> AppResult<u64>;
}
