//! Notification queries and read-state management for the recipient.

use std::sync::Arc;

use uuid::Uuid;

use reliefhub_core::error::AppError;
use reliefhub_core::result::AppResult;
use reliefhub_database::store::NotificationStore;
use reliefhub_entity::notification::Notification;

use crate::context::RequestContext;

/// Newest-first cap on the notification listing.
const LIST_LIMIT: i64 = 100;

/// Manages a recipient's own notifications.
#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationStore>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notifications: Arc<dyn NotificationStore>) -> Self {
        Self { notifications }
    }

    /// Lists the caller's notifications, newest first, capped at 100.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Notification>> {
        self.notifications
            .find_recent_by_recipient(ctx.user_id, LIST_LIMIT)
            .await
    }

    /// Counts the caller's unread notifications.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<i64> {
        self.notifications.count_unread(ctx.user_id).await
    }

    /// Marks one of the caller's notifications as read.
    pub async fn mark_read(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Notification> {
        self.notifications
            .mark_read(id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }

    /// Marks all of the caller's notifications as read.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        self.notifications.mark_all_read(ctx.user_id).await
    }

    /// Deletes one of the caller's notifications.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        if !self.notifications.delete(id, ctx.user_id).await? {
            return Err(AppError::not_found("Notification not found"));
        }
        Ok(())
    }
}
