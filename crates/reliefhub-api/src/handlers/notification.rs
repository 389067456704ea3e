//! Notification handlers — the recipient's own rows only.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use reliefhub_core::error::AppError;

use crate::dto::response::{
    MessageResponse, NotificationResponse, NotificationsResponse, UnreadCountResponse,
};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/notifications
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<NotificationsResponse>, AppError> {
    let notifications = state.notification_service.list(&auth).await?;
    Ok(Json(NotificationsResponse {
        success: true,
        count: notifications.len(),
        notifications,
    }))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UnreadCountResponse>, AppError> {
    let count = state.notification_service.unread_count(&auth).await?;
    Ok(Json(UnreadCountResponse {
        success: true,
        count,
    }))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationResponse>, AppError> {
    let notification = state.notification_service.mark_read(&auth, id).await?;
    Ok(Json(NotificationResponse {
        success: true,
        notification,
    }))
}

/// PUT /api/notifications/mark-all-read
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    state.notification_service.mark_all_read(&auth).await?;
    Ok(Json(MessageResponse::new(
        "All notifications marked as read",
    )))
}

/// DELETE /api/notifications/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state.notification_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("Notification deleted")))
}
