//! Disaster lifecycle operations: create, read, transition, edit, delete.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use reliefhub_auth::policy::{self, DisasterAction, Relation};
use reliefhub_core::error::AppError;
use reliefhub_core::events::DisasterEvent;
use reliefhub_core::result::AppResult;
use reliefhub_core::types::pagination::{PageRequest, PageResponse};
use reliefhub_database::store::{DisasterStore, NotificationStore};
use reliefhub_entity::disaster::{
    BoundingBox, Disaster, DisasterFilter, DisasterStatus, DisasterUpdate, NewDisaster, Note,
    StatusChange, Visibility,
};
use reliefhub_entity::user::UserRole;

use crate::context::RequestContext;

/// Smallest accepted nearby radius in meters.
const MIN_NEARBY_DISTANCE_M: f64 = 1_000.0;
/// Largest accepted nearby radius in meters.
const MAX_NEARBY_DISTANCE_M: f64 = 50_000.0;

/// Owns the disaster record state machine and read paths.
#[derive(Clone)]
pub struct DisasterService {
    disasters: Arc<dyn DisasterStore>,
    notifications: Arc<dyn NotificationStore>,
    events: mpsc::UnboundedSender<DisasterEvent>,
}

impl DisasterService {
    /// Creates a new disaster service.
    pub fn new(
        disasters: Arc<dyn DisasterStore>,
        notifications: Arc<dyn NotificationStore>,
        events: mpsc::UnboundedSender<DisasterEvent>,
    ) -> Self {
        Self {
            disasters,
            notifications,
            events,
        }
    }

    /// Persists a new report with status `pending` and emits the
    /// `Created` event for the notification fan-out.
    pub async fn create(&self, ctx: &RequestContext, data: NewDisaster) -> AppResult<Disaster> {
        debug_assert_eq!(data.reported_by, ctx.user_id);

        let disaster = self.disasters.create(&data).await?;

        info!(
            disaster_id = %disaster.id,
            reported_by = %disaster.reported_by,
            severity = %disaster.severity,
            "Disaster reported"
        );

        self.emit(DisasterEvent::Created {
            disaster_id: disaster.id,
            title: disaster.title.clone(),
            disaster_type: disaster.disaster_type.to_string(),
            reported_by: disaster.reported_by,
        });

        Ok(disaster)
    }

    /// Fetches a single record. A record that exists but is outside the
    /// caller's visibility is reported as not found.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Disaster> {
        let disaster = self
            .disasters
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Disaster not found"))?;

        let visibility = Visibility::for_caller(ctx.role, ctx.user_id);
        if !visibility.matches(&disaster) {
            return Err(AppError::not_found("Disaster not found"));
        }

        Ok(disaster)
    }

    /// Lists records visible to the caller, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &DisasterFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Disaster>> {
        let visibility = Visibility::for_caller(ctx.role, ctx.user_id);
        self.disasters.list(&visibility, filter, page).await
    }

    /// Lists visible records within a bounding box around the query point.
    ///
    /// The radius is clamped to [1 km, 50 km] and defaults at the API
    /// layer to 10 km.
    pub async fn nearby(
        &self,
        ctx: &RequestContext,
        lat: f64,
        lng: f64,
        distance_m: f64,
    ) -> AppResult<Vec<Disaster>> {
        let distance = distance_m.clamp(MIN_NEARBY_DISTANCE_M, MAX_NEARBY_DISTANCE_M);
        let bbox = BoundingBox::around(lat, lng, distance);
        let visibility = Visibility::for_caller(ctx.role, ctx.user_id);
        self.disasters.find_in_box(&visibility, &bbox).await
    }

    /// Transitions a pending record's status.
    ///
    /// An acceptance by a volunteer records the assignment; a resolution
    /// records the resolution time; a supplied note is appended. The write
    /// is a compare-and-swap on the pending state, so of two racing
    /// volunteers exactly one wins and the other observes a conflict.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        new_status: DisasterStatus,
        note_text: Option<String>,
    ) -> AppResult<Disaster> {
        let current = self
            .disasters
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Disaster not found"))?;

        policy::authorize_disaster(
            DisasterAction::UpdateStatus,
            ctx.role,
            Relation::of(ctx.user_id, current.reported_by),
        )?;

        if !current.status.can_transition_to(new_status) {
            return Err(AppError::conflict(format!(
                "Disaster is already {}",
                current.status
            )));
        }

        let change = StatusChange {
            status: new_status,
            assigned_to: (new_status == DisasterStatus::Accepted
                && ctx.role == UserRole::Volunteer)
                .then_some(ctx.user_id),
            resolved_at: (new_status == DisasterStatus::Resolved).then(Utc::now),
            note: note_text.map(|text| Note {
                text,
                author_id: ctx.user_id,
                added_at: Utc::now(),
            }),
        };

        let Some(disaster) = self.disasters.transition_status(id, &change).await? else {
            // No pending row matched: either the record vanished, or a
            // concurrent caller won the compare-and-swap.
            return match self.disasters.find_by_id(id).await? {
                None => Err(AppError::not_found("Disaster not found")),
                Some(d) => Err(AppError::conflict(format!("Disaster is already {}", d.status))),
            };
        };

        info!(
            disaster_id = %disaster.id,
            status = %disaster.status,
            changed_by = %ctx.user_id,
            "Disaster status updated"
        );

        self.emit(DisasterEvent::StatusChanged {
            disaster_id: disaster.id,
            title: disaster.title.clone(),
            status: disaster.status.to_string(),
            reported_by: disaster.reported_by,
            changed_by: ctx.user_id,
        });

        Ok(disaster)
    }

    /// Applies a partial merge of the editable detail fields. No
    /// notification side effect.
    pub async fn update_details(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        update: DisasterUpdate,
    ) -> AppResult<Disaster> {
        let current = self
            .disasters
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Disaster not found"))?;

        policy::authorize_disaster(
            DisasterAction::EditDetails,
            ctx.role,
            Relation::of(ctx.user_id, current.reported_by),
        )?;

        self.disasters
            .update_details(id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("Disaster not found"))
    }

    /// Removes a record and its notifications. Admin only.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        policy::authorize_disaster(DisasterAction::Delete, ctx.role, Relation::None)?;

        if !self.disasters.delete(id).await? {
            return Err(AppError::not_found("Disaster not found"));
        }

        let removed = self.notifications.delete_for_disaster(id).await?;
        info!(
            disaster_id = %id,
            deleted_by = %ctx.user_id,
            notifications_removed = removed,
            "Disaster deleted"
        );
        Ok(())
    }

    /// Hand an event to the fan-out consumer. The request must never fail
    /// because the consumer is gone.
    fn emit(&self, event: DisasterEvent) {
        if self.events.send(event).is_err() {
            warn!("Notification fan-out consumer is not running; event dropped");
        }
    }
}
