//! In-memory store implementations.
//!
//! Functionally equivalent to the PostgreSQL repositories, used by the
//! integration tests and by the `database.backend = "memory"` demo mode.
//! All data lives in process memory and is lost at exit.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use reliefhub_core::error::AppError;
use reliefhub_core::result::AppResult;
use reliefhub_core::types::pagination::{PageRequest, PageResponse};
use reliefhub_entity::disaster::{
    BoundingBox, Disaster, DisasterFilter, DisasterStatus, DisasterUpdate, NewDisaster,
    StatusChange, Visibility,
};
use reliefhub_entity::notification::{NewNotification, Notification};
use reliefhub_entity::user::{CreateUser, ProfileUpdate, User, UserRole};

use crate::store::{DisasterStore, NotificationStore, UserStore};

/// In-memory [`UserStore`].
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&data.email))
        {
            return Err(AppError::validation("User with this email already exists"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            role: data.role,
            location: data.location.clone(),
            phone: data.phone.clone(),
            skills: data.skills.clone(),
            is_active: true,
            last_login_at: None,
            profile_image: None,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> AppResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if let Some(name) = &update.name {
            user.name = name.clone();
        }
        if let Some(location) = &update.location {
            user.location = location.clone();
        }
        if let Some(phone) = &update.phone {
            user.phone = phone.clone();
        }
        if let Some(skills) = &update.skills {
            user.skills = skills.clone();
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn touch_last_login(&self, id: Uuid) -> AppResult<()> {
        let mut users = self.users.write().await;
        if let Some(user) = users.get_mut(&id) {
            user.last_login_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        user.is_active = active;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn find_active_by_roles(&self, roles: &[UserRole]) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        let mut matched: Vec<User> = users
            .values()
            .filter(|u| u.is_active && roles.contains(&u.role))
            .cloned()
            .collect();
        matched.sort_by_key(|u| u.created_at);
        Ok(matched)
    }

    async fn find_non_admins(&self) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        let mut matched: Vec<User> = users
            .values()
            .filter(|u| u.role != UserRole::Admin)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.users.write().await.remove(&id).is_some())
    }
}

/// In-memory [`DisasterStore`].
#[derive(Debug, Default)]
pub struct MemoryDisasterStore {
    disasters: RwLock<HashMap<Uuid, Disaster>>,
}

impl MemoryDisasterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DisasterStore for MemoryDisasterStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Disaster>> {
        Ok(self.disasters.read().await.get(&id).cloned())
    }

    async fn create(&self, data: &NewDisaster) -> AppResult<Disaster> {
        let now = Utc::now();
        let disaster = Disaster {
            id: Uuid::new_v4(),
            title: data.title.clone(),
            description: data.description.clone(),
            disaster_type: data.disaster_type,
            severity: data.severity,
            address: data.address.clone(),
            latitude: data.latitude,
            longitude: data.longitude,
            status: DisasterStatus::Pending,
            images: data.images.clone(),
            estimated_casualties: data.estimated_casualties,
            estimated_damage: data.estimated_damage,
            emergency_contacts: data.emergency_contacts.clone(),
            notes: vec![],
            reported_by: data.reported_by,
            assigned_to: None,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        };
        self.disasters
            .write()
            .await
            .insert(disaster.id, disaster.clone());
        Ok(disaster)
    }

    async fn list(
        &self,
        visibility: &Visibility,
        filter: &DisasterFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Disaster>> {
        let disasters = self.disasters.read().await;
        let mut matched: Vec<Disaster> = disasters
            .values()
            .filter(|d| visibility.matches(d) && filter.matches(d))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matched.len() as u64;
        let items: Vec<Disaster> = matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn find_in_box(
        &self,
        visibility: &Visibility,
        bbox: &BoundingBox,
    ) -> AppResult<Vec<Disaster>> {
        let disasters = self.disasters.read().await;
        let mut matched: Vec<Disaster> = disasters
            .values()
            .filter(|d| visibility.matches(d) && bbox.contains(d.latitude, d.longitude))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn transition_status(
        &self,
        id: Uuid,
        change: &StatusChange,
    ) -> AppResult<Option<Disaster>> {
        let mut disasters = self.disasters.write().await;
        let Some(disaster) = disasters.get_mut(&id) else {
            return Ok(None);
        };
        // Same compare-and-swap semantics as the SQL `WHERE status = 'pending'`.
        if disaster.status != DisasterStatus::Pending {
            return Ok(None);
        }

        disaster.status = change.status;
        if let Some(assignee) = change.assigned_to {
            disaster.assigned_to = Some(assignee);
        }
        if let Some(resolved_at) = change.resolved_at {
            disaster.resolved_at = Some(resolved_at);
        }
        if let Some(note) = &change.note {
            disaster.notes.push(note.clone());
        }
        disaster.updated_at = Utc::now();
        Ok(Some(disaster.clone()))
    }

    async fn update_details(
        &self,
        id: Uuid,
        update: &DisasterUpdate,
    ) -> AppResult<Option<Disaster>> {
        let mut disasters = self.disasters.write().await;
        let Some(disaster) = disasters.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = &update.title {
            disaster.title = title.clone();
        }
        if let Some(description) = &update.description {
            disaster.description = description.clone();
        }
        if let Some(severity) = update.severity {
            disaster.severity = severity;
        }
        disaster.updated_at = Utc::now();
        Ok(Some(disaster.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.disasters.write().await.remove(&id).is_some())
    }
}

/// In-memory [`NotificationStore`].
#[derive(Debug, Default)]
pub struct MemoryNotificationStore {
    notifications: RwLock<HashMap<Uuid, Notification>>,
}

impl MemoryNotificationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn create(&self, data: &NewNotification) -> AppResult<Notification> {
        let notification = Notification {
            id: Uuid::new_v4(),
            recipient_id: data.recipient_id,
            title: data.title.clone(),
            message: data.message.clone(),
            kind: data.kind,
            is_read: false,
            priority: data.priority,
            action_url: data.action_url.clone(),
            metadata: data.metadata.clone(),
            related_disaster_id: data.related_disaster_id,
            created_at: Utc::now(),
        };
        self.notifications
            .write()
            .await
            .insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn find_recent_by_recipient(
        &self,
        recipient_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<Notification>> {
        let notifications = self.notifications.read().await;
        let mut matched: Vec<Notification> = notifications
            .values()
            .filter(|n| n.recipient_id == recipient_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched.truncate(limit.max(0) as usize);
        Ok(matched)
    }

    async fn count_unread(&self, recipient_id: Uuid) -> AppResult<i64> {
        let notifications = self.notifications.read().await;
        Ok(notifications
            .values()
            .filter(|n| n.recipient_id == recipient_id && !n.is_read)
            .count() as i64)
    }

    async fn mark_read(&self, id: Uuid, recipient_id: Uuid) -> AppResult<Option<Notification>> {
        let mut notifications = self.notifications.write().await;
        match notifications.get_mut(&id) {
            Some(n) if n.recipient_id == recipient_id => {
                n.is_read = true;
                Ok(Some(n.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn mark_all_read(&self, recipient_id: Uuid) -> AppResult<u64> {
        let mut notifications = self.notifications.write().await;
        let mut updated = 0;
        for n in notifications.values_mut() {
            if n.recipient_id == recipient_id && !n.is_read {
                n.is_read = true;
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn delete(&self, id: Uuid, recipient_id: Uuid) -> AppResult<bool> {
        let mut notifications = self.notifications.write().await;
        match notifications.get(&id) {
            Some(n) if n.recipient_id == recipient_id => {
                notifications.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_for_disaster(&self, disaster_id: Uuid) -> AppResult<u64> {
        let mut notifications = self.notifications.write().await;
        let before = notifications.len();
        notifications.retain(|_, n| n.related_disaster_id != Some(disaster_id));
        Ok((before - notifications.len()) as u64)
    }
}
