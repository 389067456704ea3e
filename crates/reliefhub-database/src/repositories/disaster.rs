//! Disaster repository implementation.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use reliefhub_core::error::{AppError, ErrorKind};
use reliefhub_core::result::AppResult;
use reliefhub_core::types::pagination::{PageRequest, PageResponse};
use reliefhub_entity::disaster::{
    BoundingBox, Disaster, DisasterFilter, DisasterUpdate, NewDisaster, Note, StatusChange,
    Visibility,
};

use crate::store::DisasterStore;

/// PostgreSQL-backed [`DisasterStore`].
#[derive(Debug, Clone)]
pub struct DisasterRepository {
    pool: PgPool,
}

impl DisasterRepository {
    /// Create a new disaster repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the visibility predicate and caller filters to a query that
/// already ends in a WHERE clause.
fn push_predicates(
    qb: &mut QueryBuilder<'_, Postgres>,
    visibility: &Visibility,
    filter: &DisasterFilter,
) {
    match visibility {
        Visibility::All => {}
        Visibility::ReportedBy(caller) => {
            qb.push(" AND reported_by = ").push_bind(*caller);
        }
        Visibility::PoolOrAssigned(caller) => {
            qb.push(" AND (status = 'pending' OR assigned_to = ")
                .push_bind(*caller)
                .push(")");
        }
    }

    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(disaster_type) = filter.disaster_type {
        qb.push(" AND disaster_type = ").push_bind(disaster_type);
    }
    if let Some(severity) = filter.severity {
        qb.push(" AND severity = ").push_bind(severity);
    }
}

#[async_trait]
impl DisasterStore for DisasterRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Disaster>> {
        sqlx::query_as::<_, Disaster>("SELECT * FROM disasters WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find disaster by id", e)
            })
    }

    async fn create(&self, data: &NewDisaster) -> AppResult<Disaster> {
        sqlx::query_as::<_, Disaster>(
            "INSERT INTO disasters (title, description, disaster_type, severity, address, \
                                    latitude, longitude, images, estimated_casualties, \
                                    estimated_damage, emergency_contacts, reported_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.disaster_type)
        .bind(data.severity)
        .bind(&data.address)
        .bind(data.latitude)
        .bind(data.longitude)
        .bind(Json(&data.images))
        .bind(data.estimated_casualties)
        .bind(data.estimated_damage)
        .bind(Json(&data.emergency_contacts))
        .bind(data.reported_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create disaster", e))
    }

    async fn list(
        &self,
        visibility: &Visibility,
        filter: &DisasterFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Disaster>> {
        let mut count_qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM disasters WHERE TRUE");
        push_predicates(&mut count_qb, visibility, filter);

        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count disasters", e)
            })?;

        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT * FROM disasters WHERE TRUE");
        push_predicates(&mut qb, visibility, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let disasters = qb
            .build_query_as::<Disaster>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list disasters", e)
            })?;

        Ok(PageResponse::new(
            disasters,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn find_in_box(
        &self,
        visibility: &Visibility,
        bbox: &BoundingBox,
    ) -> AppResult<Vec<Disaster>> {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT * FROM disasters WHERE latitude BETWEEN ");
        qb.push_bind(bbox.min_lat)
            .push(" AND ")
            .push_bind(bbox.max_lat)
            .push(" AND longitude BETWEEN ")
            .push_bind(bbox.min_lng)
            .push(" AND ")
            .push_bind(bbox.max_lng);
        push_predicates(&mut qb, visibility, &DisasterFilter::default());
        qb.push(" ORDER BY created_at DESC");

        qb.build_query_as::<Disaster>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to query nearby disasters", e)
            })
    }

    async fn transition_status(
        &self,
        id: Uuid,
        change: &StatusChange,
    ) -> AppResult<Option<Disaster>> {
        // Compare-and-swap on the pending state: when another caller has
        // already transitioned the record, zero rows match and the caller
        // observes the lost race as Ok(None).
        let appended: Vec<&Note> = change.note.iter().collect();

        sqlx::query_as::<_, Disaster>(
            "UPDATE disasters \
                SET status = $2, \
                    assigned_to = COALESCE($3, assigned_to), \
                    resolved_at = COALESCE($4, resolved_at), \
                    notes = notes || $5, \
                    updated_at = NOW() \
              WHERE id = $1 AND status = 'pending' \
              RETURNING *",
        )
        .bind(id)
        .bind(change.status)
        .bind(change.assigned_to)
        .bind(change.resolved_at)
        .bind(Json(&appended))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to transition disaster status", e)
        })
    }

    async fn update_details(
        &self,
        id: Uuid,
        update: &DisasterUpdate,
    ) -> AppResult<Option<Disaster>> {
        sqlx::query_as::<_, Disaster>(
            "UPDATE disasters \
                SET title = COALESCE($2, title), \
                    description = COALESCE($3, description), \
                    severity = COALESCE($4, severity), \
                    updated_at = NOW() \
              WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.severity)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update disaster details", e)
        })
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM disasters WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete disaster", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
