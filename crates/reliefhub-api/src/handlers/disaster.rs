//! Disaster handlers — listing, nearby search, creation (JSON or
//! multipart with images), status transitions, edits, and deletion.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{FromRequest, Multipart, Path, Query, Request, State};
use axum::http::{StatusCode, header};
use bytes::Bytes;
use uuid::Uuid;

use reliefhub_core::error::AppError;
use reliefhub_core::types::pagination::PageRequest;
use reliefhub_entity::disaster::{DisasterFilter, DisasterUpdate, NewDisaster};
use reliefhub_storage::images::{MAX_IMAGES_PER_REPORT, validate_upload};

use crate::dto::request::{
    CoordinatesPayload, CreateDisasterRequest, DisasterListQuery, LocationPayload, NearbyQuery,
    UpdateDisasterRequest, UpdateStatusRequest,
};
use crate::dto::response::{
    DisasterListResponse, DisasterResponse, MessageResponse, NearbyResponse,
};
use crate::dto::validation;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// Default nearby radius in meters.
const DEFAULT_NEARBY_DISTANCE_M: f64 = 10_000.0;

/// GET /api/disasters
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DisasterListQuery>,
) -> Result<Json<DisasterListResponse>, AppError> {
    let filter = DisasterFilter {
        status: query.status,
        disaster_type: query.disaster_type,
        severity: query.severity,
    };
    let page = PageRequest::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));

    let result = state.disaster_service.list(&auth, &filter, &page).await?;

    Ok(Json(DisasterListResponse {
        success: true,
        count: result.items.len(),
        total: result.total_items,
        page: result.page,
        pages: result.total_pages,
        disasters: result.items,
    }))
}

/// GET /api/disasters/nearby
pub async fn nearby(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<NearbyResponse>, AppError> {
    validation::validate(&query)?;

    let distance = query.distance.unwrap_or(DEFAULT_NEARBY_DISTANCE_M);
    let disasters = state
        .disaster_service
        .nearby(&auth, query.lat, query.lng, distance)
        .await?;

    Ok(Json(NearbyResponse {
        success: true,
        count: disasters.len(),
        disasters,
    }))
}

/// GET /api/disasters/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DisasterResponse>, AppError> {
    let disaster = state.disaster_service.get(&auth, id).await?;
    Ok(Json(DisasterResponse {
        success: true,
        disaster,
    }))
}

/// POST /api/disasters
///
/// Accepts either a JSON body or `multipart/form-data` with the same
/// fields (dotted names) plus up to 5 `images` parts. Every validation
/// runs before any image is written or any row is persisted.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    request: Request,
) -> Result<(StatusCode, Json<DisasterResponse>), AppError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let (payload, image_parts) = if is_multipart {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?;
        collect_multipart(multipart).await?
    } else {
        let Json(req) = Json::<CreateDisasterRequest>::from_request(request, &state)
            .await
            .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;
        (req, Vec::new())
    };

    validation::validate(&payload)?;
    for part in &image_parts {
        validate_upload(part.content_type.as_deref(), part.data.len())?;
    }

    let mut images = Vec::with_capacity(image_parts.len());
    for part in image_parts {
        let stored = state
            .image_store
            .save(
                part.file_name.as_deref(),
                part.content_type.as_deref(),
                part.data,
            )
            .await?;
        images.push(stored);
    }

    let disaster = state
        .disaster_service
        .create(
            &auth,
            NewDisaster {
                title: payload.title,
                description: payload.description,
                disaster_type: payload.disaster_type,
                severity: payload.severity,
                address: payload.location.address,
                latitude: payload.location.coordinates.lat,
                longitude: payload.location.coordinates.lng,
                images,
                estimated_casualties: payload.estimated_casualties,
                estimated_damage: payload.estimated_damage,
                emergency_contacts: payload.emergency_contacts,
                reported_by: auth.user_id,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DisasterResponse {
            success: true,
            disaster,
        }),
    ))
}

/// PUT /api/disasters/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> Result<Json<DisasterResponse>, AppError> {
    let notes = req.notes.filter(|n| !n.trim().is_empty());
    let disaster = state
        .disaster_service
        .update_status(&auth, id, req.status, notes)
        .await?;

    Ok(Json(DisasterResponse {
        success: true,
        disaster,
    }))
}

/// PUT /api/disasters/{id}
pub async fn update_details(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<UpdateDisasterRequest>,
) -> Result<Json<DisasterResponse>, AppError> {
    validation::validate(&req)?;

    let disaster = state
        .disaster_service
        .update_details(
            &auth,
            id,
            DisasterUpdate {
                title: req.title,
                description: req.description,
                severity: req.severity,
            },
        )
        .await?;

    Ok(Json(DisasterResponse {
        success: true,
        disaster,
    }))
}

/// DELETE /api/disasters/{id} (admin)
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state.disaster_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("Disaster deleted successfully")))
}

/// One uploaded image part, buffered before validation.
struct ImagePart {
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

/// Drain a multipart body into form fields and buffered image parts.
async fn collect_multipart(
    mut multipart: Multipart,
) -> Result<(CreateDisasterRequest, Vec<ImagePart>), AppError> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut images: Vec<ImagePart> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "images" {
            if images.len() >= MAX_IMAGES_PER_REPORT {
                return Err(AppError::validation("Too many files. Maximum is 5 files"));
            }
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Failed to read upload: {e}")))?;
            images.push(ImagePart {
                file_name,
                content_type,
                data,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::validation(format!("Failed to read field '{name}': {e}")))?;
            fields.insert(name, value);
        }
    }

    Ok((request_from_fields(&fields)?, images))
}

/// Assemble the creation DTO from flat multipart fields (dotted names
/// mirror the JSON paths).
fn request_from_fields(fields: &HashMap<String, String>) -> Result<CreateDisasterRequest, AppError> {
    let get = |key: &str| -> Result<String, AppError> {
        fields
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::validation(format!("'{key}' is required")))
    };
    let get_f64 = |key: &str| -> Result<f64, AppError> {
        get(key)?
            .parse()
            .map_err(|_| AppError::validation(format!("'{key}' must be a number")))
    };

    Ok(CreateDisasterRequest {
        title: get("title")?,
        description: get("description")?,
        disaster_type: get("type")?.parse()?,
        severity: get("severity")?.parse()?,
        location: LocationPayload {
            address: get("location.address")?,
            coordinates: CoordinatesPayload {
                lat: get_f64("location.coordinates.lat")?,
                lng: get_f64("location.coordinates.lng")?,
            },
        },
        estimated_casualties: fields
            .get("estimatedCasualties")
            .map(|v| {
                v.parse().map_err(|_| {
                    AppError::validation("'estimatedCasualties' must be an integer")
                })
            })
            .transpose()?,
        estimated_damage: fields
            .get("estimatedDamage")
            .map(|v| v.parse())
            .transpose()?,
        emergency_contacts: Vec::new(),
    })
}
