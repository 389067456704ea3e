//! Auth handlers — register, login, profile, password, admin account
//! management.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use reliefhub_core::error::AppError;
use reliefhub_entity::user::ProfileUpdate;
use reliefhub_service::auth::Registration;

use crate::dto::request::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest,
};
use crate::dto::response::{AuthResponse, MessageResponse, UserResponse, UsersResponse};
use crate::dto::validation;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    validation::validate(&req)?;

    let (token, user) = state
        .auth_service
        .register(Registration {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
            location: req.location.unwrap_or_default(),
            phone: req.phone.unwrap_or_default(),
            skills: req.skills.unwrap_or_default(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            token,
            user: user.into(),
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    validation::validate(&req)?;

    let (token, user) = state.auth_service.login(&req.email, &req.password).await?;

    Ok(Json(AuthResponse {
        success: true,
        token,
        user: user.into(),
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.auth_service.get_profile(&auth).await?;
    Ok(Json(UserResponse {
        success: true,
        user: user.into(),
    }))
}

/// PUT /api/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, AppError> {
    validation::validate(&req)?;

    let user = state
        .auth_service
        .update_profile(
            &auth,
            ProfileUpdate {
                name: req.name,
                location: req.location,
                phone: req.phone,
                skills: req.skills,
            },
        )
        .await?;

    Ok(Json(UserResponse {
        success: true,
        user: user.into(),
    }))
}

/// PUT /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    validation::validate(&req)?;

    state
        .auth_service
        .change_password(&auth, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}

/// GET /api/auth/users (admin)
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UsersResponse>, AppError> {
    let users = state.auth_service.list_users(&auth).await?;
    Ok(Json(UsersResponse {
        success: true,
        count: users.len(),
        users: users.into_iter().map(Into::into).collect(),
    }))
}

/// DELETE /api/auth/users/{id} (admin)
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state.auth_service.delete_user(&auth, id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
