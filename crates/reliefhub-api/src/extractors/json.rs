//! JSON body extractor with API-shaped rejections.
//!
//! Axum's stock `Json` rejection produces a 422 with a plain-text body;
//! this wrapper reports malformed bodies as a 400 in the standard
//! `{message}` error shape instead.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use reliefhub_core::error::AppError;

/// A JSON-deserialized request body.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}
