//! HTTP routing and status mapping.
//!
//! # Responsibility
//! - Expose the capsule API as thin handlers over `CapsuleService`.
//! - Translate domain errors into status codes and `{"message"}` bodies.
//!
//! # Invariants
//! - GET returns the raw stored array; unlock/sort computation belongs to
//!   the presentation layer, not this surface.
//! - No handler failure is fatal to the process.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use log::warn;
use serde_json::json;
use std::sync::Arc;
use timecapsule_core::{Capsule, CapsuleDraft, CapsuleService, JsonFileStore, ServiceError};

pub type SharedService = Arc<CapsuleService<JsonFileStore>>;

/// Builds the API router over a shared capsule service.
pub fn router(service: SharedService) -> Router {
    Router::new()
        .route("/api/capsules", get(list_capsules).post(create_capsule))
        .route("/api/capsules/:id", delete(remove_capsule))
        .with_state(service)
}

/// Domain error translated to an HTTP response.
struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        let status = match &value {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            warn!("event=request_failed module=server status=error error={value}");
        }
        Self {
            status,
            message: value.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

async fn create_capsule(
    State(service): State<SharedService>,
    Json(draft): Json<CapsuleDraft>,
) -> Result<(StatusCode, Json<Capsule>), ApiError> {
    let created = service.create(&draft)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_capsules(
    State(service): State<SharedService>,
) -> Result<Json<Vec<Capsule>>, ApiError> {
    Ok(Json(service.list()?))
}

async fn remove_capsule(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    service.remove(&id)?;
    Ok(Json(json!({ "message": "Capsule deleted successfully." })))
}
