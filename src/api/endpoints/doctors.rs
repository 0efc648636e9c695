//! `POST /api/doctors/:id/book`

use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, NotificationResponse, SessionContext};
use crate::booking::{self, BookingRequest};

pub async fn book(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<SessionContext>,
    Path(doctor_id): Path<String>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<NotificationResponse>, ApiError> {
    let doctor = ctx
        .core
        .catalog()
        .doctor(&doctor_id)
        .ok_or_else(|| ApiError::NotFound("Doctor not found".into()))?;

    let notification = booking::book(&caller.session, doctor, &request)?;
    Ok(Json(notification.into()))
}
