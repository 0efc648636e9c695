//! Appointment commands.
//!
//! - `POST /api/appointments/:id/cancel`
//! - `POST /api/appointments/:id/reschedule`
//!
//! Login is checked before the id is looked up.

use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, NotificationResponse, SessionContext};
use crate::booking::{self, BookingError};
use crate::models::Appointment;

pub async fn cancel(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<SessionContext>,
    Path(appointment_id): Path<String>,
) -> Result<Json<NotificationResponse>, ApiError> {
    let appointment = find(&ctx, &caller, &appointment_id)?;
    let notification = booking::cancel(&caller.session, appointment)?;
    Ok(Json(notification.into()))
}

pub async fn reschedule(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<SessionContext>,
    Path(appointment_id): Path<String>,
) -> Result<Json<NotificationResponse>, ApiError> {
    let appointment = find(&ctx, &caller, &appointment_id)?;
    let notification = booking::reschedule(&caller.session, appointment)?;
    Ok(Json(notification.into()))
}

fn find<'a>(
    ctx: &'a ApiContext,
    caller: &SessionContext,
    appointment_id: &str,
) -> Result<&'a Appointment, ApiError> {
    if !caller.session.is_authenticated() {
        return Err(BookingError::LoginRequired.into());
    }
    ctx.core
        .catalog()
        .appointment(appointment_id)
        .ok_or_else(|| ApiError::NotFound("Appointment not found".into()))
}
