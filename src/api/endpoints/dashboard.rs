//! Dashboard commands, hospital accounts only.
//!
//! - `PUT /api/dashboard/beds`
//! - `PUT /api/dashboard/pricing`
//! - `POST /api/dashboard/doctors`

use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::{NotificationResponse, SessionContext};
use crate::dashboard::{self, BedUpdate, NewDoctorForm};
use crate::models::{Pricing, Role};
use crate::session::{Access, Restriction};

pub async fn update_beds(
    Extension(caller): Extension<SessionContext>,
    Json(update): Json<BedUpdate>,
) -> Result<Json<NotificationResponse>, ApiError> {
    require_hospital(&caller)?;
    Ok(Json(dashboard::update_beds(&update)?.into()))
}

pub async fn update_pricing(
    Extension(caller): Extension<SessionContext>,
    Json(pricing): Json<Pricing>,
) -> Result<Json<NotificationResponse>, ApiError> {
    require_hospital(&caller)?;
    Ok(Json(dashboard::update_pricing(&pricing)?.into()))
}

pub async fn add_doctor(
    Extension(caller): Extension<SessionContext>,
    Json(form): Json<NewDoctorForm>,
) -> Result<Json<NotificationResponse>, ApiError> {
    require_hospital(&caller)?;
    Ok(Json(dashboard::add_doctor(&form)?.into()))
}

fn require_hospital(caller: &SessionContext) -> Result<(), ApiError> {
    match caller.session.authorize(Role::Hospital) {
        Access::Granted(_) => Ok(()),
        Access::Restricted(Restriction::LoginRequired) => Err(ApiError::Unauthorized),
        Access::Restricted(Restriction::RoleRequired(role)) => Err(ApiError::Forbidden(role)),
    }
}
