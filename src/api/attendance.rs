use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, instrument, warn};

use crate::error::ApiError;
use crate::model::local_time;
use crate::store::{AttendanceStore, StoreError};

#[derive(Debug, Deserialize)]
pub struct ShiftRequest {
    pub employee_id: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClosedShift {
    pub attendance_id: u64,
    #[serde(with = "local_time")]
    pub clock_in: NaiveDateTime,
    #[serde(with = "local_time")]
    pub clock_out: NaiveDateTime,
}

/// Clock-in endpoint
#[instrument(name = "clock_in", skip(store, payload), fields(employee_id = payload.employee_id))]
pub async fn clock_in(
    store: web::Data<dyn AttendanceStore>,
    payload: web::Json<ShiftRequest>,
) -> Result<impl Responder, ApiError> {
    let employee_id = payload.employee_id;

    let record = store
        .clock_in(employee_id, Local::now().naive_local())
        .await
        .map_err(|e| {
            match &e {
                StoreError::OpenShiftExists(_) => warn!("Clock-in rejected: shift already open"),
                StoreError::Database(_) => error!(error = %e, employee_id, "Clock-in failed"),
            }
            ApiError::from(e)
        })?;

    info!(attendance_id = record.id, "Clocked in");

    Ok(HttpResponse::Ok().json(json!({
        "attendance_id": record.id
    })))
}

/// Clock-out endpoint. Closes the most recent open shift.
#[instrument(name = "clock_out", skip(store, payload), fields(employee_id = payload.employee_id))]
pub async fn clock_out(
    store: web::Data<dyn AttendanceStore>,
    payload: web::Json<ShiftRequest>,
) -> Result<impl Responder, ApiError> {
    let employee_id = payload.employee_id;
    let now = Local::now().naive_local();

    let closed = store
        .clock_out(employee_id, now)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, "Clock-out failed");
            ApiError::from(e)
        })?;

    let Some(record) = closed else {
        return Err(ApiError::not_found("No active clock-in found"));
    };

    info!(attendance_id = record.id, "Clocked out");

    Ok(HttpResponse::Ok().json(ClosedShift {
        attendance_id: record.id,
        clock_in: record.clock_in,
        clock_out: record.clock_out.unwrap_or(now),
    }))
}

pub async fn open_shift(
    store: web::Data<dyn AttendanceStore>,
    path: web::Path<u64>,
) -> Result<impl Responder, ApiError> {
    let employee_id = path.into_inner();

    let open = store.open_shift(employee_id).await.map_err(|e| {
        error!(error = %e, employee_id, "Failed to fetch open shift");
        ApiError::from(e)
    })?;

    match open {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Err(ApiError::not_found("No active clock-in found")),
    }
}
