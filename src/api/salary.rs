use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, instrument};

use crate::api::parse_iso_date;
use crate::error::ApiError;
use crate::model::salary::NewSalaryPayment;
use crate::store::SalaryStore;

#[derive(Debug, Deserialize)]
pub struct PaySalary {
    pub employee_id: u64,
    /// `YYYY-MM-DD`
    pub pay_period_start: String,
    pub pay_period_end: String,
    pub amount: f64,
    /// `YYYY-MM-DD`; omitted or empty means now.
    #[serde(default)]
    pub paid_at: Option<String>,
}

fn required_date(raw: &str, field: &str) -> Result<NaiveDate, ApiError> {
    parse_iso_date(raw).ok_or_else(|| ApiError::bad_request(format!("invalid {field}")))
}

#[instrument(name = "pay_salary", skip(store, payload), fields(employee_id = payload.employee_id))]
pub async fn pay_salary(
    store: web::Data<dyn SalaryStore>,
    payload: web::Json<PaySalary>,
) -> Result<impl Responder, ApiError> {
    let pay_period_start = required_date(&payload.pay_period_start, "pay_period_start")?;
    let pay_period_end = required_date(&payload.pay_period_end, "pay_period_end")?;

    let paid_at = match payload.paid_at.as_deref() {
        None | Some("") => Local::now().naive_local(),
        Some(raw) => required_date(raw, "paid_at")?.and_time(NaiveTime::MIN),
    };

    let payment = NewSalaryPayment {
        employee_id: payload.employee_id,
        pay_period_start,
        pay_period_end,
        amount: payload.amount,
        paid_at,
    };

    let salary_id = store.create_salary_payment(&payment).await.map_err(|e| {
        error!(error = %e, "Failed to record salary payment");
        ApiError::from(e)
    })?;

    info!(salary_id, amount = payment.amount, "Salary paid");

    Ok(HttpResponse::Created().json(json!({
        "salary_id": salary_id
    })))
}

pub async fn get_salary(
    store: web::Data<dyn SalaryStore>,
    path: web::Path<u64>,
) -> Result<impl Responder, ApiError> {
    let salary_id = path.into_inner();

    let payment = store.get_salary_payment(salary_id).await.map_err(|e| {
        error!(error = %e, salary_id, "Failed to fetch salary payment");
        ApiError::from(e)
    })?;

    match payment {
        Some(p) => Ok(HttpResponse::Ok().json(p)),
        None => Err(ApiError::not_found("salary not found")),
    }
}
