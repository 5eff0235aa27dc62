use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SalaryPayment {
    pub id: u64,
    pub employee_id: u64,
    pub pay_period_start: NaiveDate,
    pub pay_period_end: NaiveDate,
    pub amount: f64,
    #[serde(with = "super::local_time")]
    pub paid_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewSalaryPayment {
    pub employee_id: u64,
    pub pay_period_start: NaiveDate,
    pub pay_period_end: NaiveDate,
    pub amount: f64,
    pub paid_at: NaiveDateTime,
}
