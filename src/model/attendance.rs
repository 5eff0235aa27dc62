use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One shift. `clock_out` stays `None` while the shift is open.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EmployeeAttendance {
    pub id: u64,
    pub employee_id: u64,
    #[serde(with = "super::local_time")]
    pub clock_in: NaiveDateTime,
    #[serde(with = "super::local_time::option")]
    pub clock_out: Option<NaiveDateTime>,
    #[serde(with = "super::local_time")]
    pub created_at: NaiveDateTime,
    #[serde(with = "super::local_time")]
    pub updated_at: NaiveDateTime,
}

