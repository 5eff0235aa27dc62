//! Persistence seam shared by the sales, attendance and salary handlers.
//!
//! Each handler group depends on one trait. Production wires all three to a
//! single [`MySqlStore`]; tests use the in-memory store.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use derive_more::Display;

use crate::model::attendance::EmployeeAttendance;
use crate::model::salary::{NewSalaryPayment, SalaryPayment};
use crate::model::sales::{NewSale, SaleWithItems, SalesSummary};

#[cfg(test)]
pub mod memory;
pub mod mysql;

pub use mysql::MySqlStore;

#[derive(Debug, Display)]
pub enum StoreError {
    #[display(fmt = "employee {} already has an open shift", _0)]
    OpenShiftExists(u64),

    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(e) => Some(e),
            StoreError::OpenShiftExists(_) => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait SalesStore: Send + Sync {
    /// Writes the transaction and all of its items atomically; returns the
    /// new transaction id.
    async fn create_sale(&self, sale: &NewSale) -> StoreResult<u64>;

    /// Count and total of an employee's transactions with
    /// `from <= transaction_time < until`.
    async fn sales_summary(
        &self,
        employee_id: u64,
        from: NaiveDateTime,
        until: NaiveDateTime,
    ) -> StoreResult<SalesSummary>;

    async fn get_sale(&self, id: u64) -> StoreResult<Option<SaleWithItems>>;
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Opens a shift. Fails with [`StoreError::OpenShiftExists`] when the
    /// employee already has one.
    async fn clock_in(&self, employee_id: u64, at: NaiveDateTime) -> StoreResult<EmployeeAttendance>;

    /// Closes the employee's most recent open shift, if any.
    async fn clock_out(
        &self,
        employee_id: u64,
        at: NaiveDateTime,
    ) -> StoreResult<Option<EmployeeAttendance>>;

    async fn open_shift(&self, employee_id: u64) -> StoreResult<Option<EmployeeAttendance>>;
}

#[async_trait]
pub trait SalaryStore: Send + Sync {
    async fn create_salary_payment(&self, payment: &NewSalaryPayment) -> StoreResult<u64>;

    async fn get_salary_payment(&self, id: u64) -> StoreResult<Option<SalaryPayment>>;
}
