use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::MySqlPool;
use tracing::debug;

use super::{AttendanceStore, SalaryStore, SalesStore, StoreError, StoreResult};
use crate::model::attendance::EmployeeAttendance;
use crate::model::salary::{NewSalaryPayment, SalaryPayment};
use crate::model::sales::{NewSale, SaleItem, SaleWithItems, SalesSummary, SalesTransaction};

/// MySQL-backed store. One instance owns the pool and serves every handler.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const ATTENDANCE_COLUMNS: &str =
    "id, employee_id, clock_in, clock_out, created_at, updated_at";

#[async_trait]
impl SalesStore for MySqlStore {
    async fn create_sale(&self, sale: &NewSale) -> StoreResult<u64> {
        let mut tx = self.pool.begin().await?;

        let transaction_id = sqlx::query(
            r#"
            INSERT INTO sales_transactions
            (employee_id, shop_id, transaction_time, total_amount, payment_method)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(sale.employee_id)
        .bind(sale.shop_id)
        .bind(sale.transaction_time)
        .bind(sale.total_amount())
        .bind(&sale.payment_method)
        .execute(&mut *tx)
        .await?
        .last_insert_id();

        for item in &sale.items {
            sqlx::query(
                r#"
                INSERT INTO sale_items (transaction_id, item_id, quantity, price_at_sale)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(transaction_id)
            .bind(item.item_id)
            .bind(item.quantity)
            .bind(item.price_at_sale)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(transaction_id, items = sale.items.len(), "Sale persisted");
        Ok(transaction_id)
    }

    async fn sales_summary(
        &self,
        employee_id: u64,
        from: NaiveDateTime,
        until: NaiveDateTime,
    ) -> StoreResult<SalesSummary> {
        // SUM over zero rows is NULL
        let (count_checks, total_amount) = sqlx::query_as::<_, (i64, Option<f64>)>(
            r#"
            SELECT COUNT(*), SUM(total_amount)
            FROM sales_transactions
            WHERE employee_id = ?
            AND transaction_time >= ?
            AND transaction_time < ?
            "#,
        )
        .bind(employee_id)
        .bind(from)
        .bind(until)
        .fetch_one(&self.pool)
        .await?;

        Ok(SalesSummary {
            count_checks,
            total_amount: total_amount.unwrap_or(0.0),
        })
    }

    async fn get_sale(&self, id: u64) -> StoreResult<Option<SaleWithItems>> {
        let transaction = sqlx::query_as::<_, SalesTransaction>(
            r#"
            SELECT id, employee_id, shop_id, transaction_time, total_amount,
                   payment_method, created_at, updated_at
            FROM sales_transactions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(transaction) = transaction else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, transaction_id, item_id, quantity, price_at_sale, created_at, updated_at
            FROM sale_items
            WHERE transaction_id = ?
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(SaleWithItems { transaction, items }))
    }
}

#[async_trait]
impl AttendanceStore for MySqlStore {
    async fn clock_in(&self, employee_id: u64, at: NaiveDateTime) -> StoreResult<EmployeeAttendance> {
        let result = sqlx::query(
            r#"
            INSERT INTO employee_attendances (employee_id, clock_in)
            VALUES (?, ?)
            "#,
        )
        .bind(employee_id)
        .bind(at)
        .execute(&self.pool)
        .await;

        let id = match result {
            Ok(done) => done.last_insert_id(),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(StoreError::OpenShiftExists(employee_id));
            }
            Err(e) => return Err(e.into()),
        };

        let record = sqlx::query_as::<_, EmployeeAttendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM employee_attendances WHERE id = ?"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn clock_out(
        &self,
        employee_id: u64,
        at: NaiveDateTime,
    ) -> StoreResult<Option<EmployeeAttendance>> {
        let mut tx = self.pool.begin().await?;

        // The open-shift key leaves at most one candidate; tables created
        // without it (see `ensure_schema`) close the newest first.
        let open = sqlx::query_as::<_, EmployeeAttendance>(&format!(
            r#"
            SELECT {ATTENDANCE_COLUMNS}
            FROM employee_attendances
            WHERE employee_id = ? AND clock_out IS NULL
            ORDER BY clock_in DESC, id DESC
            LIMIT 1
            FOR UPDATE
            "#
        ))
        .bind(employee_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(open) = open else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query("UPDATE employee_attendances SET clock_out = ? WHERE id = ?")
            .bind(at)
            .bind(open.id)
            .execute(&mut *tx)
            .await?;

        let closed = sqlx::query_as::<_, EmployeeAttendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM employee_attendances WHERE id = ?"
        ))
        .bind(open.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(closed))
    }

    async fn open_shift(&self, employee_id: u64) -> StoreResult<Option<EmployeeAttendance>> {
        let record = sqlx::query_as::<_, EmployeeAttendance>(&format!(
            r#"
            SELECT {ATTENDANCE_COLUMNS}
            FROM employee_attendances
            WHERE employee_id = ? AND clock_out IS NULL
            ORDER BY clock_in DESC, id DESC
            LIMIT 1
            "#
        ))
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}

#[async_trait]
impl SalaryStore for MySqlStore {
    async fn create_salary_payment(&self, payment: &NewSalaryPayment) -> StoreResult<u64> {
        let id = sqlx::query(
            r#"
            INSERT INTO salary_payments
            (employee_id, pay_period_start, pay_period_end, amount, paid_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(payment.employee_id)
        .bind(payment.pay_period_start)
        .bind(payment.pay_period_end)
        .bind(payment.amount)
        .bind(payment.paid_at)
        .execute(&self.pool)
        .await?
        .last_insert_id();

        Ok(id)
    }

    async fn get_salary_payment(&self, id: u64) -> StoreResult<Option<SalaryPayment>> {
        let payment = sqlx::query_as::<_, SalaryPayment>(
            r#"
            SELECT id, employee_id, pay_period_start, pay_period_end, amount, paid_at
            FROM salary_payments
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }
}
