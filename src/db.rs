use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use tracing::{info, warn};

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

const CREATE_SALES_TRANSACTIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS sales_transactions (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        employee_id BIGINT UNSIGNED NOT NULL,
        shop_id BIGINT UNSIGNED NOT NULL,
        transaction_time DATETIME(6) NOT NULL,
        total_amount DOUBLE NOT NULL,
        payment_method VARCHAR(64) NOT NULL,
        created_at DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
        updated_at DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6) ON UPDATE CURRENT_TIMESTAMP(6),
        INDEX idx_sales_employee_time (employee_id, transaction_time)
    )
"#;

const CREATE_SALE_ITEMS: &str = r#"
    CREATE TABLE IF NOT EXISTS sale_items (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        transaction_id BIGINT UNSIGNED NOT NULL,
        item_id BIGINT UNSIGNED NOT NULL,
        quantity INT UNSIGNED NOT NULL,
        price_at_sale DOUBLE NOT NULL,
        created_at DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
        updated_at DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6) ON UPDATE CURRENT_TIMESTAMP(6),
        INDEX idx_sale_items_transaction (transaction_id),
        CONSTRAINT fk_sale_items_transaction FOREIGN KEY (transaction_id)
            REFERENCES sales_transactions (id) ON DELETE CASCADE
    )
"#;

// open_shift_employee_id is only non-null while clock_out is null, so the
// unique key allows at most one open shift per employee.
const CREATE_EMPLOYEE_ATTENDANCES: &str = r#"
    CREATE TABLE IF NOT EXISTS employee_attendances (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        employee_id BIGINT UNSIGNED NOT NULL,
        clock_in DATETIME(6) NOT NULL,
        clock_out DATETIME(6) NULL,
        created_at DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
        updated_at DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6) ON UPDATE CURRENT_TIMESTAMP(6),
        open_shift_employee_id BIGINT UNSIGNED
            AS (IF(clock_out IS NULL, employee_id, NULL)) STORED,
        INDEX idx_attendance_employee_clock_in (employee_id, clock_in),
        UNIQUE KEY uq_attendance_open_shift (open_shift_employee_id)
    )
"#;

const CREATE_SALARY_PAYMENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS salary_payments (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        employee_id BIGINT UNSIGNED NOT NULL,
        pay_period_start DATE NOT NULL,
        pay_period_end DATE NOT NULL,
        amount DOUBLE NOT NULL,
        paid_at DATETIME(6) NOT NULL,
        INDEX idx_salary_employee (employee_id)
    )
"#;

/// Creates the four tables if they are missing. Safe to run on every startup.
///
/// Existing tables are left as they are. An `employee_attendances` table that
/// predates the open-shift key is reported, since nothing then stops a second
/// open shift per employee.
pub async fn ensure_schema(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    for (table, ddl) in [
        ("sales_transactions", CREATE_SALES_TRANSACTIONS),
        ("sale_items", CREATE_SALE_ITEMS),
        ("employee_attendances", CREATE_EMPLOYEE_ATTENDANCES),
        ("salary_payments", CREATE_SALARY_PAYMENTS),
    ] {
        sqlx::query(ddl).execute(pool).await?;
        info!(table, "Table ready");
    }

    if !has_column(pool, "employee_attendances", "open_shift_employee_id").await? {
        warn!(
            table = "employee_attendances",
            "Missing open_shift_employee_id column; one open shift per employee is not enforced"
        );
    }

    Ok(())
}

/// Whether `table` in the connected database has a column named `column`.
pub async fn has_column(pool: &MySqlPool, table: &str, column: &str) -> Result<bool, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM information_schema.COLUMNS
        WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? AND COLUMN_NAME = ?
        "#,
    )
    .bind(table)
    .bind(column)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}
