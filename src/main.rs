use std::sync::Arc;
use std::time::Duration;

use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_appender::rolling;

use sales_ops::config::Config;
use sales_ops::db::{ensure_schema, init_db};
use sales_ops::inventory::{HttpInventoryNotifier, InventoryNotifier};
use sales_ops::routes;
use sales_ops::store::{AttendanceStore, MySqlStore, SalaryStore, SalesStore};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    info!(addr = %config.server_addr, "Server starting...");

    let pool = init_db(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to connect to database")?;
    ensure_schema(&pool)
        .await
        .context("Failed to prepare database schema")?;
    info!("Database schema ready");

    let store = Arc::new(MySqlStore::new(pool));
    let sales_store: Arc<dyn SalesStore> = store.clone();
    let attendance_store: Arc<dyn AttendanceStore> = store.clone();
    let salary_store: Arc<dyn SalaryStore> = store;

    let notifier: Arc<dyn InventoryNotifier> = Arc::new(HttpInventoryNotifier::new(
        config.inventory_deduct_url.clone(),
        Duration::from_secs(config.inventory_timeout_secs),
    )?);

    let api_prefix = config.api_prefix.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .app_data(Data::from(sales_store.clone()))
            .app_data(Data::from(attendance_store.clone()))
            .app_data(Data::from(salary_store.clone()))
            .app_data(Data::from(notifier.clone()))
            .configure(|cfg| routes::configure(cfg, &api_prefix))
    })
    .bind(&config.server_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
