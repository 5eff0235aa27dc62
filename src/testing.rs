//! Shared fixtures for handler tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::web;
use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::inventory::{InventoryNotifier, StockDeduction};
use crate::routes;
use crate::store::memory::InMemoryStore;
use crate::store::{AttendanceStore, SalaryStore, SalesStore};

/// Records every deduction it receives. Deductions for `fail_item` are
/// recorded and then reported as failures.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<StockDeduction>>,
    fail_item: Option<u64>,
}

impl RecordingNotifier {
    pub fn failing_for(item_id: u64) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_item: Some(item_id),
        }
    }

    pub fn sent(&self) -> Vec<StockDeduction> {
        self.sent.lock().unwrap().clone()
    }

    /// Yields to the runtime until `count` deductions arrived or ~1s passed.
    pub async fn wait_for(&self, count: usize) -> Vec<StockDeduction> {
        for _ in 0..100 {
            if self.sent.lock().unwrap().len() >= count {
                break;
            }
            actix_web::rt::time::sleep(Duration::from_millis(10)).await;
        }
        self.sent()
    }
}

#[async_trait]
impl InventoryNotifier for RecordingNotifier {
    async fn deduct(&self, deduction: StockDeduction) -> Result<u16> {
        self.sent.lock().unwrap().push(deduction);
        if self.fail_item == Some(deduction.item_id) {
            bail!("catalog service unavailable");
        }
        Ok(200)
    }
}

/// Registers the store under every store trait, the notifier, and the routes
/// at the root prefix.
pub fn configure(
    store: Arc<InMemoryStore>,
    notifier: Arc<RecordingNotifier>,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::from(store.clone() as Arc<dyn SalesStore>))
            .app_data(web::Data::from(store.clone() as Arc<dyn AttendanceStore>))
            .app_data(web::Data::from(store as Arc<dyn SalaryStore>))
            .app_data(web::Data::from(notifier as Arc<dyn InventoryNotifier>));
        routes::configure(cfg, "");
    }
}
