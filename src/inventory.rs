//! Best-effort stock deduction calls to the catalog service.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StockDeduction {
    pub item_id: u64,
    pub quantity: u32,
}

#[async_trait]
pub trait InventoryNotifier: Send + Sync {
    /// Sends one deduction; returns the HTTP status on success.
    async fn deduct(&self, deduction: StockDeduction) -> Result<u16>;
}

pub struct HttpInventoryNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpInventoryNotifier {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl InventoryNotifier for HttpInventoryNotifier {
    async fn deduct(&self, deduction: StockDeduction) -> Result<u16> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&deduction)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            bail!("catalog service answered {status}");
        }
        Ok(status.as_u16())
    }
}

/// Spawns one detached task per deduction. Nothing is awaited, retried or
/// reported back; outcomes only reach the log.
pub fn notify_deductions(notifier: Arc<dyn InventoryNotifier>, deductions: Vec<StockDeduction>) {
    for deduction in deductions {
        let notifier = Arc::clone(&notifier);
        actix_web::rt::spawn(async move {
            match notifier.deduct(deduction).await {
                Ok(status) => info!(
                    item_id = deduction.item_id,
                    quantity = deduction.quantity,
                    status,
                    "Notified catalog service"
                ),
                Err(e) => warn!(
                    error = %e,
                    item_id = deduction.item_id,
                    quantity = deduction.quantity,
                    "Failed to notify catalog service"
                ),
            }
        });
    }
}
