use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SalesTransaction {
    pub id: u64,
    pub employee_id: u64,
    pub shop_id: u64,
    #[serde(with = "super::local_time")]
    pub transaction_time: NaiveDateTime,
    pub total_amount: f64,
    pub payment_method: String,
    #[serde(with = "super::local_time")]
    pub created_at: NaiveDateTime,
    #[serde(with = "super::local_time")]
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SaleItem {
    pub id: u64,
    pub transaction_id: u64,
    pub item_id: u64,
    pub quantity: u32,
    pub price_at_sale: f64,
    #[serde(with = "super::local_time")]
    pub created_at: NaiveDateTime,
    #[serde(with = "super::local_time")]
    pub updated_at: NaiveDateTime,
}

/// A transaction together with the items sold in it.
#[derive(Debug, Clone, Serialize)]
pub struct SaleWithItems {
    #[serde(flatten)]
    pub transaction: SalesTransaction,
    pub items: Vec<SaleItem>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewSaleItem {
    pub item_id: u64,
    pub quantity: u32,
    pub price_at_sale: f64,
}

impl NewSaleItem {
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.price_at_sale
    }
}

/// A sale as it is about to be written. The total is derived from the items
/// here, once; stored transactions never recompute it.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub employee_id: u64,
    pub shop_id: u64,
    pub payment_method: String,
    pub transaction_time: NaiveDateTime,
    pub items: Vec<NewSaleItem>,
}

impl NewSale {
    pub fn total_amount(&self) -> f64 {
        self.items.iter().map(NewSaleItem::line_total).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SalesSummary {
    pub count_checks: i64,
    pub total_amount: f64,
}

/// Half-open `[date 00:00, date+1 00:00)` window in local wall-clock time.
pub fn day_window(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(NaiveTime::MIN);
    let next_day = date.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);
    (start, next_day.and_time(NaiveTime::MIN))
}
