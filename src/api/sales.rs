use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, instrument};

use crate::api::parse_iso_date;
use crate::error::ApiError;
use crate::inventory::{InventoryNotifier, StockDeduction, notify_deductions};
use crate::model::sales::{NewSale, NewSaleItem, day_window};
use crate::store::SalesStore;

#[derive(Debug, Deserialize)]
pub struct SaleItemRequest {
    pub item_id: u64,
    pub quantity: u32,
    pub price_at_sale: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateSale {
    pub employee_id: u64,
    pub shop_id: u64,
    pub payment_method: String,
    pub items: Vec<SaleItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct SalesByDateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EmployeeDailySales {
    pub employee_id: u64,
    pub date: String,
    pub count_checks: i64,
    pub total_amount: f64,
}

/// Records a sale with its items, then tells the catalog service to deduct
/// stock for each item without waiting on it.
#[instrument(
    name = "create_sale",
    skip(store, notifier, payload),
    fields(employee_id = payload.employee_id, shop_id = payload.shop_id)
)]
pub async fn create_sale(
    store: web::Data<dyn SalesStore>,
    notifier: web::Data<dyn InventoryNotifier>,
    payload: web::Json<CreateSale>,
) -> Result<impl Responder, ApiError> {
    let payload = payload.into_inner();

    if payload.payment_method.trim().is_empty() {
        return Err(ApiError::bad_request("payment_method must not be empty"));
    }

    let sale = NewSale {
        employee_id: payload.employee_id,
        shop_id: payload.shop_id,
        payment_method: payload.payment_method,
        transaction_time: Local::now().naive_local(),
        items: payload
            .items
            .iter()
            .map(|item| NewSaleItem {
                item_id: item.item_id,
                quantity: item.quantity,
                price_at_sale: item.price_at_sale,
            })
            .collect(),
    };

    let transaction_id = store.create_sale(&sale).await.map_err(|e| {
        error!(error = %e, "Failed to create sale");
        ApiError::from(e)
    })?;

    info!(
        transaction_id,
        total_amount = sale.total_amount(),
        items = sale.items.len(),
        "Sale created"
    );

    let deductions = sale
        .items
        .iter()
        .map(|item| StockDeduction {
            item_id: item.item_id,
            quantity: item.quantity,
        })
        .collect();
    notify_deductions(notifier.into_inner(), deductions);

    Ok(HttpResponse::Created().json(json!({
        "transaction_id": transaction_id
    })))
}

/// How many checks an employee rang up on one calendar day, and their sum.
#[instrument(name = "sales_by_employee_and_date", skip(store, path, query))]
pub async fn sales_by_employee_and_date(
    store: web::Data<dyn SalesStore>,
    path: web::Path<u64>,
    query: web::Query<SalesByDateQuery>,
) -> Result<impl Responder, ApiError> {
    let employee_id = path.into_inner();

    let date_str = match query.into_inner().date {
        Some(d) if !d.is_empty() => d,
        _ => {
            return Err(ApiError::bad_request(
                "date query param is required, e.g. ?date=2025-04-10",
            ));
        }
    };

    let date = parse_iso_date(&date_str)
        .ok_or_else(|| ApiError::bad_request("invalid date format, use YYYY-MM-DD"))?;

    let (from, until) = day_window(date);

    let summary = store
        .sales_summary(employee_id, from, until)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, %date, "Failed to summarize sales");
            ApiError::from(e)
        })?;

    Ok(HttpResponse::Ok().json(EmployeeDailySales {
        employee_id,
        date: date_str,
        count_checks: summary.count_checks,
        total_amount: summary.total_amount,
    }))
}

pub async fn get_sale(
    store: web::Data<dyn SalesStore>,
    path: web::Path<u64>,
) -> Result<impl Responder, ApiError> {
    let sale_id = path.into_inner();

    let sale = store.get_sale(sale_id).await.map_err(|e| {
        error!(error = %e, sale_id, "Failed to fetch sale");
        ApiError::from(e)
    })?;

    match sale {
        Some(s) => Ok(HttpResponse::Ok().json(s)),
        None => Err(ApiError::not_found("sale not found")),
    }
}
