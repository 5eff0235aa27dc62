//! In-memory store used by the handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::{AttendanceStore, SalaryStore, SalesStore, StoreError, StoreResult};
use crate::model::attendance::EmployeeAttendance;
use crate::model::salary::{NewSalaryPayment, SalaryPayment};
use crate::model::sales::{NewSale, SaleItem, SaleWithItems, SalesSummary, SalesTransaction};

#[derive(Default)]
struct Tables {
    sales: Vec<SalesTransaction>,
    sale_items: Vec<SaleItem>,
    attendances: Vec<EmployeeAttendance>,
    salaries: Vec<SalaryPayment>,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds attendance rows as-is, bypassing the one-open-shift rule, like an
    /// `employee_attendances` table created without the open-shift key.
    pub fn with_attendances(rows: Vec<EmployeeAttendance>) -> Self {
        let store = Self::new();
        store.tables.lock().unwrap().attendances = rows;
        store
    }

    pub fn sales(&self) -> Vec<SalesTransaction> {
        self.tables.lock().unwrap().sales.clone()
    }

    pub fn attendances(&self) -> Vec<EmployeeAttendance> {
        self.tables.lock().unwrap().attendances.clone()
    }

    /// Inserts a transaction with an explicit timestamp and total.
    pub fn insert_sale_at(&self, employee_id: u64, at: NaiveDateTime, total_amount: f64) -> u64 {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.sales.len() as u64 + 1;
        tables.sales.push(SalesTransaction {
            id,
            employee_id,
            shop_id: 1,
            transaction_time: at,
            total_amount,
            payment_method: "cash".into(),
            created_at: at,
            updated_at: at,
        });
        id
    }
}

fn newest_open(rows: &[EmployeeAttendance], employee_id: u64) -> Option<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, r)| r.employee_id == employee_id && r.clock_out.is_none())
        .max_by_key(|(_, r)| (r.clock_in, r.id))
        .map(|(idx, _)| idx)
}

#[async_trait]
impl SalesStore for InMemoryStore {
    async fn create_sale(&self, sale: &NewSale) -> StoreResult<u64> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.sales.len() as u64 + 1;
        let at = sale.transaction_time;

        tables.sales.push(SalesTransaction {
            id,
            employee_id: sale.employee_id,
            shop_id: sale.shop_id,
            transaction_time: at,
            total_amount: sale.total_amount(),
            payment_method: sale.payment_method.clone(),
            created_at: at,
            updated_at: at,
        });

        for item in &sale.items {
            let item_row_id = tables.sale_items.len() as u64 + 1;
            tables.sale_items.push(SaleItem {
                id: item_row_id,
                transaction_id: id,
                item_id: item.item_id,
                quantity: item.quantity,
                price_at_sale: item.price_at_sale,
                created_at: at,
                updated_at: at,
            });
        }

        Ok(id)
    }

    async fn sales_summary(
        &self,
        employee_id: u64,
        from: NaiveDateTime,
        until: NaiveDateTime,
    ) -> StoreResult<SalesSummary> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .sales
            .iter()
            .filter(|s| {
                s.employee_id == employee_id
                    && s.transaction_time >= from
                    && s.transaction_time < until
            })
            .fold(SalesSummary::default(), |acc, s| SalesSummary {
                count_checks: acc.count_checks + 1,
                total_amount: acc.total_amount + s.total_amount,
            }))
    }

    async fn get_sale(&self, id: u64) -> StoreResult<Option<SaleWithItems>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.sales.iter().find(|s| s.id == id).map(|transaction| SaleWithItems {
            transaction: transaction.clone(),
            items: tables
                .sale_items
                .iter()
                .filter(|i| i.transaction_id == id)
                .cloned()
                .collect(),
        }))
    }
}

#[async_trait]
impl AttendanceStore for InMemoryStore {
    async fn clock_in(&self, employee_id: u64, at: NaiveDateTime) -> StoreResult<EmployeeAttendance> {
        let mut tables = self.tables.lock().unwrap();
        if newest_open(&tables.attendances, employee_id).is_some() {
            return Err(StoreError::OpenShiftExists(employee_id));
        }

        let record = EmployeeAttendance {
            id: tables.attendances.iter().map(|r| r.id).max().unwrap_or(0) + 1,
            employee_id,
            clock_in: at,
            clock_out: None,
            created_at: at,
            updated_at: at,
        };
        tables.attendances.push(record.clone());
        Ok(record)
    }

    async fn clock_out(
        &self,
        employee_id: u64,
        at: NaiveDateTime,
    ) -> StoreResult<Option<EmployeeAttendance>> {
        let mut tables = self.tables.lock().unwrap();
        let Some(idx) = newest_open(&tables.attendances, employee_id) else {
            return Ok(None);
        };

        let record = &mut tables.attendances[idx];
        record.clock_out = Some(at);
        record.updated_at = at;
        Ok(Some(record.clone()))
    }

    async fn open_shift(&self, employee_id: u64) -> StoreResult<Option<EmployeeAttendance>> {
        let tables = self.tables.lock().unwrap();
        Ok(newest_open(&tables.attendances, employee_id).map(|idx| tables.attendances[idx].clone()))
    }
}

#[async_trait]
impl SalaryStore for InMemoryStore {
    async fn create_salary_payment(&self, payment: &NewSalaryPayment) -> StoreResult<u64> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.salaries.len() as u64 + 1;
        tables.salaries.push(SalaryPayment {
            id,
            employee_id: payment.employee_id,
            pay_period_start: payment.pay_period_start,
            pay_period_end: payment.pay_period_end,
            amount: payment.amount,
            paid_at: payment.paid_at,
        });
        Ok(id)
    }

    async fn get_salary_payment(&self, id: u64) -> StoreResult<Option<SalaryPayment>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.salaries.iter().find(|p| p.id == id).cloned())
    }
}
