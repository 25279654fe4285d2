//! # Aggregation
//!
//! Dashboard figures derived from the current tables. Everything here is a pure
//! function of [`Tables`]; nothing is cached, so a figure is always consistent
//! with the store at the moment it is asked for.
//!
//! Dangling references never fail a read. In joined rows a missing client or
//! product renders as a placeholder label; in the revenue-by-product breakdown
//! such sales are left out instead, while still counting toward the
//! received/receivable totals.
//!
//! Sums saturate at the largest representable amount rather than overflow.
//!
//! Revenue is grouped by product *name*, so two products that share a name
//! are reported as one line.

use crate::model::{Client, Entry, PaymentStatus, RecordId, Sale, Tables};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

pub const CLIENT_NOT_FOUND: &str = "Client not found";
pub const PRODUCT_NOT_FOUND: &str = "Product not found";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRevenue {
    pub name: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub total_received: Decimal,
    pub total_receivable: Decimal,
    pub sale_count: usize,
    pub outstanding_clients: Vec<Entry<Client>>,
    pub revenue_by_product: Vec<ProductRevenue>,
}

/// A sale joined with the names it references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRow {
    pub id: RecordId,
    pub date: DateTime<Utc>,
    pub client_name: String,
    pub product_name: String,
    pub quantity: u32,
    pub total_value: Decimal,
    pub payment_method: String,
    pub status: PaymentStatus,
}

pub fn dashboard(tables: &Tables) -> Dashboard {
    Dashboard {
        total_received: total_received(tables),
        total_receivable: total_receivable(tables),
        sale_count: sale_count(tables),
        outstanding_clients: outstanding_clients(tables),
        revenue_by_product: revenue_by_product(tables),
    }
}

pub fn total_received(tables: &Tables) -> Decimal {
    total_with_status(&tables.sales, PaymentStatus::Paid)
}

pub fn total_receivable(tables: &Tables) -> Decimal {
    total_with_status(&tables.sales, PaymentStatus::Pending)
}

pub fn sale_count(tables: &Tables) -> usize {
    tables.sales.len()
}

/// Clients still marked as owing money, in stored order.
pub fn outstanding_clients(tables: &Tables) -> Vec<Entry<Client>> {
    tables
        .clients
        .iter()
        .filter(|c| c.data.status == PaymentStatus::Pending)
        .cloned()
        .collect()
}

/// Revenue per product name, in order of first appearance among the sales.
pub fn revenue_by_product(tables: &Tables) -> Vec<ProductRevenue> {
    let mut breakdown: Vec<ProductRevenue> = Vec::new();

    for sale in &tables.sales {
        let Some(name) = product_name(tables, sale.data.product_id) else {
            continue;
        };
        match breakdown.iter_mut().find(|r| r.name == name) {
            Some(line) => line.total = line.total.saturating_add(sale.data.total_value),
            None => breakdown.push(ProductRevenue {
                name: name.to_string(),
                total: sale.data.total_value,
            }),
        }
    }

    breakdown
}

/// Every sale with client and product names resolved, in stored order.
pub fn resolve_sales(tables: &Tables) -> Vec<SaleRow> {
    tables
        .sales
        .iter()
        .map(|sale| SaleRow {
            id: sale.id,
            date: sale.data.date,
            client_name: client_name(tables, sale.data.client_id)
                .unwrap_or(CLIENT_NOT_FOUND)
                .to_string(),
            product_name: product_name(tables, sale.data.product_id)
                .unwrap_or(PRODUCT_NOT_FOUND)
                .to_string(),
            quantity: sale.data.quantity,
            total_value: sale.data.total_value,
            payment_method: sale.data.payment_method.clone(),
            status: sale.data.status,
        })
        .collect()
}

pub fn client_name(tables: &Tables, id: RecordId) -> Option<&str> {
    tables
        .clients
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.data.name.as_str())
}

pub fn product_name(tables: &Tables, id: RecordId) -> Option<&str> {
    tables
        .products
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.data.name.as_str())
}

fn total_with_status(sales: &[Entry<Sale>], status: PaymentStatus) -> Decimal {
    sales
        .iter()
        .filter(|s| s.data.status == status)
        .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.data.total_value))
}
