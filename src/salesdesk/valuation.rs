//! Turning a submitted sale form into a finalized [`Sale`].
//!
//! The total is never taken from the caller: it is always the resolved
//! product's unit price times the quantity, computed at save time. The sale
//! date is stamped once on creation and copied forward on every edit.

use crate::error::{Result, SalesdeskError};
use crate::model::{Collection, Entry, PaymentStatus, Product, RecordId, Sale, Tables, Write};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Raw sale input as collected from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleForm {
    pub client_id: RecordId,
    pub product_id: RecordId,
    pub quantity: i64,
    pub payment_method: String,
    pub status: PaymentStatus,
}

/// Parses a quantity field. Non-numeric input is rejected, never coerced.
pub fn parse_quantity(raw: &str) -> Result<i64> {
    raw.trim().parse::<i64>().map_err(|_| {
        SalesdeskError::validation(format!("Quantity must be a whole number, got '{}'", raw))
    })
}

/// Values a sale against the product table.
///
/// `prior` is the stored sale being edited, if any; its date is kept.
pub fn value_sale(
    products: &[Entry<Product>],
    form: SaleForm,
    prior: Option<&Entry<Sale>>,
    now: DateTime<Utc>,
) -> Result<Sale> {
    if form.quantity <= 0 {
        return Err(SalesdeskError::validation(format!(
            "Quantity must be positive, got {}",
            form.quantity
        )));
    }
    let quantity = u32::try_from(form.quantity).map_err(|_| {
        SalesdeskError::validation(format!("Quantity {} is too large", form.quantity))
    })?;

    let payment_method = form.payment_method.trim();
    if payment_method.is_empty() {
        return Err(SalesdeskError::validation("Payment method is required"));
    }

    let product = products
        .iter()
        .find(|p| p.id == form.product_id)
        .ok_or(SalesdeskError::ProductNotFound(form.product_id))?;
    let total_value = product
        .data
        .price
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(|| {
            SalesdeskError::validation(format!(
                "Total for {} x {} is too large",
                quantity, product.data.name
            ))
        })?;

    Ok(Sale {
        client_id: form.client_id,
        product_id: form.product_id,
        quantity,
        total_value,
        payment_method: payment_method.to_string(),
        status: form.status,
        date: prior.map_or(now, |p| p.data.date),
    })
}

/// Builds the store write for a sale form: a create when `id` is `None`,
/// otherwise an update that keeps the stored sale's date.
pub fn sale_write(
    tables: &Tables,
    id: Option<RecordId>,
    form: SaleForm,
    now: DateTime<Utc>,
) -> Result<Write<Sale>> {
    let prior = match id {
        Some(id) => Some(
            tables
                .sales
                .iter()
                .find(|s| s.id == id)
                .ok_or(SalesdeskError::NotFound {
                    collection: Collection::Sales,
                    id,
                })?,
        ),
        None => None,
    };

    let sale = value_sale(&tables.products, form, prior, now)?;
    Ok(Write::from_optional_id(id, sale))
}
