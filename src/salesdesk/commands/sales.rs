use crate::aggregate::{client_name, resolve_sales};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SalesdeskError};
use crate::model::{Collection, Entry, PaymentStatus, RecordId, Sale};
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;
use crate::valuation::{sale_write, SaleForm};
use chrono::{DateTime, Utc};

/// Partial edit of a stored sale; `None` keeps the stored value.
///
/// There is no date field: a sale's date never changes after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalePatch {
    pub client_id: Option<RecordId>,
    pub product_id: Option<RecordId>,
    pub quantity: Option<i64>,
    pub payment_method: Option<String>,
    pub status: Option<PaymentStatus>,
}

impl SalePatch {
    fn apply(self, current: &Sale) -> SaleForm {
        SaleForm {
            client_id: self.client_id.unwrap_or(current.client_id),
            product_id: self.product_id.unwrap_or(current.product_id),
            quantity: self.quantity.unwrap_or(i64::from(current.quantity)),
            payment_method: self
                .payment_method
                .unwrap_or_else(|| current.payment_method.clone()),
            status: self.status.unwrap_or(current.status),
        }
    }
}

/// Sales joined with client and product names.
pub fn list<B: StorageBackend>(store: &RecordStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_sales(resolve_sales(store.tables())))
}

pub fn create<B: StorageBackend>(
    store: &mut RecordStore<B>,
    form: SaleForm,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let write = sale_write(store.tables(), None, form, now)?;
    let saved = store.save(write)?;
    Ok(saved_result(store, "Sale recorded", &saved))
}

pub fn update<B: StorageBackend>(
    store: &mut RecordStore<B>,
    id: RecordId,
    patch: SalePatch,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let current = store
        .get::<Sale>(id)
        .ok_or(SalesdeskError::NotFound {
            collection: Collection::Sales,
            id,
        })?;
    let form = patch.apply(&current.data);
    let write = sale_write(store.tables(), Some(id), form, now)?;
    let saved = store.save(write)?;
    Ok(saved_result(store, "Sale updated", &saved))
}

fn saved_result<B: StorageBackend>(
    store: &RecordStore<B>,
    verb: &str,
    saved: &Entry<Sale>,
) -> CmdResult {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} (#{}): total {}",
        verb, saved.id, saved.data.total_value
    )));
    if client_name(store.tables(), saved.data.client_id).is_none() {
        result.add_message(CmdMessage::warning(format!(
            "Client {} does not exist; the sale will show it as not found",
            saved.data.client_id
        )));
    }
    let rows = resolve_sales(store.tables())
        .into_iter()
        .filter(|row| row.id == saved.id)
        .collect();
    result.with_sales(rows)
}

pub fn delete<B: StorageBackend>(store: &mut RecordStore<B>, id: RecordId) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.remove::<Sale>(id)? {
        Some(removed) => result.add_message(CmdMessage::success(format!(
            "Sale deleted (#{}): total {}",
            removed.id, removed.data.total_value
        ))),
        None => result.add_message(CmdMessage::info(format!("No sale with id {}", id))),
    }
    Ok(result)
}

/// Drops every sale. Callers are responsible for confirming first.
pub fn clear<B: StorageBackend>(store: &mut RecordStore<B>) -> Result<CmdResult> {
    let count = store.clear::<Sale>()?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Cleared {} sale(s)",
        count
    ))))
}
