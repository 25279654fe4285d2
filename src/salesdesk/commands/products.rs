use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Product;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

/// Products are read-only here: they come from the seed catalog.
pub fn list<B: StorageBackend>(store: &RecordStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_products(store.all::<Product>().to_vec()))
}
