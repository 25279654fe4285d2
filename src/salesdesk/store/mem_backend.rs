use super::backend::StorageBackend;
use crate::auth::Session;
use crate::error::{Result, SalesdeskError};
use crate::model::Collection;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since salesdesk is single-threaded,
/// which lets the `StorageBackend` trait take `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    collections: RefCell<HashMap<Collection, Vec<Value>>>,
    session: RefCell<Option<Session>>,
    simulate_write_error: RefCell<bool>,
    writes: RefCell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Number of successful collection writes so far.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }

    /// Raw persisted records of a collection, as a durable store would hold them.
    pub fn persisted(&self, collection: Collection) -> Option<Vec<Value>> {
        self.collections.borrow().get(&collection).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn load_collection(&self, collection: Collection) -> Result<Option<Vec<Value>>> {
        Ok(self.collections.borrow().get(&collection).cloned())
    }

    fn save_collection(&self, collection: Collection, records: &[Value]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(SalesdeskError::Store("Simulated write error".to_string()));
        }
        self.collections
            .borrow_mut()
            .insert(collection, records.to_vec());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }

    fn load_session(&self) -> Result<Option<Session>> {
        Ok(self.session.borrow().clone())
    }

    fn save_session(&self, session: &Session) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(SalesdeskError::Store("Simulated write error".to_string()));
        }
        *self.session.borrow_mut() = Some(session.clone());
        Ok(())
    }

    fn clear_session(&self) -> Result<()> {
        *self.session.borrow_mut() = None;
        Ok(())
    }
}
