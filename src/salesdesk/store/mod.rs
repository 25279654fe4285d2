//! # Storage Layer
//!
//! [`RecordStore`] is the single owner of all collection state. It keeps the
//! three tables (clients, products, sales) in memory and writes a collection
//! through to its [`backend::StorageBackend`] after every mutation.
//!
//! ## Record Contract
//!
//! Every collection follows the same rules:
//! - Records keep insertion order; listing returns them as stored.
//! - New records get `max(existing id) + 1`, or `1` for an empty table.
//! - An update replaces the record in place, so its position never moves.
//! - Removing an absent id is a no-op, not an error.
//! - Nothing cascades: a sale keeps its `client_id` after the client is gone.
//!
//! ## Write Path
//!
//! Mutations build the new table on the side, persist it, and only then swap
//! it in. If the backend fails, memory still matches what is on disk.
//!
//! ## Initialization
//!
//! [`RecordStore::open`] loads each collection from the backend. A collection
//! the backend has never seen is seeded from the [`Seed`] fixture and
//! persisted right away, so a second open loads instead of seeding again.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: JSON files in the data directory.
//! - [`mem_backend::MemBackend`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data-dir>/
//! ├── clients.json     # [{ "id": 1, "name": ..., "status": "Paid" }, ...]
//! ├── products.json
//! ├── sales.json
//! ├── session.json     # Present while logged in
//! └── config.json
//! ```

use crate::error::{Result, SalesdeskError};
use crate::model::{Client, Collection, Entry, Product, Record, RecordId, Sale, Tables, Write};
use backend::StorageBackend;
use serde_json::Value;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

/// Initial contents for collections that have never been persisted.
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub products: Vec<Product>,
}

/// What `init` did for each collection.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InitReport {
    pub seeded: Vec<Collection>,
    pub loaded: Vec<Collection>,
}

pub struct RecordStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    tables: Tables,
}

impl<B: StorageBackend> RecordStore<B> {
    /// Opens the store, loading persisted state or seeding a fresh one.
    pub fn open(backend: B, seed: &Seed) -> Result<Self> {
        let mut store = Self {
            backend,
            tables: Tables::default(),
        };
        store.init(seed)?;
        Ok(store)
    }

    /// Loads every collection from the backend, seeding the ones that are missing.
    ///
    /// Safe to call repeatedly: once a collection is persisted it is only ever loaded.
    pub fn init(&mut self, seed: &Seed) -> Result<InitReport> {
        for product in &seed.products {
            if product.price.is_sign_negative() {
                return Err(SalesdeskError::validation(format!(
                    "Seed product '{}' has a negative price",
                    product.name
                )));
            }
        }

        let mut report = InitReport::default();
        let clients = self.load_or_seed::<Client>(Vec::new(), &mut report)?;
        let products = self.load_or_seed::<Product>(seed.products.clone(), &mut report)?;
        let sales = self.load_or_seed::<Sale>(Vec::new(), &mut report)?;
        self.tables = Tables {
            clients,
            products,
            sales,
        };

        tracing::debug!(seeded = ?report.seeded, loaded = ?report.loaded, "store initialized");
        Ok(report)
    }

    fn load_or_seed<T: Record>(
        &self,
        fixture: Vec<T>,
        report: &mut InitReport,
    ) -> Result<Vec<Entry<T>>> {
        match self.backend.load_collection(T::COLLECTION)? {
            Some(values) => {
                report.loaded.push(T::COLLECTION);
                values
                    .into_iter()
                    .map(|v| serde_json::from_value(v).map_err(SalesdeskError::Serialization))
                    .collect()
            }
            None => {
                let entries: Vec<Entry<T>> = fixture
                    .into_iter()
                    .zip(1..)
                    .map(|(data, id)| Entry::new(id, data))
                    .collect();
                self.persist(&entries)?;
                report.seeded.push(T::COLLECTION);
                tracing::info!(collection = %T::COLLECTION, records = entries.len(), "seeded collection");
                Ok(entries)
            }
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// All records of a collection, in insertion order.
    pub fn all<T: Record>(&self) -> &[Entry<T>] {
        T::table(&self.tables)
    }

    pub fn get<T: Record>(&self, id: RecordId) -> Option<&Entry<T>> {
        T::table(&self.tables).iter().find(|e| e.id == id)
    }

    pub fn len(&self, collection: Collection) -> usize {
        self.tables.len_of(collection)
    }

    pub fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection) == 0
    }

    /// Creates or replaces a record and persists its collection.
    ///
    /// Updating an id that is not stored fails with `NotFound` and writes nothing.
    pub fn save<T: Record>(&mut self, write: Write<T>) -> Result<Entry<T>> {
        let mut table = T::table(&self.tables).clone();

        let entry = match write {
            Write::Create(data) => {
                let entry = Entry::new(next_id(&table), data);
                table.push(entry.clone());
                entry
            }
            Write::Update(id, data) => {
                let slot = table
                    .iter_mut()
                    .find(|e| e.id == id)
                    .ok_or(SalesdeskError::NotFound {
                        collection: T::COLLECTION,
                        id,
                    })?;
                slot.data = data;
                slot.clone()
            }
        };

        self.commit(table)?;
        tracing::debug!(collection = %T::COLLECTION, id = entry.id, "saved record");
        Ok(entry)
    }

    /// Deletes a record if present. Returns the removed record, or `None` if
    /// there was nothing to remove.
    pub fn remove<T: Record>(&mut self, id: RecordId) -> Result<Option<Entry<T>>> {
        let mut table = T::table(&self.tables).clone();
        let Some(pos) = table.iter().position(|e| e.id == id) else {
            return Ok(None);
        };
        let removed = table.remove(pos);

        self.commit(table)?;
        tracing::debug!(collection = %T::COLLECTION, id, "removed record");
        Ok(Some(removed))
    }

    /// Irreversibly empties one collection. Returns how many records were dropped.
    ///
    /// The store does not ask for confirmation; callers must.
    pub fn clear<T: Record>(&mut self) -> Result<usize> {
        let count = T::table(&self.tables).len();
        self.commit::<T>(Vec::new())?;
        tracing::info!(collection = %T::COLLECTION, records = count, "cleared collection");
        Ok(count)
    }

    /// Name-based removal. An unknown collection name is a no-op returning `false`.
    pub fn remove_named(&mut self, collection: &str, id: RecordId) -> Result<bool> {
        let Some(collection) = resolve_name(collection) else {
            return Ok(false);
        };
        let removed = match collection {
            Collection::Clients => self.remove::<Client>(id)?.is_some(),
            Collection::Products => self.remove::<Product>(id)?.is_some(),
            Collection::Sales => self.remove::<Sale>(id)?.is_some(),
        };
        Ok(removed)
    }

    /// Name-based clear. Returns `None` for an unknown collection name.
    pub fn clear_named(&mut self, collection: &str) -> Result<Option<usize>> {
        let Some(collection) = resolve_name(collection) else {
            return Ok(None);
        };
        let count = match collection {
            Collection::Clients => self.clear::<Client>()?,
            Collection::Products => self.clear::<Product>()?,
            Collection::Sales => self.clear::<Sale>()?,
        };
        Ok(Some(count))
    }

    /// Name-based length. Returns `None` for an unknown collection name.
    pub fn len_named(&self, collection: &str) -> Option<usize> {
        resolve_name(collection).map(|c| self.len(c))
    }

    fn commit<T: Record>(&mut self, table: Vec<Entry<T>>) -> Result<()> {
        self.persist(&table)?;
        *T::table_mut(&mut self.tables) = table;
        Ok(())
    }

    fn persist<T: Record>(&self, table: &[Entry<T>]) -> Result<()> {
        let values = table
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<Value>, _>>()
            .map_err(SalesdeskError::Serialization)?;
        self.backend.save_collection(T::COLLECTION, &values)
    }
}

fn next_id<T>(table: &[Entry<T>]) -> RecordId {
    table.iter().map(|e| e.id).max().map_or(1, |max| max + 1)
}

fn resolve_name(name: &str) -> Option<Collection> {
    match name.parse::<Collection>() {
        Ok(collection) => Some(collection),
        Err(e) => {
            tracing::warn!("{}; ignoring", e);
            None
        }
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::mem_backend::MemBackend;
    use super::*;
    use crate::model::PaymentStatus;
    use chrono::Utc;
    use rust_decimal::Decimal;

    pub struct StoreFixture {
        pub store: RecordStore<MemBackend>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: RecordStore::open(MemBackend::new(), &Seed::default()).unwrap(),
            }
        }

        pub fn with_product(mut self, name: &str, price: Decimal) -> Self {
            self.store
                .save(Write::Create(Product::new(name, price)))
                .unwrap();
            self
        }

        pub fn with_client(mut self, name: &str, status: PaymentStatus) -> Self {
            let client = Client {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                phone: "555-0100".to_string(),
                status,
            };
            self.store.save(Write::Create(client)).unwrap();
            self
        }

        /// Adds a sale with an explicit total, bypassing valuation.
        pub fn with_sale(
            mut self,
            client_id: RecordId,
            product_id: RecordId,
            total_value: Decimal,
            status: PaymentStatus,
        ) -> Self {
            let sale = Sale {
                client_id,
                product_id,
                quantity: 1,
                total_value,
                payment_method: "Cash".to_string(),
                status,
                date: Utc::now(),
            };
            self.store.save(Write::Create(sale)).unwrap();
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::mem_backend::MemBackend;
    use super::*;
    use crate::model::PaymentStatus;
    use rust_decimal_macros::dec;

    fn client(name: &str) -> Client {
        Client {
            name: name.to_string(),
            email: format!("{}@example.com", name),
            phone: "1".to_string(),
            status: PaymentStatus::Pending,
        }
    }

    #[test]
    fn first_id_is_one_and_ids_increase() {
        let mut store = StoreFixture::new().store;
        let a = store.save(Write::Create(client("a"))).unwrap();
        let b = store.save(Write::Create(client("b"))).unwrap();
        let c = store.save(Write::Create(client("c"))).unwrap();
        assert_eq!((a.id, b.id, c.id), (1, 2, 3));
    }

    #[test]
    fn next_id_follows_max_not_count() {
        let mut store = StoreFixture::new().store;
        for name in ["a", "b", "c"] {
            store.save(Write::Create(client(name))).unwrap();
        }
        store.remove::<Client>(1).unwrap();
        store.remove::<Client>(2).unwrap();

        let d = store.save(Write::Create(client("d"))).unwrap();
        assert_eq!(d.id, 4);
    }

    #[test]
    fn ids_restart_at_one_after_clear() {
        let mut store = StoreFixture::new().store;
        store.save(Write::Create(client("a"))).unwrap();
        store.clear::<Client>().unwrap();

        let b = store.save(Write::Create(client("b"))).unwrap();
        assert_eq!(b.id, 1);
    }

    #[test]
    fn update_keeps_length_and_position() {
        let mut store = StoreFixture::new().store;
        for name in ["a", "b", "c"] {
            store.save(Write::Create(client(name))).unwrap();
        }

        store.save(Write::Update(2, client("bee"))).unwrap();

        let names: Vec<_> = store
            .all::<Client>()
            .iter()
            .map(|e| e.data.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "bee", "c"]);
        assert_eq!(store.get::<Client>(2).unwrap().data.name, "bee");
    }

    #[test]
    fn update_of_missing_id_is_not_found_and_writes_nothing() {
        let mut store = StoreFixture::new().store;
        let writes = store.backend.write_count();

        let err = store.save(Write::Update(9, client("x"))).unwrap_err();
        assert!(matches!(
            err,
            SalesdeskError::NotFound {
                collection: Collection::Clients,
                id: 9
            }
        ));
        assert!(store.is_empty(Collection::Clients));
        assert_eq!(store.backend.write_count(), writes);
    }

    #[test]
    fn remove_then_get_is_absent() {
        let mut store = StoreFixture::new().with_client("Ana", PaymentStatus::Paid).store;
        let removed = store.remove::<Client>(1).unwrap();
        assert_eq!(removed.unwrap().data.name, "Ana");
        assert!(store.get::<Client>(1).is_none());
    }

    #[test]
    fn remove_of_absent_id_is_noop() {
        let mut store = StoreFixture::new().with_client("Ana", PaymentStatus::Paid).store;
        let writes = store.backend.write_count();

        assert!(store.remove::<Client>(42).unwrap().is_none());
        assert_eq!(store.len(Collection::Clients), 1);
        assert_eq!(store.backend.write_count(), writes);
    }

    #[test]
    fn removing_client_keeps_its_sales() {
        let mut store = StoreFixture::new()
            .with_product("Widget", dec!(10))
            .with_client("Ana", PaymentStatus::Pending)
            .with_sale(1, 1, dec!(30), PaymentStatus::Paid)
            .store;

        store.remove::<Client>(1).unwrap();

        assert_eq!(store.all::<Sale>().len(), 1);
        assert_eq!(store.all::<Sale>()[0].data.client_id, 1);
    }

    #[test]
    fn mutations_are_persisted() {
        let mut store = StoreFixture::new().store;
        store.save(Write::Create(client("a"))).unwrap();

        let persisted = store.backend.persisted(Collection::Clients).unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0]["id"], 1);
        assert_eq!(persisted[0]["name"], "a");

        store.clear::<Client>().unwrap();
        assert!(store.backend.persisted(Collection::Clients).unwrap().is_empty());
    }

    #[test]
    fn failed_write_leaves_memory_unchanged() {
        let mut store = StoreFixture::new().with_client("Ana", PaymentStatus::Paid).store;
        store.backend.set_simulate_write_error(true);

        assert!(store.save(Write::Create(client("b"))).is_err());
        assert!(store.remove::<Client>(1).is_err());
        assert!(store.clear::<Client>().is_err());
        assert_eq!(store.len(Collection::Clients), 1);
    }

    #[test]
    fn unknown_collection_names_are_noops() {
        let mut store = StoreFixture::new().with_client("Ana", PaymentStatus::Paid).store;

        assert!(!store.remove_named("invoices", 1).unwrap());
        assert_eq!(store.clear_named("invoices").unwrap(), None);
        assert_eq!(store.len(Collection::Clients), 1);
    }

    #[test]
    fn named_operations_dispatch_to_collection() {
        let mut store = StoreFixture::new()
            .with_client("Ana", PaymentStatus::Paid)
            .with_client("Bia", PaymentStatus::Paid)
            .store;

        assert!(store.remove_named("clientes", 1).unwrap());
        assert_eq!(store.clear_named("clients").unwrap(), Some(1));
        assert!(store.is_empty(Collection::Clients));
    }

    #[test]
    fn open_seeds_then_loads() {
        let seed = Seed {
            products: vec![Product::new("Widget", dec!(10.00))],
        };
        let mut store = RecordStore::open(MemBackend::new(), &seed).unwrap();
        assert_eq!(store.all::<Product>()[0].id, 1);
        store.save(Write::Create(client("a"))).unwrap();

        // Second init on the same backend must not reseed or drop anything.
        let other_seed = Seed {
            products: vec![Product::new("Other", dec!(1))],
        };
        let report = store.init(&other_seed).unwrap();
        assert!(report.seeded.is_empty());
        assert_eq!(report.loaded.len(), 3);
        assert_eq!(store.all::<Product>().len(), 1);
        assert_eq!(store.all::<Product>()[0].data.name, "Widget");
        assert_eq!(store.all::<Client>().len(), 1);
    }

    #[test]
    fn seed_rejects_negative_price() {
        let seed = Seed {
            products: vec![Product::new("Refund", dec!(-1))],
        };
        let err = RecordStore::open(MemBackend::new(), &seed).err().unwrap();
        assert!(matches!(err, SalesdeskError::Validation(_)));
    }
}
