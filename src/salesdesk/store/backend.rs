use crate::auth::Session;
use crate::error::Result;
use crate::model::Collection;
use serde_json::Value;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while RecordStore handles the "what" (ids, ordering, seeding).
pub trait StorageBackend {
    // --- Collection Operations ---

    /// Load every record of a collection, in stored order.
    /// Returns Ok(None) if the collection was never written (first run).
    fn load_collection(&self, collection: Collection) -> Result<Option<Vec<Value>>>;

    /// Replace the persisted contents of a collection.
    /// MUST be atomic: readers see either the old or the new contents.
    fn save_collection(&self, collection: Collection, records: &[Value]) -> Result<()>;

    // --- Session Operations ---

    fn load_session(&self) -> Result<Option<Session>>;

    fn save_session(&self, session: &Session) -> Result<()>;

    /// Remove the session. Not an error if there is none.
    fn clear_session(&self) -> Result<()>;
}
