use super::backend::StorageBackend;
use crate::auth::Session;
use crate::error::{Result, SalesdeskError};
use crate::model::Collection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const SESSION_FILENAME: &str = "session.json";

/// File-based backend: one JSON document per collection under `root`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.root.join(format!("{}.json", collection.name()))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(SalesdeskError::Io)?;
        }
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(SalesdeskError::Io)?;
        let value = serde_json::from_str(&content).map_err(SalesdeskError::Serialization)?;
        Ok(Some(value))
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(value).map_err(SalesdeskError::Serialization)?;

        // Atomic Write
        let tmp_path = self.root.join(format!(".write-{}.tmp", Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp_path, content).and_then(|_| fs::rename(&tmp_path, path)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(SalesdeskError::Io(e));
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_collection(&self, collection: Collection) -> Result<Option<Vec<Value>>> {
        self.read_json(&self.collection_path(collection))
    }

    fn save_collection(&self, collection: Collection, records: &[Value]) -> Result<()> {
        self.write_json(&self.collection_path(collection), records)
    }

    fn load_session(&self) -> Result<Option<Session>> {
        self.read_json(&self.root.join(SESSION_FILENAME))
    }

    fn save_session(&self, session: &Session) -> Result<()> {
        self.write_json(&self.root.join(SESSION_FILENAME), session)
    }

    fn clear_session(&self) -> Result<()> {
        let path = self.root.join(SESSION_FILENAME);
        if path.exists() {
            fs::remove_file(path).map_err(SalesdeskError::Io)?;
        }
        Ok(())
    }
}
