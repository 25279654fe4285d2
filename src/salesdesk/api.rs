//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every salesdesk operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Gates** data access behind a login session
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (collection names, the current time)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O with the user**: No stdout, stderr, or prompts
//! - **Confirmation**: destructive calls such as [`SalesdeskApi::clear_sales`]
//!   run immediately; asking the user first is the caller's job
//!
//! ## Generic Over StorageBackend
//!
//! `SalesdeskApi<B: StorageBackend>`:
//! - Production: `SalesdeskApi<FsBackend>`
//! - Testing: `SalesdeskApi<MemBackend>`

use crate::auth::{self, Credentials};
use crate::commands;
use crate::config::SalesdeskConfig;
use crate::error::Result;
use crate::model::{Client, Entry, RecordId};
use crate::store::backend::StorageBackend;
use crate::store::{RecordStore, Seed};
use crate::valuation::SaleForm;
use chrono::Utc;
use std::path::{Path, PathBuf};

/// The main API facade for salesdesk operations.
pub struct SalesdeskApi<B: StorageBackend> {
    store: RecordStore<B>,
    credentials: Credentials,
    seed: Seed,
    data_dir: PathBuf,
}

impl<B: StorageBackend> SalesdeskApi<B> {
    pub fn open(backend: B, config: &SalesdeskConfig, data_dir: PathBuf) -> Result<Self> {
        let seed = config.seed();
        let store = RecordStore::open(backend, &seed)?;
        Ok(Self {
            store,
            credentials: config.credentials(),
            seed,
            data_dir,
        })
    }

    fn guard(&self) -> Result<()> {
        auth::require_session(self.store.backend()).map(|_| ())
    }

    // --- Session ---

    pub fn is_authenticated(&self) -> Result<bool> {
        auth::is_authenticated(self.store.backend())
    }

    pub fn login(&self, username: &str, password: &str) -> Result<commands::CmdResult> {
        commands::session::login(self.store.backend(), &self.credentials, username, password)
    }

    pub fn logout(&self) -> Result<commands::CmdResult> {
        commands::session::logout(self.store.backend())
    }

    pub fn whoami(&self) -> Result<commands::CmdResult> {
        commands::session::whoami(self.store.backend())
    }

    // --- Store ---

    pub fn init(&mut self) -> Result<commands::CmdResult> {
        self.guard()?;
        commands::init::run(&mut self.store, &self.seed)
    }

    // --- Clients ---

    pub fn list_clients(&self) -> Result<commands::CmdResult> {
        self.guard()?;
        commands::clients::list(&self.store)
    }

    pub fn get_client(&self, id: RecordId) -> Result<Option<Entry<Client>>> {
        self.guard()?;
        Ok(self.store.get::<Client>(id).cloned())
    }

    pub fn create_client(&mut self, form: ClientForm) -> Result<commands::CmdResult> {
        self.guard()?;
        commands::clients::create(&mut self.store, form)
    }

    pub fn update_client(
        &mut self,
        id: RecordId,
        patch: ClientPatch,
    ) -> Result<commands::CmdResult> {
        self.guard()?;
        commands::clients::update(&mut self.store, id, patch)
    }

    pub fn delete_client(&mut self, id: RecordId) -> Result<commands::CmdResult> {
        self.guard()?;
        commands::clients::delete(&mut self.store, id)
    }

    // --- Products ---

    pub fn list_products(&self) -> Result<commands::CmdResult> {
        self.guard()?;
        commands::products::list(&self.store)
    }

    // --- Sales ---

    pub fn list_sales(&self) -> Result<commands::CmdResult> {
        self.guard()?;
        commands::sales::list(&self.store)
    }

    pub fn create_sale(&mut self, form: SaleForm) -> Result<commands::CmdResult> {
        self.guard()?;
        commands::sales::create(&mut self.store, form, Utc::now())
    }

    pub fn update_sale(&mut self, id: RecordId, patch: SalePatch) -> Result<commands::CmdResult> {
        self.guard()?;
        commands::sales::update(&mut self.store, id, patch, Utc::now())
    }

    pub fn delete_sale(&mut self, id: RecordId) -> Result<commands::CmdResult> {
        self.guard()?;
        commands::sales::delete(&mut self.store, id)
    }

    pub fn clear_sales(&mut self) -> Result<commands::CmdResult> {
        self.guard()?;
        commands::sales::clear(&mut self.store)
    }

    /// Empties a collection by name. Unknown names change nothing.
    pub fn clear_collection(&mut self, name: &str) -> Result<commands::CmdResult> {
        self.guard()?;
        let message = match self.store.clear_named(name)? {
            Some(count) => {
                CmdMessage::success(format!("Cleared {} record(s) from {}", count, name))
            }
            None => CmdMessage::warning(format!("Unknown collection '{}'; nothing cleared", name)),
        };
        Ok(commands::CmdResult::default().with_message(message))
    }

    /// Removes one record by collection name. Unknown names and absent ids change nothing.
    pub fn remove_from_collection(
        &mut self,
        name: &str,
        id: RecordId,
    ) -> Result<commands::CmdResult> {
        self.guard()?;
        let message = if self.store.remove_named(name, id)? {
            CmdMessage::success(format!("Removed #{} from {}", id, name))
        } else {
            CmdMessage::info(format!("Nothing to remove for #{} in {}", id, name))
        };
        Ok(commands::CmdResult::default().with_message(message))
    }

    /// Number of records a collection holds, or `None` for an unknown name.
    pub fn collection_len(&self, name: &str) -> Result<Option<usize>> {
        self.guard()?;
        Ok(self.store.len_named(name))
    }

    // --- Derived views ---

    pub fn dashboard(&self) -> Result<commands::CmdResult> {
        self.guard()?;
        commands::dashboard::run(&self.store)
    }

    pub fn report(&self) -> Result<commands::CmdResult> {
        self.guard()?;
        commands::report::run(&self.store, Utc::now())
    }

    // --- Configuration ---

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        self.guard()?;
        commands::config::run(&self.data_dir, action)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

pub use crate::commands::clients::{ClientForm, ClientPatch};
pub use crate::commands::config::ConfigAction;
pub use crate::commands::report::{ReportRow, SalesReport};
pub use crate::commands::sales::SalePatch;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
pub use crate::config::ConfigKey;
