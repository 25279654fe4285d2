use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SalesdeskError};
use crate::model::{Client, Collection, PaymentStatus, RecordId, Write};
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

/// Client fields as submitted by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: PaymentStatus,
}

impl ClientForm {
    /// Checks required fields and returns the record to store.
    pub fn validate(self) -> Result<Client> {
        let name = required("name", &self.name)?;
        let email = required("email", &self.email)?;
        let phone = required("phone", &self.phone)?;
        if !email.contains('@') {
            return Err(SalesdeskError::validation(format!(
                "'{}' is not a valid email address",
                email
            )));
        }
        Ok(Client {
            name,
            email,
            phone,
            status: self.status,
        })
    }
}

/// Partial edit of a stored client; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<PaymentStatus>,
}

impl ClientPatch {
    fn apply(self, current: &Client) -> ClientForm {
        ClientForm {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            email: self.email.unwrap_or_else(|| current.email.clone()),
            phone: self.phone.unwrap_or_else(|| current.phone.clone()),
            status: self.status.unwrap_or(current.status),
        }
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SalesdeskError::validation(format!("Client {} is required", field)));
    }
    Ok(value.to_string())
}

pub fn list<B: StorageBackend>(store: &RecordStore<B>) -> Result<CmdResult> {
    let clients = store.all::<Client>().to_vec();
    Ok(CmdResult::default().with_clients(clients))
}

pub fn create<B: StorageBackend>(store: &mut RecordStore<B>, form: ClientForm) -> Result<CmdResult> {
    let client = form.validate()?;
    let saved = store.save(Write::Create(client))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Client added (#{}): {}",
        saved.id, saved.data.name
    )));
    Ok(result.with_clients(vec![saved]))
}

pub fn update<B: StorageBackend>(
    store: &mut RecordStore<B>,
    id: RecordId,
    patch: ClientPatch,
) -> Result<CmdResult> {
    let current = store
        .get::<Client>(id)
        .ok_or(SalesdeskError::NotFound {
            collection: Collection::Clients,
            id,
        })?;
    let client = patch.apply(&current.data).validate()?;
    let saved = store.save(Write::Update(id, client))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Client updated (#{}): {}",
        saved.id, saved.data.name
    )));
    Ok(result.with_clients(vec![saved]))
}

/// Removes a client. Its sales stay and will show the client as not found.
pub fn delete<B: StorageBackend>(store: &mut RecordStore<B>, id: RecordId) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.remove::<Client>(id)? {
        Some(removed) => {
            result.add_message(CmdMessage::success(format!(
                "Client deleted (#{}): {}",
                removed.id, removed.data.name
            )));
            let orphaned = store
                .tables()
                .sales
                .iter()
                .filter(|s| s.data.client_id == id)
                .count();
            if orphaned > 0 {
                result.add_message(CmdMessage::info(format!(
                    "{} sale(s) still reference this client",
                    orphaned
                )));
            }
        }
        None => result.add_message(CmdMessage::info(format!("No client with id {}", id))),
    }
    Ok(result)
}
