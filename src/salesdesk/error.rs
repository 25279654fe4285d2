use crate::model::{Collection, RecordId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalesdeskError {
    #[error("No record with id {id} in {collection}")]
    NotFound {
        collection: Collection,
        id: RecordId,
    },

    #[error("Product not found: {0}")]
    ProductNotFound(RecordId),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not logged in. Run `salesdesk login <user> <password>` first")]
    NotAuthenticated,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl SalesdeskError {
    pub fn validation(msg: impl Into<String>) -> Self {
        SalesdeskError::Validation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SalesdeskError>;
