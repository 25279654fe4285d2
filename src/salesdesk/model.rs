use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Integer identifier, unique within one collection.
pub type RecordId = u64;

/// The named tables the store manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Clients,
    Products,
    Sales,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Clients, Collection::Products, Collection::Sales];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Clients => "clients",
            Collection::Products => "products",
            Collection::Sales => "sales",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Legacy names are what older data directories were keyed by.
        match s.trim().to_lowercase().as_str() {
            "clients" | "clientes" => Ok(Collection::Clients),
            "products" | "produtos" => Ok(Collection::Products),
            "sales" | "vendas" => Ok(Collection::Sales),
            other => Err(format!("Unknown collection: {}", other)),
        }
    }
}

/// Whether money is settled. Shared by clients and sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(alias = "Pago")]
    Paid,
    #[serde(alias = "A pagar")]
    Pending,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Paid => f.write_str("Paid"),
            PaymentStatus::Pending => f.write_str("Pending"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paid" | "pago" => Ok(PaymentStatus::Paid),
            "pending" | "a pagar" | "a-pagar" => Ok(PaymentStatus::Pending),
            other => Err(format!(
                "Invalid status '{}' (expected Paid or Pending)",
                other
            )),
        }
    }
}

/// A stored record: the body plus the id the store assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<T> {
    pub id: RecordId,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Entry<T> {
    pub fn new(id: RecordId, data: T) -> Self {
        Self { id, data }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: Decimal,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub client_id: RecordId,
    pub product_id: RecordId,
    pub quantity: u32,
    /// Unit price times quantity, fixed when the sale is saved.
    pub total_value: Decimal,
    pub payment_method: String,
    pub status: PaymentStatus,
    /// Set on creation, carried forward on every edit.
    pub date: DateTime<Utc>,
}

/// In-memory contents of every collection, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tables {
    pub clients: Vec<Entry<Client>>,
    pub products: Vec<Entry<Product>>,
    pub sales: Vec<Entry<Sale>>,
}

impl Tables {
    pub fn len_of(&self, collection: Collection) -> usize {
        match collection {
            Collection::Clients => self.clients.len(),
            Collection::Products => self.products.len(),
            Collection::Sales => self.sales.len(),
        }
    }
}

/// A record body that lives in one of the store's collections.
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned {
    const COLLECTION: Collection;

    fn table(tables: &Tables) -> &Vec<Entry<Self>>;

    fn table_mut(tables: &mut Tables) -> &mut Vec<Entry<Self>>;

    /// Short human label used in command messages.
    fn label(&self) -> String;
}

impl Record for Client {
    const COLLECTION: Collection = Collection::Clients;

    fn table(tables: &Tables) -> &Vec<Entry<Self>> {
        &tables.clients
    }

    fn table_mut(tables: &mut Tables) -> &mut Vec<Entry<Self>> {
        &mut tables.clients
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl Record for Product {
    const COLLECTION: Collection = Collection::Products;

    fn table(tables: &Tables) -> &Vec<Entry<Self>> {
        &tables.products
    }

    fn table_mut(tables: &mut Tables) -> &mut Vec<Entry<Self>> {
        &mut tables.products
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl Record for Sale {
    const COLLECTION: Collection = Collection::Sales;

    fn table(tables: &Tables) -> &Vec<Entry<Self>> {
        &tables.sales
    }

    fn table_mut(tables: &mut Tables) -> &mut Vec<Entry<Self>> {
        &mut tables.sales
    }

    fn label(&self) -> String {
        format!("{} x product {}", self.quantity, self.product_id)
    }
}

/// What a save should do: append a new record or replace an existing one.
#[derive(Debug, Clone, PartialEq)]
pub enum Write<T> {
    Create(T),
    Update(RecordId, T),
}

impl<T> Write<T> {
    /// Builds a write from a form that may or may not carry an id.
    pub fn from_optional_id(id: Option<RecordId>, data: T) -> Self {
        match id {
            Some(id) => Write::Update(id, data),
            None => Write::Create(data),
        }
    }
}
