use crate::auth::Credentials;
use crate::error::{Result, SalesdeskError};
use crate::model::Product;
use crate::store::Seed;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin";
const DEFAULT_CURRENCY: &str = "R$";

/// Configuration for salesdesk, stored in `<data-dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SalesdeskConfig {
    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,

    /// Symbol printed in front of money values
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Catalog written to the products collection the first time it is initialized
    #[serde(default = "default_products")]
    pub products: Vec<Product>,
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

fn default_password() -> String {
    DEFAULT_PASSWORD.to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_products() -> Vec<Product> {
    vec![
        Product::new("Basic Plan", Decimal::new(4990, 2)),
        Product::new("Pro Plan", Decimal::new(9990, 2)),
        Product::new("Consulting Hour", Decimal::new(15000, 2)),
        Product::new("Setup Fee", Decimal::new(25000, 2)),
    ]
}

impl Default for SalesdeskConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
            currency: default_currency(),
            products: default_products(),
        }
    }
}

/// A configuration key that can be changed from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Username,
    Password,
    Currency,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [ConfigKey::Username, ConfigKey::Password, ConfigKey::Currency];

    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::Username => "username",
            ConfigKey::Password => "password",
            ConfigKey::Currency => "currency",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == s)
    }
}

impl SalesdeskConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(SalesdeskError::Io)?;
        let config: SalesdeskConfig =
            serde_json::from_str(&content).map_err(SalesdeskError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(SalesdeskError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(SalesdeskError::Serialization)?;
        fs::write(config_path, content).map_err(SalesdeskError::Io)?;
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }

    pub fn seed(&self) -> Seed {
        Seed {
            products: self.products.clone(),
        }
    }

    pub fn get(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::Username => &self.username,
            ConfigKey::Password => &self.password,
            ConfigKey::Currency => &self.currency,
        }
    }

    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(SalesdeskError::validation(format!(
                "{} cannot be empty",
                key.name()
            )));
        }
        let slot = match key {
            ConfigKey::Username => &mut self.username,
            ConfigKey::Password => &mut self.password,
            ConfigKey::Currency => &mut self.currency,
        };
        *slot = value.to_string();
        Ok(())
    }
}
