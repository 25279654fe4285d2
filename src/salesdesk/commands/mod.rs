use crate::aggregate::{Dashboard, SaleRow};
use crate::config::SalesdeskConfig;
use crate::model::{Client, Entry, Product};
use report::SalesReport;

pub mod clients;
pub mod config;
pub mod dashboard;
pub mod init;
pub mod products;
pub mod report;
pub mod sales;
pub mod session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub clients: Vec<Entry<Client>>,
    pub products: Vec<Entry<Product>>,
    pub sales: Vec<SaleRow>,
    pub dashboard: Option<Dashboard>,
    pub report: Option<SalesReport>,
    pub config: Option<SalesdeskConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_clients(mut self, clients: Vec<Entry<Client>>) -> Self {
        self.clients = clients;
        self
    }

    pub fn with_products(mut self, products: Vec<Entry<Product>>) -> Self {
        self.products = products;
        self
    }

    pub fn with_sales(mut self, sales: Vec<SaleRow>) -> Self {
        self.sales = sales;
        self
    }

    pub fn with_dashboard(mut self, dashboard: Dashboard) -> Self {
        self.dashboard = Some(dashboard);
        self
    }

    pub fn with_report(mut self, report: SalesReport) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_config(mut self, config: SalesdeskConfig) -> Self {
        self.config = Some(config);
        self
    }
}
