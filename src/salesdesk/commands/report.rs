use crate::aggregate::{client_name, total_receivable, total_received};
use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::PaymentStatus;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Client label used in the report when the client no longer exists.
pub const MISSING_CLIENT: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub client: String,
    pub date: DateTime<Utc>,
    pub status: PaymentStatus,
    pub value: Decimal,
}

/// Printable summary of every sale with the received/receivable totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesReport {
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<ReportRow>,
    pub total_received: Decimal,
    pub total_receivable: Decimal,
}

pub fn run<B: StorageBackend>(store: &RecordStore<B>, now: DateTime<Utc>) -> Result<CmdResult> {
    let tables = store.tables();
    let rows = tables
        .sales
        .iter()
        .map(|sale| ReportRow {
            client: client_name(tables, sale.data.client_id)
                .unwrap_or(MISSING_CLIENT)
                .to_string(),
            date: sale.data.date,
            status: sale.data.status,
            value: sale.data.total_value,
        })
        .collect();

    let report = SalesReport {
        generated_at: now,
        rows,
        total_received: total_received(tables),
        total_receivable: total_receivable(tables),
    };
    Ok(CmdResult::default().with_report(report))
}
