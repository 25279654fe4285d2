//! # Rendering Module
//!
//! Turns command results into terminal text with minijinja templates and the
//! `style` filter from [`super::styles`].
//!
//! Layout calculations (column widths, truncation, padding, bar lengths) stay
//! in Rust because they need Unicode-aware width handling. Templates only
//! arrange the pre-sized pieces and choose a style name for each.
//!
//! Rendering with `use_color = false` produces plain text, which is also what
//! `report --output` writes to disk.

use super::styles::{names, SALESDESK_THEME};
use super::templates::{
    CONFIG_TEMPLATE, DASHBOARD_TEMPLATE, MESSAGES_TEMPLATE, REPORT_TEMPLATE, TABLE_TEMPLATE,
};
use chrono::{DateTime, Local, Utc};
use minijinja::{Environment, Error, Value};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use salesdesk::aggregate::{Dashboard, SaleRow, CLIENT_NOT_FOUND, PRODUCT_NOT_FOUND};
use salesdesk::api::{CmdMessage, ConfigKey, MessageLevel, SalesReport};
use salesdesk::commands::config::display_value;
use salesdesk::commands::report::MISSING_CLIENT;
use salesdesk::config::SalesdeskConfig;
use salesdesk::model::{Client, Entry, PaymentStatus, Product};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const COLUMN_GAP: &str = "  ";
pub const BAR_WIDTH: usize = 30;
pub const BAR_CHAR: &str = "█";
const NAME_WIDTH: usize = 24;

/// Output settings shared by every render call.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub currency: String,
    pub use_color: bool,
}

impl RenderContext {
    pub fn new(currency: impl Into<String>, use_color: bool) -> Self {
        Self {
            currency: currency.into(),
            use_color,
        }
    }

    pub fn plain(&self) -> Self {
        Self {
            currency: self.currency.clone(),
            use_color: false,
        }
    }

    pub fn money(&self, value: Decimal) -> String {
        format!("{} {:.2}", self.currency, value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

struct Column {
    title: &'static str,
    max_width: usize,
    align: Align,
}

impl Column {
    const fn left(title: &'static str, max_width: usize) -> Self {
        Self {
            title,
            max_width,
            align: Align::Left,
        }
    }

    const fn right(title: &'static str, max_width: usize) -> Self {
        Self {
            title,
            max_width,
            align: Align::Right,
        }
    }
}

#[derive(Serialize)]
struct Cell {
    text: String,
    style: &'static str,
    gap: &'static str,
}

#[derive(Serialize)]
struct TableData {
    title: String,
    header: Vec<Cell>,
    rows: Vec<Vec<Cell>>,
    empty: bool,
    empty_message: String,
}

#[derive(Serialize)]
struct OutstandingLine {
    id: String,
    name: String,
    contact: String,
}

#[derive(Serialize)]
struct RevenueLine {
    name: String,
    bar: String,
    total: String,
}

#[derive(Serialize)]
struct DashboardData {
    total_received: String,
    total_receivable: String,
    sale_count: usize,
    outstanding: Vec<OutstandingLine>,
    revenue: Vec<RevenueLine>,
}

#[derive(Serialize)]
struct ReportData {
    generated: String,
    header: Vec<Cell>,
    rows: Vec<Vec<Cell>>,
    empty: bool,
    total_received: String,
    total_receivable: String,
}

#[derive(Serialize)]
struct ConfigEntry {
    key: String,
    value: String,
}

#[derive(Serialize)]
struct ConfigData {
    entries: Vec<ConfigEntry>,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

/// Renders a template string with the `style` filter bound to the theme.
pub fn render<T: Serialize>(template: &str, data: &T, use_color: bool) -> Result<String, Error> {
    let mut env = Environment::new();
    let theme = SALESDESK_THEME.clone();
    env.add_filter("style", move |value: Value, name: String| -> String {
        theme.apply(&name, &value.to_string(), use_color)
    });
    let mut output = env.render_str(template, data)?;
    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn render_or_report<T: Serialize>(template: &str, data: &T, use_color: bool) -> String {
    render(template, data, use_color).unwrap_or_else(|e| format!("Render error: {}\n", e))
}

pub fn render_client_list(clients: &[Entry<Client>], ctx: &RenderContext) -> String {
    let columns = [
        Column::right("ID", 6),
        Column::left("Name", NAME_WIDTH),
        Column::left("Email", 32),
        Column::left("Phone", 18),
        Column::left("Status", 8),
    ];
    let rows = clients
        .iter()
        .map(|c| {
            vec![
                (c.id.to_string(), names::ID),
                (c.data.name.clone(), names::HEADER),
                (c.data.email.clone(), names::MUTED),
                (c.data.phone.clone(), names::MUTED),
                (c.data.status.to_string(), status_style(c.data.status)),
            ]
        })
        .collect();
    let data = build_table("Clients", &columns, rows, "No clients yet.");
    render_or_report(TABLE_TEMPLATE, &data, ctx.use_color)
}

pub fn render_product_list(products: &[Entry<Product>], ctx: &RenderContext) -> String {
    let columns = [
        Column::right("ID", 6),
        Column::left("Name", 32),
        Column::right("Price", 16),
    ];
    let rows = products
        .iter()
        .map(|p| {
            vec![
                (p.id.to_string(), names::ID),
                (p.data.name.clone(), names::HEADER),
                (ctx.money(p.data.price), names::MONEY),
            ]
        })
        .collect();
    let data = build_table("Products", &columns, rows, "No products in the catalog.");
    render_or_report(TABLE_TEMPLATE, &data, ctx.use_color)
}

pub fn render_sale_list(sales: &[SaleRow], ctx: &RenderContext) -> String {
    let columns = [
        Column::right("ID", 6),
        Column::left("Date", 10),
        Column::left("Client", NAME_WIDTH),
        Column::left("Product", NAME_WIDTH),
        Column::right("Qty", 6),
        Column::right("Total", 16),
        Column::left("Payment", 14),
        Column::left("Status", 8),
    ];
    let rows = sales
        .iter()
        .map(|s| {
            vec![
                (s.id.to_string(), names::ID),
                (format_date(s.date), names::MUTED),
                (s.client_name.clone(), name_style(&s.client_name, CLIENT_NOT_FOUND)),
                (s.product_name.clone(), name_style(&s.product_name, PRODUCT_NOT_FOUND)),
                (s.quantity.to_string(), names::HEADER),
                (ctx.money(s.total_value), names::MONEY),
                (s.payment_method.clone(), names::MUTED),
                (s.status.to_string(), status_style(s.status)),
            ]
        })
        .collect();
    let data = build_table("Sales", &columns, rows, "No sales yet.");
    render_or_report(TABLE_TEMPLATE, &data, ctx.use_color)
}

pub fn render_dashboard(dashboard: &Dashboard, ctx: &RenderContext) -> String {
    let id_width = dashboard
        .outstanding_clients
        .iter()
        .map(|c| c.id.to_string().width())
        .max()
        .unwrap_or(0);
    let client_width = column_width(
        dashboard.outstanding_clients.iter().map(|c| c.data.name.as_str()),
        NAME_WIDTH,
    );
    let outstanding = dashboard
        .outstanding_clients
        .iter()
        .map(|c| OutstandingLine {
            id: pad(&c.id.to_string(), id_width + 1, Align::Left),
            name: pad(&truncate_to_width(&c.data.name, client_width), client_width, Align::Left)
                + COLUMN_GAP,
            contact: format!("{} / {}", c.data.email, c.data.phone),
        })
        .collect();

    let max_total = dashboard
        .revenue_by_product
        .iter()
        .map(|r| r.total)
        .max()
        .unwrap_or(Decimal::ZERO);
    let product_width = column_width(
        dashboard.revenue_by_product.iter().map(|r| r.name.as_str()),
        NAME_WIDTH,
    );
    let revenue = dashboard
        .revenue_by_product
        .iter()
        .map(|r| RevenueLine {
            name: pad(&truncate_to_width(&r.name, product_width), product_width, Align::Left)
                + COLUMN_GAP,
            bar: BAR_CHAR.repeat(bar_length(r.total, max_total)),
            total: ctx.money(r.total),
        })
        .collect();

    let data = DashboardData {
        total_received: ctx.money(dashboard.total_received),
        total_receivable: ctx.money(dashboard.total_receivable),
        sale_count: dashboard.sale_count,
        outstanding,
        revenue,
    };
    render_or_report(DASHBOARD_TEMPLATE, &data, ctx.use_color)
}

pub fn render_report(report: &SalesReport, ctx: &RenderContext) -> String {
    let columns = [
        Column::left("Client", NAME_WIDTH),
        Column::left("Date", 10),
        Column::left("Status", 8),
        Column::right("Value", 16),
    ];
    let rows = report
        .rows
        .iter()
        .map(|r| {
            vec![
                (r.client.clone(), name_style(&r.client, MISSING_CLIENT)),
                (format_date(r.date), names::MUTED),
                (r.status.to_string(), status_style(r.status)),
                (ctx.money(r.value), names::MONEY),
            ]
        })
        .collect();
    let table = build_table("", &columns, rows, "");

    let data = ReportData {
        generated: format!(
            "Generated {}",
            report
                .generated_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
        ),
        header: table.header,
        rows: table.rows,
        empty: table.empty,
        total_received: ctx.money(report.total_received),
        total_receivable: ctx.money(report.total_receivable),
    };
    render_or_report(REPORT_TEMPLATE, &data, ctx.use_color)
}

pub fn render_config(config: &SalesdeskConfig, ctx: &RenderContext) -> String {
    let mut entries: Vec<ConfigEntry> = ConfigKey::ALL
        .iter()
        .map(|key| ConfigEntry {
            key: key.name().to_string(),
            value: display_value(config, *key),
        })
        .collect();
    entries.push(ConfigEntry {
        key: "products".to_string(),
        value: format!("{} seed product(s)", config.products.len()),
    });

    let key_width = entries.iter().map(|e| e.key.width()).max().unwrap_or(0);
    for entry in &mut entries {
        entry.key = pad(&entry.key, key_width, Align::Left);
    }
    render_or_report(CONFIG_TEMPLATE, &ConfigData { entries }, ctx.use_color)
}

/// Renders command messages, one per line, styled by level.
pub fn render_messages(messages: &[CmdMessage], ctx: &RenderContext) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let data = MessagesData {
        messages: messages
            .iter()
            .map(|m| MessageData {
                content: m.content.clone(),
                style: message_style(&m.level),
            })
            .collect(),
    };
    render(MESSAGES_TEMPLATE, &data, ctx.use_color).unwrap_or_else(|_| {
        messages
            .iter()
            .map(|m| format!("{}\n", m.content))
            .collect()
    })
}

pub fn print_messages(messages: &[CmdMessage], ctx: &RenderContext) {
    print!("{}", render_messages(messages, ctx));
}

fn build_table(
    title: &str,
    columns: &[Column],
    rows: Vec<Vec<(String, &'static str)>>,
    empty_message: &str,
) -> TableData {
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let widest = rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|(text, _)| text.width())
                .chain(std::iter::once(col.title.width()))
                .max()
                .unwrap_or(0);
            widest.min(col.max_width.max(col.title.width()))
        })
        .collect();

    let last = columns.len().saturating_sub(1);
    let cell = |i: usize, text: &str, style: &'static str| {
        let fitted = truncate_to_width(text, widths[i]);
        let text = if i == last && columns[i].align == Align::Left {
            fitted
        } else {
            pad(&fitted, widths[i], columns[i].align)
        };
        Cell {
            text,
            style,
            gap: if i == last { "" } else { COLUMN_GAP },
        }
    };

    let header = columns
        .iter()
        .enumerate()
        .map(|(i, col)| cell(i, col.title, names::HEADER))
        .collect();
    let empty = rows.is_empty();
    let rows = rows
        .into_iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(i, (text, style))| cell(i, text, *style))
                .collect()
        })
        .collect();

    TableData {
        title: title.to_string(),
        header,
        rows,
        empty,
        empty_message: empty_message.to_string(),
    }
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, max_width: usize) -> usize {
    values.map(|v| v.width()).max().unwrap_or(0).min(max_width)
}

fn bar_length(value: Decimal, max: Decimal) -> usize {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return 0;
    }
    let Some(share) = value.checked_div(max) else {
        return 0;
    };
    let scaled = (share.min(Decimal::ONE) * Decimal::from(BAR_WIDTH)).round();
    scaled.to_usize().unwrap_or(0).max(1)
}

fn status_style(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Paid => names::PAID,
        PaymentStatus::Pending => names::PENDING,
    }
}

fn name_style(name: &str, placeholder: &str) -> &'static str {
    if name == placeholder {
        names::PLACEHOLDER
    } else {
        names::HEADER
    }
}

fn message_style(level: &MessageLevel) -> &'static str {
    match level {
        MessageLevel::Info => names::INFO,
        MessageLevel::Success => names::SUCCESS,
        MessageLevel::Warning => names::WARNING,
        MessageLevel::Error => names::ERROR,
    }
}

fn format_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    match align {
        Align::Left => format!("{}{}", text, fill),
        Align::Right => format!("{}{}", fill, text),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
