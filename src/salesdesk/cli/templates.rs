//! Templates for terminal output.
//!
//! Layout (column widths, truncation, padding) is computed in `render.rs`;
//! templates only arrange pre-sized text and pick styles by name.

/// Titled table of pre-padded cells. Each cell carries its own style and trailing gap.
pub const TABLE_TEMPLATE: &str = r#"{{ title | style("title") }}
{% if empty %}{{ empty_message | style("muted") }}
{% else %}{% for cell in header %}{{ cell.text | style("header") }}{{ cell.gap }}{% endfor %}
{% for row in rows %}{% for cell in row %}{{ cell.text | style(cell.style) }}{{ cell.gap }}{% endfor %}
{% endfor %}{% endif %}"#;

pub const DASHBOARD_TEMPLATE: &str = r#"{{ "Dashboard" | style("title") }}
{{ "Received    " | style("header") }}{{ total_received | style("money") }}
{{ "Receivable  " | style("header") }}{{ total_receivable | style("money") }}
{{ "Sales       " | style("header") }}{{ sale_count }}

{{ "Clients with pending payments" | style("header") }}
{% if outstanding %}{% for c in outstanding %}  {{ c.id | style("id") }}{{ c.name }}{{ c.contact | style("muted") }}
{% endfor %}{% else %}  {{ "None" | style("muted") }}
{% endif %}
{{ "Revenue by product" | style("header") }}
{% if revenue %}{% for r in revenue %}  {{ r.name }}{{ r.bar | style("bar") }} {{ r.total | style("money") }}
{% endfor %}{% else %}  {{ "No sales yet" | style("muted") }}
{% endif %}"#;

pub const REPORT_TEMPLATE: &str = r#"{{ "Sales Report" | style("title") }}
{{ generated | style("muted") }}

{% if empty %}{{ "No sales recorded." | style("muted") }}
{% else %}{% for cell in header %}{{ cell.text | style("header") }}{{ cell.gap }}{% endfor %}
{% for row in rows %}{% for cell in row %}{{ cell.text | style(cell.style) }}{{ cell.gap }}{% endfor %}
{% endfor %}{% endif %}
{{ "Total received    " | style("header") }}{{ total_received | style("money") }}
{{ "Total receivable  " | style("header") }}{{ total_receivable | style("money") }}"#;

pub const CONFIG_TEMPLATE: &str = r#"{% for entry in entries %}{{ entry.key | style("header") }} = {{ entry.value }}
{% endfor %}"#;

pub const MESSAGES_TEMPLATE: &str = r#"{% for message in messages %}{{ message.content | style(message.style) }}
{% endfor %}"#;
