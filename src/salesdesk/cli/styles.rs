use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Shown in front of text whose style name is not registered, so template typos are visible.
pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// Style names used by the templates.
pub mod names {
    pub const TITLE: &str = "title";
    pub const HEADER: &str = "header";
    pub const ID: &str = "id";
    pub const MUTED: &str = "muted";
    pub const MONEY: &str = "money";
    pub const PAID: &str = "paid";
    pub const PENDING: &str = "pending";
    pub const BAR: &str = "bar";
    pub const PLACEHOLDER: &str = "placeholder";
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
}

/// Named `console` styles applied through the `style` template filter.
#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    /// Styles `text`, or returns it untouched when `use_color` is off.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).force_styling(true).to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

pub static SALESDESK_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add(names::TITLE, Style::new().bold().underlined())
        .add(names::HEADER, Style::new().bold())
        .add(names::ID, Style::new().yellow())
        .add(names::MUTED, Style::new().dim())
        .add(names::MONEY, Style::new().cyan())
        .add(names::PAID, Style::new().green())
        .add(names::PENDING, Style::new().yellow())
        .add(names::BAR, Style::new().blue())
        .add(names::PLACEHOLDER, Style::new().red().italic())
        .add(names::INFO, Style::new().dim())
        .add(names::SUCCESS, Style::new().green())
        .add(names::WARNING, Style::new().yellow())
        .add(names::ERROR, Style::new().red())
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_leaves_text_alone() {
        assert_eq!(SALESDESK_THEME.apply(names::PAID, "Paid", false), "Paid");
    }

    #[test]
    fn color_mode_adds_escape_codes() {
        let styled = SALESDESK_THEME.apply(names::PAID, "Paid", true);
        assert!(styled.contains("\u{1b}["));
        assert!(styled.contains("Paid"));
    }

    #[test]
    fn unknown_style_is_flagged() {
        let out = SALESDESK_THEME.apply("nope", "text", false);
        assert_eq!(out, "(!?) text");
    }
}
