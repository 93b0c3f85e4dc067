use crate::core::config::ThemeConfig;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Value,
    Error,
    Warning,
    Subtle,
}

/// Presentation settings, passed explicitly to every renderer.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub color: bool,
}

impl From<&ThemeConfig> for Theme {
    fn from(config: &ThemeConfig) -> Self {
        Theme {
            color: config.color,
        }
    }
}

impl Theme {
    pub fn plain() -> Self {
        Theme { color: false }
    }

    /// Applies a consistent style to a string.
    pub fn style_text(&self, text: &str, style_type: StyleType) -> String {
        let styled = match style_type {
            StyleType::Title => style(text).bold().underlined(),
            StyleType::Value => style(text).green().bold(),
            StyleType::Error => style(text).red(),
            StyleType::Warning => style(text).yellow(),
            StyleType::Subtle => style(text).dim(),
        };
        if self.color {
            styled.to_string()
        } else {
            styled.force_styling(false).to_string()
        }
    }

    /// Creates a new `comfy_table::Table` with standard styling.
    pub fn new_styled_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if !self.color {
            table.force_no_tty();
        }
        table
    }

    /// Creates a styled header cell for a table.
    pub fn header_cell(&self, text: &str) -> Cell {
        Cell::new(text)
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold)
    }

    pub fn value_cell(&self, value: &str) -> Cell {
        let cell = Cell::new(value).set_alignment(CellAlignment::Right);
        // A zero value means the price was unknown
        if value.trim_start_matches(['0', '.']).is_empty() {
            cell.fg(Color::DarkGrey)
        } else {
            cell.fg(Color::Green)
        }
    }
}

/// Creates a new `indicatif::ProgressBar` with standard styling.
pub fn new_progress_bar(len: u64, message: &str) -> ProgressBar {
    let template =
        "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})";

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_theme_has_no_escape_codes() {
        let theme = Theme::plain();
        assert_eq!(theme.style_text("Ratios", StyleType::Title), "Ratios");
        assert_eq!(theme.style_text("oops", StyleType::Error), "oops");
    }

    #[test]
    fn test_theme_from_config() {
        let theme = Theme::from(&ThemeConfig { color: false });
        assert!(!theme.color);
        assert!(Theme::from(&ThemeConfig::default()).color);
    }
}
