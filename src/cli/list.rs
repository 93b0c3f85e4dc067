use super::ui::{StyleType, Theme};
use crate::tracker::{DisplayRow, RatioTracker};
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

/// Renders the display list as a table with 1-based positions.
pub fn render(rows: &[DisplayRow], theme: &Theme) -> String {
    if rows.is_empty() {
        return theme.style_text(
            "No ratios tracked yet. Add one with `ratios add <numerator> <denominator>`.",
            StyleType::Subtle,
        );
    }

    let mut table = theme.new_styled_table();
    table.set_header(vec![
        theme.header_cell("#"),
        theme.header_cell("Ratio"),
        theme.header_cell("Value"),
    ]);

    for (index, row) in rows.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1).set_alignment(CellAlignment::Right),
            Cell::new(&row.label),
            theme.value_cell(&row.value),
        ]);
    }

    format!(
        "{}\n\n{}",
        theme.style_text("Ratios", StyleType::Title),
        table
    )
}

pub async fn run(tracker: &RatioTracker, theme: &Theme) -> Result<()> {
    let rows = tracker.display_list().await;
    println!("{}", render(&rows, theme));
    Ok(())
}
