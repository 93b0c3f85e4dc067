use super::list;
use super::ui::{StyleType, Theme};
use crate::tracker::{RatioAdded, RatioTracker};
use anyhow::Result;

pub fn render(added: &RatioAdded, theme: &Theme) -> String {
    let verb = if added.replaced { "Updated" } else { "Tracking" };
    let mut output = format!(
        "{} {} = {}",
        verb,
        added.row.label,
        theme.style_text(&added.row.value, StyleType::Value)
    );
    if !added.persisted {
        output.push('\n');
        output.push_str(&theme.style_text(
            "Could not save ratios; this change only lasts for the current session.",
            StyleType::Warning,
        ));
    }
    output
}

pub async fn run(
    tracker: &RatioTracker,
    numerator_id: &str,
    denominator_id: &str,
    theme: &Theme,
) -> Result<()> {
    let added = tracker
        .add_ratio_by_ids(numerator_id, denominator_id)
        .await?;
    println!("{}\n", render(&added, theme));
    println!("{}", list::render(&tracker.display_list().await, theme));
    Ok(())
}
