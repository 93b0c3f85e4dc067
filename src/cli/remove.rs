use super::ui::{StyleType, Theme};
use crate::tracker::RatioTracker;
use anyhow::{Result, bail};

/// Removes the ratio shown at the 1-based `position`.
pub async fn run(tracker: &RatioTracker, position: usize, theme: &Theme) -> Result<()> {
    if position == 0 {
        bail!("Positions start at 1");
    }

    let removed = tracker.remove_ratio(position - 1).await?;
    println!("Removed {}", removed.ratio.label());
    if !removed.persisted {
        println!(
            "{}",
            theme.style_text(
                "Could not save ratios; the removal only lasts for the current session.",
                StyleType::Warning,
            )
        );
    }
    Ok(())
}
