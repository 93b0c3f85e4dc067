use super::list;
use super::ui::{self, StyleType, Theme};
use crate::tracker::{RatioTracker, RefreshReport};
use anyhow::Result;

/// Summarises pairs that could not be refreshed or saved.
pub fn render_problems(report: &RefreshReport, theme: &Theme) -> Option<String> {
    let mut lines = Vec::new();
    for (key, error) in &report.failed {
        lines.push(theme.style_text(
            &format!("Could not refresh {key}: {error}"),
            StyleType::Error,
        ));
    }
    if report.save_failures > 0 {
        lines.push(theme.style_text(
            &format!(
                "{} refreshed ratio(s) could not be saved; they only last for the current session.",
                report.save_failures
            ),
            StyleType::Warning,
        ));
    }
    (!lines.is_empty()).then(|| lines.join("\n"))
}

pub async fn run(tracker: &RatioTracker, theme: &Theme) -> Result<()> {
    let pb = ui::new_progress_bar(tracker.len().await as u64, "Refreshing ratios...");
    let report = tracker.refresh_with(|_| pb.inc(1)).await;
    pb.finish_and_clear();

    println!("{}", list::render(&tracker.display_list().await, theme));
    if let Some(problems) = render_problems(&report, theme) {
        println!("\n{problems}");
    }
    Ok(())
}
