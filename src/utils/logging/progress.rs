//! Progress bars for the enrichment passes, using the indicatif crate

use indicatif::{ProgressBar, ProgressStyle};

/// Template of a pass progress bar
pub const PASS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} records ({per_sec}) {msg}";

/// Progress bar over the records of one enrichment pass
///
/// Returns a hidden bar when `visible` is false, so callers can wrap their
/// iterators unconditionally.
///
/// # Arguments
/// * `records` - Number of records the pass visits
/// * `description` - Initial message next to the bar
/// * `visible` - Whether to draw the bar at all
#[must_use]
pub fn pass_progress_bar(records: usize, description: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::default_bar()
        .template(PASS_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    ProgressBar::new(records as u64)
        .with_style(style)
        .with_message(description.to_owned())
}

/// Finish a pass progress bar, optionally replacing its message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    match message {
        Some(msg) => pb.finish_with_message(msg.to_owned()),
        None => pb.finish(),
    }
}
