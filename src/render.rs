use std::fmt::Write;

use crate::client::SearchOutcome;
use crate::data_models::VideoRecord;

pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;
pub const NO_RESULTS_MESSAGE: &str = "No videos found. Try different search terms.";

/// Cuts `text` to at most `max_chars` characters, appending `...` when cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Plain-text listing used by the `search` subcommand.
pub fn render_outcome(query: &str, outcome: &SearchOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Search results for: {query}");
    let _ = writeln!(out, "{}", "=".repeat(50));

    match outcome {
        SearchOutcome::Empty { .. } => {
            let _ = writeln!(out, "{NO_RESULTS_MESSAGE}");
        }
        SearchOutcome::Found(batch) => {
            for (i, record) in batch.records.iter().enumerate() {
                render_record(&mut out, i + 1, record);
            }
        }
    }

    if outcome.skipped() > 0 {
        let _ = writeln!(
            out,
            "({} malformed result(s) were skipped)",
            outcome.skipped()
        );
    }
    out
}

fn render_record(out: &mut String, position: usize, record: &VideoRecord) {
    let _ = writeln!(out, "{position}. Title: {}", record.title);
    let _ = writeln!(out, "   Channel: {}", record.channel_title);
    let _ = writeln!(
        out,
        "   Published: {}",
        record.published_at.format("%Y-%m-%d")
    );
    let _ = writeln!(out, "   URL: {}", record.watch_url());
    if !record.description.is_empty() {
        let _ = writeln!(
            out,
            "   Description: {}",
            truncate(&record.description, DESCRIPTION_PREVIEW_CHARS)
        );
    }
    let _ = writeln!(out, "{}", "-".repeat(30));
}
