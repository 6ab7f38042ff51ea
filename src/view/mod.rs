//! Plain-text rendering of the search screen.
//!
//! Rendering reads the screen's observable state and nothing else. It is not pure in one
//! respect: a load-more error is shown through [`LoadMoreState::take_error`], so each error
//! snapshot is printed at most once.

use crate::model::{Resource, Vaccination};
use crate::state::{LoadMoreState, SearchScreen};

/// Render the whole screen, one line per element, newline-terminated.
pub fn render(screen: &SearchScreen) -> String {
    let query = screen.query();
    let mut lines = vec![query_line(query.as_deref())];

    let results = screen.results();
    lines.extend(result_lines(results.as_ref()));

    if query.as_deref().is_some_and(|q| !q.trim().is_empty()) {
        lines.push(load_more_line(&screen.load_more_state(), screen.has_more()));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn query_line(query: Option<&str>) -> String {
    match query {
        None => "query: (none)".to_string(),
        Some(q) if q.is_empty() => "query: (blank)".to_string(),
        Some(q) => format!("query: {}", q),
    }
}

fn result_lines(results: Option<&Resource<Vec<Vaccination>>>) -> Vec<String> {
    let Some(resource) = results else {
        return vec!["results: none".to_string()];
    };

    let header = match resource {
        Resource::Loading(_) => "results: loading".to_string(),
        Resource::Success(records) => format!("results: {}", records.len()),
        Resource::Error { message, .. } => format!("results: error: {}", message),
    };

    let records = resource.data().map(Vec::as_slice).unwrap_or_default();
    std::iter::once(header)
        .chain(
            records
                .iter()
                .enumerate()
                .map(|(idx, record)| record_line(idx + 1, record)),
        )
        .collect()
}

fn record_line(position: usize, record: &Vaccination) -> String {
    let mut line = format!("  {}. {} - {}", position, record.name, record.manufacturer);
    match record.doses {
        Some(1) => line.push_str(" - 1 dose"),
        Some(n) => line.push_str(&format!(" - {} doses", n)),
        None => {}
    }
    line
}

fn load_more_line(state: &LoadMoreState, has_more: bool) -> String {
    if state.is_running() {
        return "more: loading".to_string();
    }
    if let Some(error) = state.take_error() {
        return format!("more: failed: {} (:more to retry)", error);
    }
    if has_more {
        "more: available (:more)".to_string()
    } else {
        "more: end of results".to_string()
    }
}
