//! Text processing utilities.
//!
//! This module contains utilities for interpreting user-typed numbers and for
//! turning search hits into display text.

use crate::api::SearchResult;
use log::*;
use regex::Regex;

/// Parse the integer at the start of `text`, ignoring leading whitespace and
/// anything after the digits. `"  12min"` yields `12`, `" "` yields `None`.
///
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let re = match Regex::new(r"^\s*([+-]?\d+)") {
        Ok(r) => r,
        Err(e) => {
            warn!("Failed to compile integer pattern: {}", e);
            return None;
        }
    };
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

/// Placeholder shown instead of an empty result list.
///
pub fn no_results_placeholder(query: &str) -> String {
    format!("No results found for query: \"{}\"", query)
}

/// Render search hits one string per record, preserving order. An empty list
/// renders as a single placeholder naming the query.
///
pub fn format_search_results(query: &str, results: &[SearchResult]) -> Vec<String> {
    if results.is_empty() {
        return vec![no_results_placeholder(query)];
    }
    results
        .iter()
        .map(|r| serde_json::to_string_pretty(&r.0).unwrap_or_else(|_| r.0.to_string()))
        .collect()
}

/// Shorten `text` to at most `max` characters, marking the cut with `...`.
///
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
