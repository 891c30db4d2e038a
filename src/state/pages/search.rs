use super::{error_message, Completion};
use crate::api::{ApiError, SearchResult};
use crate::events::network::Event as NetworkEvent;
use crate::state::cache::CollectionsReader;
use crate::state::error::ValidationError;
use crate::state::form::{cycle, CollectionPicker, Input, ListCursor};
use crate::state::loading::Busy;
use crate::state::toast::ToastKind;
use crate::utils::text_processing::{format_search_results, parse_leading_int};
use chrono::Utc;
use log::*;
use std::sync::Arc;

/// Result count sent when the typed value is unusable.
///
pub const DEFAULT_MAX_RESULTS: i64 = 5;

/// Specifying the search page fields in focus order.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SearchField {
    Collection,
    Query,
    MaxResults,
    Results,
}

const FIELDS: [SearchField; 4] = [
    SearchField::Collection,
    SearchField::Query,
    SearchField::MaxResults,
    SearchField::Results,
];

#[derive(Debug, Default)]
pub struct SearchLoading {
    pub search: Busy,
}

/// Houses search form and results.
///
#[derive(Debug)]
pub struct SearchPage {
    collections: CollectionsReader,
    pub focus: SearchField,
    pub collection: CollectionPicker,
    pub query: Input,
    pub max_results: Input,
    pub cursor: ListCursor,
    pub loading: SearchLoading,
    results: Vec<String>,
    error: Option<String>,
    timestamp: Option<String>,
}

impl SearchPage {
    pub fn new(collections: CollectionsReader) -> Self {
        SearchPage {
            collections,
            focus: SearchField::Collection,
            collection: CollectionPicker::default(),
            query: Input::default(),
            max_results: Input::with_value(DEFAULT_MAX_RESULTS.to_string()),
            cursor: ListCursor::default(),
            loading: SearchLoading::default(),
            results: vec![],
            error: None,
            timestamp: None,
        }
    }

    pub fn collections(&self) -> Arc<Vec<String>> {
        self.collections.snapshot()
    }

    pub fn results(&self) -> &[String] {
        &self.results
    }

    pub fn selected_result(&self) -> Option<&String> {
        self.cursor.selected().and_then(|i| self.results.get(i))
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    pub fn next_field(&mut self, delta: isize) {
        self.focus = cycle(&FIELDS, self.focus, delta);
    }

    /// Focused text input, if the focus is on one.
    ///
    pub fn input_mut(&mut self) -> Option<&mut Input> {
        match self.focus {
            SearchField::Query => Some(&mut self.query),
            SearchField::MaxResults => Some(&mut self.max_results),
            _ => None,
        }
    }

    /// Validate the form and start a search.
    ///
    pub fn search(&mut self) -> Result<NetworkEvent, ValidationError> {
        self.error = None;
        self.results.clear();
        self.cursor.reset();

        let collection = match self.collection.selected() {
            Some(collection) if !self.query.is_empty() => collection.to_owned(),
            _ => {
                let error = ValidationError::SearchIncomplete;
                self.error = Some(error.to_string());
                return Err(error);
            }
        };
        let max_results = parse_leading_int(self.max_results.value())
            .filter(|n| *n >= 1)
            .unwrap_or(DEFAULT_MAX_RESULTS);

        self.loading.search = Busy::Active;
        self.timestamp = Some(Utc::now().format("%Y-%m-%d %H:%M:%S").to_string());
        Ok(NetworkEvent::Search {
            collection,
            query: self.query.value().to_owned(),
            max_results,
        })
    }

    /// Absorb search results for `query`.
    ///
    pub fn finish_search(
        &mut self,
        query: &str,
        outcome: Result<Vec<SearchResult>, ApiError>,
    ) -> Completion {
        self.loading.search.clear();
        match outcome {
            Ok(results) => {
                let count = results.len();
                self.results = format_search_results(query, &results);
                Completion::success(None, format!("Search completed: {} result(s)", count))
            }
            Err(e) if e.is_malformed() => {
                warn!("Treating malformed search response as empty: {}", e);
                self.results = format_search_results(query, &[]);
                Completion::quiet()
            }
            Err(e) => {
                let message = error_message(&e, "An unknown error occurred during search");
                self.error = Some(message.clone());
                Completion {
                    toast: Some((ToastKind::Error, format!("Search failed: {}", message))),
                    follow_up: None,
                }
            }
        }
    }
}
