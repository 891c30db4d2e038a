use fake::Dummy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Defines external source data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Deserialize)]
pub struct Source {
    pub url: String,
    pub update_interval: u32, // minutes
    #[serde(default)]
    pub last_update: Option<String>,
}

/// Defines entry data structure. The backend decides what an entry looks
/// like; it is handed back untouched when deleting.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entry(pub Value);

impl Entry {
    pub fn new(value: impl Into<Value>) -> Self {
        Entry(value.into())
    }

    /// String form used in request paths and busy tokens.
    ///
    pub fn key(&self) -> String {
        match &self.0 {
            Value::String(s) => s.to_owned(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Defines stored entry content.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Deserialize)]
pub struct EntryContent {
    #[serde(default)]
    pub collection: String,
    #[serde(default)]
    pub entry: String,
    pub content: String,
    #[serde(default)]
    pub chunk_count: usize,
}

/// Defines a single search hit. Rendered, never inspected.
///
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SearchResult(pub Value);

/// Acknowledgement of a mutating call.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ack {
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entry_key_unquotes_strings() {
        assert_eq!(Entry::new("report.pdf").key(), "report.pdf");
        assert_eq!(Entry::new(json!({"id": 3})).key(), r#"{"id":3}"#);
    }

    #[test]
    fn entry_serializes_verbatim() {
        let entry = Entry::new(json!({"id": 3, "name": "a"}));
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"id": 3, "name": "a"})
        );
    }

    #[test]
    fn source_last_update_is_optional() {
        let source: Source =
            serde_json::from_value(json!({"url": "https://a.test", "update_interval": 5})).unwrap();
        assert_eq!(source.update_interval, 5);
        assert_eq!(source.last_update, None);
    }
}
