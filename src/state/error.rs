//! Validation errors raised by page actions before any request is sent.

/// Errors that can occur while validating page input.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// No collection chosen
    #[error("Please select a collection")]
    CollectionNotSelected,

    /// Search needs both a collection and a query
    #[error("Please select a collection and enter a query")]
    SearchIncomplete,

    /// New collection name empty
    #[error("Please enter a collection name")]
    CollectionNameMissing,

    /// No file chosen for upload
    #[error("Please select a file")]
    FileNotSelected,

    /// Source URL empty
    #[error("Please enter a source URL")]
    SourceUrlMissing,

    /// Source poll interval below one minute
    #[error("Update interval must be at least 1 minute")]
    IntervalTooShort,

    /// Row action without a selected row
    #[error("Please select {0} first")]
    NothingSelected(&'static str),
}
