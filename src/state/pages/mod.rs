//! Page state modules.
//!
//! Every page owns its input fields, a typed loading record and the actions
//! for its entity. Actions validate local input, mark themselves busy and hand
//! back the network event to dispatch; `finish_*` methods absorb the response,
//! always clearing the busy flag first, and tell the shell which toast to show
//! and which refresh to run next.

mod collections;
mod entries;
mod search;
mod sources;
mod upload;

pub use collections::{CollectionsField, CollectionsPage};
pub use entries::{EntriesField, EntriesPage};
pub use search::{SearchField, SearchPage};
pub use sources::{SourcesField, SourcesPage};
pub use upload::{UploadField, UploadPage};

use super::navigation::Page;
use super::toast::ToastKind;
use crate::api::{Ack, ApiError};

/// Refresh requested by a page after a successful mutation.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FollowUp {
    RefreshCollections,
    ListSources,
    ListEntries,
}

/// Outcome of a page absorbing a response.
///
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Completion {
    pub toast: Option<(ToastKind, String)>,
    pub follow_up: Option<FollowUp>,
}

impl Completion {
    /// Nothing to show, nothing to refresh.
    ///
    pub fn quiet() -> Self {
        Completion::default()
    }

    /// Success toast carrying the server message, or `fallback` without one.
    ///
    pub fn success(message: Option<String>, fallback: impl Into<String>) -> Self {
        Completion {
            toast: Some((
                ToastKind::Success,
                message.unwrap_or_else(|| fallback.into()),
            )),
            follow_up: None,
        }
    }

    /// Error toast carrying the extracted error message.
    ///
    pub fn failure(error: &ApiError, fallback: &str) -> Self {
        Completion {
            toast: Some((ToastKind::Error, error_message(error, fallback))),
            follow_up: None,
        }
    }

    pub fn then(mut self, follow_up: FollowUp) -> Self {
        self.follow_up = Some(follow_up);
        self
    }
}

/// Human-readable message for an API error.
///
pub fn error_message(error: &ApiError, fallback: &str) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

/// Pending reset awaiting an explicit yes or cancel.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetConfirmation {
    pub origin: Page,
    pub collection: String,
}

impl ResetConfirmation {
    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to reset the \"{}\" collection? This will remove all entries and cannot be undone.",
            self.collection
        )
    }
}

/// Shared completion for resets started from either the collections or the
/// entries page.
///
fn reset_completion(name: &str, outcome: &Result<Ack, ApiError>) -> Completion {
    match outcome {
        Ok(ack) => Completion::success(
            ack.message.clone(),
            format!("Collection \"{}\" has been reset successfully", name),
        ),
        Err(e) => Completion::failure(e, "Failed to reset collection"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_prefers_server_message() {
        let completion = Completion::success(Some("Done".to_string()), "fallback");
        assert_eq!(completion.toast, Some((ToastKind::Success, "Done".to_string())));
        let completion = Completion::success(None, "fallback");
        assert_eq!(
            completion.toast,
            Some((ToastKind::Success, "fallback".to_string()))
        );
    }

    #[test]
    fn failure_uses_error_text() {
        let error = ApiError::Server {
            status: 500,
            message: "Failed to store file".to_string(),
            code: None,
            details: None,
        };
        let completion = Completion::failure(&error, "Failed to upload file");
        assert_eq!(
            completion.toast,
            Some((ToastKind::Error, "Failed to store file".to_string()))
        );
        assert_eq!(completion.follow_up, None);
    }

    #[test]
    fn confirmation_prompt_names_target() {
        let confirmation = ResetConfirmation {
            origin: Page::Collections,
            collection: "docs".to_string(),
        };
        let prompt = confirmation.prompt();
        assert!(prompt.contains("\"docs\""));
        assert!(prompt.contains("cannot be undone"));
    }

    #[test]
    fn reset_completion_messages() {
        let done = reset_completion("docs", &Ok(Ack::default()));
        assert_eq!(
            done.toast,
            Some((
                ToastKind::Success,
                "Collection \"docs\" has been reset successfully".to_string()
            ))
        );
        let failed = reset_completion("docs", &Err(ApiError::Malformed("x".to_string())));
        assert_eq!(failed.toast.unwrap().0, ToastKind::Error);
    }
}
