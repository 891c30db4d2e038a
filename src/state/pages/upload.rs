use super::Completion;
use crate::api::{Ack, ApiError};
use crate::events::network::Event as NetworkEvent;
use crate::state::cache::CollectionsReader;
use crate::state::error::ValidationError;
use crate::state::form::{cycle, CollectionPicker, Input};
use crate::state::loading::Busy;
use std::path::PathBuf;
use std::sync::Arc;

/// Specifying the upload page fields in focus order.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum UploadField {
    Collection,
    File,
}

const FIELDS: [UploadField; 2] = [UploadField::Collection, UploadField::File];

#[derive(Debug, Default)]
pub struct UploadLoading {
    pub upload: Busy,
}

/// Houses the upload form.
///
#[derive(Debug)]
pub struct UploadPage {
    collections: CollectionsReader,
    pub focus: UploadField,
    pub collection: CollectionPicker,
    pub file: Input,
    pub loading: UploadLoading,
}

impl UploadPage {
    pub fn new(collections: CollectionsReader) -> Self {
        UploadPage {
            collections,
            focus: UploadField::Collection,
            collection: CollectionPicker::default(),
            file: Input::default(),
            loading: UploadLoading::default(),
        }
    }

    pub fn collections(&self) -> Arc<Vec<String>> {
        self.collections.snapshot()
    }

    pub fn next_field(&mut self, delta: isize) {
        self.focus = cycle(&FIELDS, self.focus, delta);
    }

    pub fn input_mut(&mut self) -> Option<&mut Input> {
        match self.focus {
            UploadField::File => Some(&mut self.file),
            UploadField::Collection => None,
        }
    }

    /// Validate the form and start the upload.
    ///
    pub fn upload_file(&mut self) -> Result<NetworkEvent, ValidationError> {
        let collection = self
            .collection
            .selected()
            .ok_or(ValidationError::CollectionNotSelected)?
            .to_owned();
        let file = self.file.value().trim();
        if file.is_empty() {
            return Err(ValidationError::FileNotSelected);
        }
        let path = expand_home(file);
        self.loading.upload = Busy::Active;
        Ok(NetworkEvent::Upload { collection, path })
    }

    pub fn finish_upload(&mut self, outcome: Result<Ack, ApiError>) -> Completion {
        self.loading.upload.clear();
        match outcome {
            Ok(ack) => {
                // Cleared so the same file can be picked again.
                self.file.clear();
                Completion::success(ack.message, "File uploaded successfully")
            }
            Err(e) => Completion::failure(&e, "Failed to upload file"),
        }
    }
}

/// Resolve a leading `~/` against the home directory.
///
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::cache::CollectionCache;
    use crate::state::toast::ToastKind;

    fn page() -> UploadPage {
        UploadPage::new(CollectionCache::default().reader())
    }

    #[test]
    fn requires_collection_then_file() {
        let mut page = page();
        page.file.set("/tmp/a.txt");
        assert_eq!(page.upload_file(), Err(ValidationError::CollectionNotSelected));

        let mut page = self::page();
        page.collection.select("docs");
        page.file.set("  ");
        assert_eq!(page.upload_file(), Err(ValidationError::FileNotSelected));
        assert!(!page.loading.upload.is_busy());
    }

    #[test]
    fn success_clears_file_input() {
        let mut page = page();
        page.collection.select("docs");
        page.file.set("/tmp/a.txt");
        assert_eq!(
            page.upload_file(),
            Ok(NetworkEvent::Upload {
                collection: "docs".to_string(),
                path: PathBuf::from("/tmp/a.txt"),
            })
        );
        assert!(page.loading.upload.is_busy());

        let completion = page.finish_upload(Ok(Ack {
            message: Some("File uploaded successfully".to_string()),
        }));
        assert!(page.file.is_empty());
        assert!(!page.loading.upload.is_busy());
        assert_eq!(completion.toast.unwrap().0, ToastKind::Success);
    }

    #[test]
    fn failure_keeps_file_input() {
        let mut page = page();
        page.collection.select("docs");
        page.file.set("/tmp/a.txt");
        page.upload_file().unwrap();
        let completion = page.finish_upload(Err(ApiError::Server {
            status: 400,
            message: "Entry already exists".to_string(),
            code: Some("CONFLICT".to_string()),
            details: None,
        }));
        assert_eq!(page.file.value(), "/tmp/a.txt");
        assert_eq!(
            completion.toast,
            Some((ToastKind::Error, "Entry already exists".to_string()))
        );
    }

    #[test]
    fn home_prefix_is_expanded() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/notes.md"), home.join("notes.md"));
        }
        assert_eq!(expand_home("notes.md"), PathBuf::from("notes.md"));
    }
}
