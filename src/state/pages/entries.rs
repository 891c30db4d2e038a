use super::{reset_completion, Completion, FollowUp};
use crate::api::{Ack, ApiError, Entry, EntryContent};
use crate::events::network::Event as NetworkEvent;
use crate::state::cache::CollectionsReader;
use crate::state::error::ValidationError;
use crate::state::form::{cycle, CollectionPicker, ListCursor};
use crate::state::loading::Busy;
use crate::state::navigation::Page;
use log::*;
use std::sync::Arc;

/// Specifying the entries page fields in focus order.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EntriesField {
    Collection,
    List,
}

const FIELDS: [EntriesField; 2] = [EntriesField::Collection, EntriesField::List];

#[derive(Debug, Default)]
pub struct EntriesLoading {
    pub entries: Busy,
    pub delete: Busy,
    pub reset: Busy,
    pub content: Busy,
}

/// Houses the entries of the selected collection and the entry preview.
///
#[derive(Debug)]
pub struct EntriesPage {
    collections: CollectionsReader,
    pub focus: EntriesField,
    pub collection: CollectionPicker,
    pub cursor: ListCursor,
    pub loading: EntriesLoading,
    entries: Vec<Entry>,
    preview: Option<EntryContent>,
    preview_scroll: u16,
}

impl EntriesPage {
    pub fn new(collections: CollectionsReader) -> Self {
        EntriesPage {
            collections,
            focus: EntriesField::Collection,
            collection: CollectionPicker::default(),
            cursor: ListCursor::default(),
            loading: EntriesLoading::default(),
            entries: vec![],
            preview: None,
            preview_scroll: 0,
        }
    }

    pub fn collections(&self) -> Arc<Vec<String>> {
        self.collections.snapshot()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.cursor.selected().and_then(|i| self.entries.get(i))
    }

    pub fn next_field(&mut self, delta: isize) {
        self.focus = cycle(&FIELDS, self.focus, delta);
    }

    /// Refetch the entries of the selected collection.
    ///
    pub fn list_entries(&mut self) -> Option<NetworkEvent> {
        let collection = self.collection.selected()?.to_owned();
        self.loading.entries = Busy::Active;
        self.entries.clear();
        self.cursor.reset();
        Some(NetworkEvent::ListEntries { collection })
    }

    pub fn finish_list(
        &mut self,
        collection: &str,
        outcome: Result<Vec<Entry>, ApiError>,
    ) -> Completion {
        self.loading.entries.clear();
        if self.collection.selected() != Some(collection) {
            debug!("Discarding entries of '{}', selection changed", collection);
            return Completion::quiet();
        }
        match outcome {
            Ok(entries) => {
                self.entries = entries;
                self.cursor.clamp(self.entries.len());
                Completion::quiet()
            }
            Err(e) if e.is_malformed() => {
                warn!("Treating malformed entries response as empty: {}", e);
                self.entries.clear();
                Completion::quiet()
            }
            Err(e) => Completion::failure(&e, "Failed to fetch entries"),
        }
    }

    /// Delete an entry by echoing its payload back.
    ///
    pub fn delete_entry(&mut self, entry: Entry) -> Result<NetworkEvent, ValidationError> {
        let collection = self
            .collection
            .selected()
            .ok_or(ValidationError::CollectionNotSelected)?
            .to_owned();
        self.loading.delete = Busy::Item(entry.key());
        Ok(NetworkEvent::DeleteEntry { collection, entry })
    }

    pub fn delete_selected(&mut self) -> Result<NetworkEvent, ValidationError> {
        let entry = self
            .selected_entry()
            .cloned()
            .ok_or(ValidationError::NothingSelected("an entry"))?;
        self.delete_entry(entry)
    }

    pub fn finish_delete(&mut self, outcome: Result<Ack, ApiError>) -> Completion {
        self.loading.delete.clear();
        match outcome {
            Ok(ack) => Completion::success(ack.message, "Entry deleted successfully")
                .then(FollowUp::ListEntries),
            Err(e) => Completion::failure(&e, "Failed to delete entry"),
        }
    }

    pub fn reset_collection(&mut self, name: &str) -> NetworkEvent {
        self.loading.reset = Busy::Item(name.to_owned());
        NetworkEvent::ResetCollection {
            origin: Page::Entries,
            name: name.to_owned(),
        }
    }

    /// Absorb a reset; the list is refetched only when the reset collection
    /// is the one on screen.
    ///
    pub fn finish_reset(&mut self, name: &str, outcome: Result<Ack, ApiError>) -> Completion {
        self.loading.reset.clear();
        let completion = reset_completion(name, &outcome);
        if outcome.is_ok() && self.collection.selected() == Some(name) {
            completion.then(FollowUp::ListEntries)
        } else {
            completion
        }
    }

    /// Fetch the stored content of the selected entry.
    ///
    pub fn view_selected(&mut self) -> Result<NetworkEvent, ValidationError> {
        let collection = self
            .collection
            .selected()
            .ok_or(ValidationError::CollectionNotSelected)?
            .to_owned();
        let entry = self
            .selected_entry()
            .cloned()
            .ok_or(ValidationError::NothingSelected("an entry"))?;
        self.loading.content = Busy::Item(entry.key());
        Ok(NetworkEvent::EntryContent { collection, entry })
    }

    pub fn finish_content(&mut self, outcome: Result<EntryContent, ApiError>) -> Completion {
        self.loading.content.clear();
        match outcome {
            Ok(content) => {
                self.preview = Some(content);
                self.preview_scroll = 0;
                Completion::quiet()
            }
            Err(e) => Completion::failure(&e, "Failed to load entry content"),
        }
    }

    pub fn preview(&self) -> Option<&EntryContent> {
        self.preview.as_ref()
    }

    pub fn preview_scroll(&self) -> u16 {
        self.preview_scroll
    }

    pub fn scroll_preview(&mut self, delta: i32) {
        let next = (self.preview_scroll as i32 + delta).max(0);
        self.preview_scroll = u16::try_from(next).unwrap_or(u16::MAX);
    }

    pub fn close_preview(&mut self) {
        self.preview = None;
        self.preview_scroll = 0;
    }
}
