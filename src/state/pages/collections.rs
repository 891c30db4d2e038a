use super::{reset_completion, Completion, FollowUp};
use crate::api::{Ack, ApiError};
use crate::events::network::Event as NetworkEvent;
use crate::state::cache::CollectionsReader;
use crate::state::error::ValidationError;
use crate::state::form::{cycle, Input, ListCursor};
use crate::state::loading::Busy;
use crate::state::navigation::Page;
use std::sync::Arc;

/// Specifying the collections page fields in focus order.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CollectionsField {
    Name,
    List,
}

const FIELDS: [CollectionsField; 2] = [CollectionsField::Name, CollectionsField::List];

#[derive(Debug, Default)]
pub struct CollectionsLoading {
    pub create: Busy,
    pub collections: Busy,
    pub reset: Busy,
}

/// Houses the create form and the cached collection list.
///
#[derive(Debug)]
pub struct CollectionsPage {
    collections: CollectionsReader,
    pub focus: CollectionsField,
    pub name: Input,
    pub cursor: ListCursor,
    pub loading: CollectionsLoading,
}

impl CollectionsPage {
    pub fn new(collections: CollectionsReader) -> Self {
        CollectionsPage {
            collections,
            focus: CollectionsField::Name,
            name: Input::default(),
            cursor: ListCursor::default(),
            loading: CollectionsLoading::default(),
        }
    }

    pub fn collections(&self) -> Arc<Vec<String>> {
        self.collections.snapshot()
    }

    pub fn selected_collection(&self) -> Option<String> {
        let names = self.collections();
        self.cursor.selected().and_then(|i| names.get(i).cloned())
    }

    pub fn next_field(&mut self, delta: isize) {
        self.focus = cycle(&FIELDS, self.focus, delta);
    }

    pub fn input_mut(&mut self) -> Option<&mut Input> {
        match self.focus {
            CollectionsField::Name => Some(&mut self.name),
            CollectionsField::List => None,
        }
    }

    /// Validate the name and start creating the collection.
    ///
    pub fn create_collection(&mut self) -> Result<NetworkEvent, ValidationError> {
        let name = self.name.value().trim().to_owned();
        if name.is_empty() {
            return Err(ValidationError::CollectionNameMissing);
        }
        self.loading.create = Busy::Active;
        Ok(NetworkEvent::CreateCollection { name })
    }

    pub fn finish_create(&mut self, name: &str, outcome: Result<Ack, ApiError>) -> Completion {
        self.loading.create.clear();
        match outcome {
            Ok(ack) => {
                self.name.clear();
                Completion::success(
                    ack.message,
                    format!("Collection \"{}\" created successfully", name),
                )
                .then(FollowUp::RefreshCollections)
            }
            Err(e) => Completion::failure(&e, "Failed to create collection"),
        }
    }

    /// Ask the router to refetch the shared cache, showing progress here.
    ///
    pub fn refresh(&mut self) -> NetworkEvent {
        self.loading.collections = Busy::Active;
        NetworkEvent::FetchCollections
    }

    pub fn finish_refresh(&mut self) {
        self.loading.collections.clear();
        self.cursor.clamp(self.collections().len());
    }

    pub fn reset_collection(&mut self, name: &str) -> NetworkEvent {
        self.loading.reset = Busy::Item(name.to_owned());
        NetworkEvent::ResetCollection {
            origin: Page::Collections,
            name: name.to_owned(),
        }
    }

    pub fn finish_reset(&mut self, name: &str, outcome: Result<Ack, ApiError>) -> Completion {
        self.loading.reset.clear();
        let completion = reset_completion(name, &outcome);
        if outcome.is_ok() {
            completion.then(FollowUp::RefreshCollections)
        } else {
            completion
        }
    }
}
