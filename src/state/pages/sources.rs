use super::{Completion, FollowUp};
use crate::api::{Ack, ApiError, Source};
use crate::events::network::Event as NetworkEvent;
use crate::state::cache::CollectionsReader;
use crate::state::error::ValidationError;
use crate::state::form::{cycle, CollectionPicker, Input, ListCursor};
use crate::state::loading::Busy;
use crate::utils::text_processing::parse_leading_int;
use log::*;
use std::sync::Arc;

/// Poll interval in minutes used when the typed value is unusable.
///
pub const DEFAULT_UPDATE_INTERVAL: i64 = 60;

/// Specifying the sources page fields in focus order.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SourcesField {
    Collection,
    Url,
    Interval,
    List,
}

const FIELDS: [SourcesField; 4] = [
    SourcesField::Collection,
    SourcesField::Url,
    SourcesField::Interval,
    SourcesField::List,
];

#[derive(Debug, Default)]
pub struct SourcesLoading {
    pub sources: Busy,
    pub add_source: Busy,
    pub remove_source: Busy,
}

/// Houses the source form and the sources of the selected collection.
///
#[derive(Debug)]
pub struct SourcesPage {
    collections: CollectionsReader,
    pub focus: SourcesField,
    pub collection: CollectionPicker,
    pub url: Input,
    pub interval: Input,
    pub cursor: ListCursor,
    pub loading: SourcesLoading,
    sources: Vec<Source>,
}

impl SourcesPage {
    pub fn new(collections: CollectionsReader) -> Self {
        SourcesPage {
            collections,
            focus: SourcesField::Collection,
            collection: CollectionPicker::default(),
            url: Input::default(),
            interval: Input::with_value(DEFAULT_UPDATE_INTERVAL.to_string()),
            cursor: ListCursor::default(),
            loading: SourcesLoading::default(),
            sources: vec![],
        }
    }

    pub fn collections(&self) -> Arc<Vec<String>> {
        self.collections.snapshot()
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn next_field(&mut self, delta: isize) {
        self.focus = cycle(&FIELDS, self.focus, delta);
    }

    pub fn input_mut(&mut self) -> Option<&mut Input> {
        match self.focus {
            SourcesField::Url => Some(&mut self.url),
            SourcesField::Interval => Some(&mut self.interval),
            _ => None,
        }
    }

    /// Refetch the sources of the selected collection. Without a selection
    /// there is nothing to list.
    ///
    pub fn list_sources(&mut self) -> Option<NetworkEvent> {
        let collection = self.collection.selected()?.to_owned();
        self.loading.sources = Busy::Active;
        self.sources.clear();
        self.cursor.reset();
        Some(NetworkEvent::ListSources { collection })
    }

    pub fn finish_list(
        &mut self,
        collection: &str,
        outcome: Result<Vec<Source>, ApiError>,
    ) -> Completion {
        self.loading.sources.clear();
        if self.collection.selected() != Some(collection) {
            debug!("Discarding sources of '{}', selection changed", collection);
            return Completion::quiet();
        }
        match outcome {
            Ok(sources) => {
                self.sources = sources;
                self.cursor.clamp(self.sources.len());
                Completion::quiet()
            }
            Err(e) if e.is_malformed() => {
                warn!("Treating malformed sources response as empty: {}", e);
                self.sources.clear();
                Completion::quiet()
            }
            Err(e) => Completion::failure(&e, "Failed to fetch sources"),
        }
    }

    /// Validate the form and register a new source.
    ///
    pub fn add_source(&mut self) -> Result<NetworkEvent, ValidationError> {
        let collection = self
            .collection
            .selected()
            .ok_or(ValidationError::CollectionNotSelected)?
            .to_owned();
        let url = self.url.value().trim().to_owned();
        if url.is_empty() {
            return Err(ValidationError::SourceUrlMissing);
        }
        let interval =
            parse_leading_int(self.interval.value()).unwrap_or(DEFAULT_UPDATE_INTERVAL);
        if interval < 1 {
            return Err(ValidationError::IntervalTooShort);
        }
        let update_interval = u32::try_from(interval).unwrap_or(u32::MAX);

        self.loading.add_source = Busy::Active;
        Ok(NetworkEvent::AddSource {
            collection,
            url,
            update_interval,
        })
    }

    pub fn finish_add(&mut self, outcome: Result<Ack, ApiError>) -> Completion {
        self.loading.add_source.clear();
        match outcome {
            Ok(ack) => {
                self.url.clear();
                self.interval.set(DEFAULT_UPDATE_INTERVAL.to_string());
                Completion::success(ack.message, "Source added successfully")
                    .then(FollowUp::ListSources)
            }
            Err(e) => Completion::failure(&e, "Failed to add source"),
        }
    }

    /// Remove the source with the given URL.
    ///
    pub fn remove_source(&mut self, url: &str) -> Result<NetworkEvent, ValidationError> {
        let collection = self
            .collection
            .selected()
            .ok_or(ValidationError::CollectionNotSelected)?
            .to_owned();
        self.loading.remove_source = Busy::Item(url.to_owned());
        Ok(NetworkEvent::RemoveSource {
            collection,
            url: url.to_owned(),
        })
    }

    pub fn remove_selected(&mut self) -> Result<NetworkEvent, ValidationError> {
        let url = self
            .cursor
            .selected()
            .and_then(|i| self.sources.get(i))
            .map(|s| s.url.clone())
            .ok_or(ValidationError::NothingSelected("a source"))?;
        self.remove_source(&url)
    }

    pub fn finish_remove(&mut self, outcome: Result<Ack, ApiError>) -> Completion {
        self.loading.remove_source.clear();
        match outcome {
            Ok(ack) => Completion::success(ack.message, "Source removed successfully")
                .then(FollowUp::ListSources),
            Err(e) => Completion::failure(&e, "Failed to remove source"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::cache::CollectionCache;
    use crate::state::toast::ToastKind;
    use fake::{Fake, Faker};

    fn page() -> SourcesPage {
        let mut page = SourcesPage::new(CollectionCache::default().reader());
        page.collection.select("docs");
        page
    }

    #[test]
    fn list_without_collection_does_nothing() {
        let mut page = SourcesPage::new(CollectionCache::default().reader());
        assert_eq!(page.list_sources(), None);
        assert!(!page.loading.sources.is_busy());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut page = page();
        page.url.set("https://example.com/feed");
        page.interval.set("0");
        assert_eq!(page.add_source(), Err(ValidationError::IntervalTooShort));
        assert!(!page.loading.add_source.is_busy());
    }

    #[test]
    fn blank_interval_defaults_to_sixty() {
        let mut page = page();
        page.url.set("https://example.com/feed");
        page.interval.set(" ");
        assert_eq!(
            page.add_source(),
            Ok(NetworkEvent::AddSource {
                collection: "docs".to_string(),
                url: "https://example.com/feed".to_string(),
                update_interval: 60,
            })
        );
        assert!(page.loading.add_source.is_busy());
    }

    #[test]
    fn url_and_collection_are_required() {
        let mut page = page();
        assert_eq!(page.add_source(), Err(ValidationError::SourceUrlMissing));

        let mut page = SourcesPage::new(CollectionCache::default().reader());
        page.url.set("https://example.com/feed");
        assert_eq!(page.add_source(), Err(ValidationError::CollectionNotSelected));
    }

    #[test]
    fn add_success_resets_form_and_relists() {
        let mut page = page();
        page.url.set("https://example.com/feed");
        page.interval.set("15");
        page.add_source().unwrap();
        let completion = page.finish_add(Ok(Ack::default()));
        assert!(page.url.is_empty());
        assert_eq!(page.interval.value(), "60");
        assert!(!page.loading.add_source.is_busy());
        assert_eq!(completion.follow_up, Some(FollowUp::ListSources));
        assert_eq!(
            completion.toast,
            Some((ToastKind::Success, "Source added successfully".to_string()))
        );
    }

    #[test]
    fn remove_is_keyed_by_url() {
        let mut page = page();
        let sources: [Source; 2] = Faker.fake();
        page.list_sources().unwrap();
        page.finish_list("docs", Ok(sources.to_vec()));
        page.cursor.step(2, 1);
        page.cursor.step(2, 1);

        let event = page.remove_selected().unwrap();
        assert_eq!(
            event,
            NetworkEvent::RemoveSource {
                collection: "docs".to_string(),
                url: sources[1].url.clone(),
            }
        );
        assert!(page.loading.remove_source.is_busy_with(&sources[1].url));
        let completion = page.finish_remove(Ok(Ack::default()));
        assert!(!page.loading.remove_source.is_busy());
        assert_eq!(completion.follow_up, Some(FollowUp::ListSources));
    }

    #[test]
    fn remove_without_selection_is_rejected() {
        let mut page = page();
        assert_eq!(
            page.remove_selected(),
            Err(ValidationError::NothingSelected("a source"))
        );
    }

    #[test]
    fn stale_listing_is_discarded() {
        let mut page = page();
        page.list_sources().unwrap();
        page.collection.select("reports");
        let sources: [Source; 1] = Faker.fake();
        page.finish_list("docs", Ok(sources.to_vec()));
        assert!(page.sources().is_empty());
        assert!(!page.loading.sources.is_busy());
    }

    #[test]
    fn listing_failures() {
        let mut page = page();
        page.list_sources().unwrap();
        let completion = page.finish_list("docs", Err(ApiError::Malformed("x".to_string())));
        assert_eq!(completion, Completion::quiet());
        assert!(!page.loading.sources.is_busy());

        page.list_sources().unwrap();
        let completion = page.finish_list(
            "docs",
            Err(ApiError::Server {
                status: 404,
                message: "Collection not found".to_string(),
                code: None,
                details: None,
            }),
        );
        assert_eq!(completion.toast.unwrap().0, ToastKind::Error);
        assert!(!page.loading.sources.is_busy());
    }
}
