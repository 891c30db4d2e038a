use crate::api::{Entry, Recall};
use crate::state::{Page, State};
use anyhow::Result;
use log::*;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    FetchCollections,
    CreateCollection {
        name: String,
    },
    ResetCollection {
        origin: Page,
        name: String,
    },
    Search {
        collection: String,
        query: String,
        max_results: i64,
    },
    Upload {
        collection: String,
        path: PathBuf,
    },
    ListSources {
        collection: String,
    },
    AddSource {
        collection: String,
        url: String,
        update_interval: u32,
    },
    RemoveSource {
        collection: String,
        url: String,
    },
    ListEntries {
        collection: String,
    },
    DeleteEntry {
        collection: String,
        entry: Entry,
    },
    EntryContent {
        collection: String,
        entry: Entry,
    },
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    recall: &'a Recall,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, recall: &'a Recall) -> Self {
        Handler { state, recall }
    }

    /// Handle network events by type. The request runs without the state
    /// lock; the lock is only taken to hand the outcome to its page.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::FetchCollections => {
                let outcome = self.recall.collections().await;
                if let Ok(names) = &outcome {
                    info!("Received {} collections.", names.len());
                }
                self.state.lock().await.finish_fetch_collections(outcome);
            }
            Event::CreateCollection { name } => {
                info!("Creating collection '{}'...", name);
                let outcome = self.recall.create_collection(&name).await;
                self.state
                    .lock()
                    .await
                    .finish_create_collection(&name, outcome);
            }
            Event::ResetCollection { origin, name } => {
                info!("Resetting collection '{}'...", name);
                let outcome = self.recall.reset_collection(&name).await;
                self.state
                    .lock()
                    .await
                    .finish_reset_collection(origin, &name, outcome);
            }
            Event::Search {
                collection,
                query,
                max_results,
            } => {
                let outcome = self.recall.search(&collection, &query, max_results).await;
                if let Ok(results) = &outcome {
                    info!(
                        "Received {} results for '{}' in '{}'.",
                        results.len(),
                        query,
                        collection
                    );
                }
                self.state.lock().await.finish_search(&query, outcome);
            }
            Event::Upload { collection, path } => {
                info!("Uploading {} to '{}'...", path.display(), collection);
                let outcome = self.recall.upload(&collection, &path).await;
                self.state.lock().await.finish_upload(outcome);
            }
            Event::ListSources { collection } => {
                let outcome = self.recall.sources(&collection).await;
                self.state
                    .lock()
                    .await
                    .finish_list_sources(&collection, outcome);
            }
            Event::AddSource {
                collection,
                url,
                update_interval,
            } => {
                info!("Adding source {} to '{}'...", url, collection);
                let outcome = self
                    .recall
                    .add_source(&collection, &url, update_interval)
                    .await;
                self.state.lock().await.finish_add_source(outcome);
            }
            Event::RemoveSource { collection, url } => {
                info!("Removing source {} from '{}'...", url, collection);
                let outcome = self.recall.remove_source(&collection, &url).await;
                self.state.lock().await.finish_remove_source(outcome);
            }
            Event::ListEntries { collection } => {
                let outcome = self.recall.entries(&collection).await;
                self.state
                    .lock()
                    .await
                    .finish_list_entries(&collection, outcome);
            }
            Event::DeleteEntry { collection, entry } => {
                info!("Deleting entry {} from '{}'...", entry, collection);
                let outcome = self.recall.delete_entry(&collection, &entry).await;
                self.state.lock().await.finish_delete_entry(outcome);
            }
            Event::EntryContent { collection, entry } => {
                let outcome = self.recall.entry_content(&collection, &entry).await;
                self.state.lock().await.finish_entry_content(outcome);
            }
        }
        Ok(())
    }
}
