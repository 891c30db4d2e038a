use crate::api::{Ack, ApiError, Entry, EntryContent, SearchResult, Source};
use crate::app::{ConfigSaveSender, NetworkEventSender};
use crate::events::network::Event as NetworkEvent;
use crate::ui::{Theme, SPINNER_FRAME_COUNT};
use log::*;
use ratatui::layout::Rect;
use std::time::Instant;

use super::error::ValidationError;
use super::form::Input;
use super::navigation::{Page, Router};
use super::pages::{
    error_message, CollectionsField, CollectionsPage, Completion, EntriesField, EntriesPage,
    FollowUp, ResetConfirmation, SearchField, SearchPage, SourcesField, SourcesPage, UploadPage,
};
use super::toast::{ToastKind, Toasts};

/// Houses data representative of application state.
///
pub struct State {
    net_sender: Option<NetworkEventSender>,
    config_save_sender: Option<ConfigSaveSender>,
    router: Router,
    theme: Theme,
    toasts: Toasts,
    confirmation: Option<ResetConfirmation>,
    search: SearchPage,
    collections: CollectionsPage,
    upload: UploadPage,
    sources: SourcesPage,
    entries: EntriesPage,
    log_visible: bool,
    terminal_size: Rect,
    spinner_index: usize,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State::build(None, None, None, false)
    }
}

impl State {
    /// Return a new state wired to the network and config-saver channels,
    /// starting on the page named by `fragment`.
    ///
    pub fn new(
        net_sender: NetworkEventSender,
        config_save_sender: ConfigSaveSender,
        fragment: Option<&str>,
        dark_mode: bool,
    ) -> Self {
        State::build(
            Some(net_sender),
            Some(config_save_sender),
            fragment,
            dark_mode,
        )
    }

    fn build(
        net_sender: Option<NetworkEventSender>,
        config_save_sender: Option<ConfigSaveSender>,
        fragment: Option<&str>,
        dark_mode: bool,
    ) -> Self {
        let router = Router::new(fragment, dark_mode);
        let reader = router.collections_reader();
        State {
            net_sender,
            config_save_sender,
            theme: Theme::for_mode(dark_mode),
            toasts: Toasts::default(),
            confirmation: None,
            search: SearchPage::new(reader.clone()),
            collections: CollectionsPage::new(reader.clone()),
            upload: UploadPage::new(reader.clone()),
            sources: SourcesPage::new(reader.clone()),
            entries: EntriesPage::new(reader),
            router,
            log_visible: false,
            terminal_size: Rect::default(),
            spinner_index: 0,
        }
    }

    /// Load the collection cache and run the entry hook of the start page.
    ///
    pub fn start(&mut self) {
        let page = self.router.current_page();
        info!("Starting on page '{}'.", page.name());
        if page != Page::Collections {
            self.refresh_collections();
        }
        self.enter_page(page);
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn current_page(&self) -> Page {
        self.router.current_page()
    }

    /// Switch to a page, running its entry hook when the page changed.
    ///
    pub fn navigate(&mut self, page: Page) {
        if self.router.navigate(page) {
            debug!("Navigated to {}", self.router.fragment());
            self.enter_page(page);
        }
    }

    /// Return to the previously visited page.
    ///
    pub fn back(&mut self) {
        match self.router.back() {
            Some(page) => {
                debug!("Went back to {}", self.router.fragment());
                self.enter_page(page);
            }
            None => debug!("No history to go back to."),
        }
    }

    fn enter_page(&mut self, page: Page) {
        match page {
            Page::Collections => self.refresh_collections(),
            Page::Sources => {
                if let Some(event) = self.sources.list_sources() {
                    self.dispatch(event);
                }
            }
            Page::Entries => {
                if let Some(event) = self.entries.list_entries() {
                    self.dispatch(event);
                }
            }
            Page::Search | Page::Upload => (),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn is_dark_mode(&self) -> bool {
        self.router.is_dark_mode()
    }

    /// Flip dark mode, swap the theme and ask for the flag to be persisted.
    ///
    pub fn toggle_dark_mode(&mut self) -> &mut Self {
        let dark_mode = self.router.toggle_dark_mode();
        self.theme = Theme::for_mode(dark_mode);
        info!("Switched to {} theme.", self.theme.name);
        if let Some(sender) = &self.config_save_sender {
            if let Err(err) = sender.send(dark_mode) {
                error!("Failed to request config save: {}", err);
            }
        }
        self
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn show_toast(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.toasts.push(kind, message);
    }

    /// Show a toast whose kind is given by name; unknown names show as info.
    ///
    pub fn show_toast_named(&mut self, kind: &str, message: impl Into<String>) {
        self.show_toast(ToastKind::from_name(kind), message);
    }

    pub fn prune_toasts(&mut self) {
        self.toasts.prune(Instant::now());
    }

    pub fn confirmation(&self) -> Option<&ResetConfirmation> {
        self.confirmation.as_ref()
    }

    /// Open the reset modal for a collection. A missing name aborts with a
    /// warning.
    ///
    pub fn confirm_reset_collection(&mut self, origin: Page, name: &str) {
        if name.is_empty() {
            self.show_toast(
                ToastKind::Warning,
                ValidationError::CollectionNotSelected.to_string(),
            );
            return;
        }
        self.confirmation = Some(ResetConfirmation {
            origin,
            collection: name.to_owned(),
        });
    }

    /// Reset the collection awaiting confirmation.
    ///
    pub fn accept_confirmation(&mut self) {
        let confirmation = match self.confirmation.take() {
            Some(confirmation) => confirmation,
            None => return,
        };
        let event = match confirmation.origin {
            Page::Entries => self.entries.reset_collection(&confirmation.collection),
            _ => self.collections.reset_collection(&confirmation.collection),
        };
        self.dispatch(event);
    }

    pub fn cancel_confirmation(&mut self) {
        if let Some(confirmation) = self.confirmation.take() {
            debug!("Cancelled reset of '{}'.", confirmation.collection);
        }
    }

    pub fn search(&self) -> &SearchPage {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchPage {
        &mut self.search
    }

    pub fn collections(&self) -> &CollectionsPage {
        &self.collections
    }

    pub fn collections_mut(&mut self) -> &mut CollectionsPage {
        &mut self.collections
    }

    pub fn upload(&self) -> &UploadPage {
        &self.upload
    }

    pub fn upload_mut(&mut self) -> &mut UploadPage {
        &mut self.upload
    }

    pub fn sources(&self) -> &SourcesPage {
        &self.sources
    }

    pub fn sources_mut(&mut self) -> &mut SourcesPage {
        &mut self.sources
    }

    pub fn entries(&self) -> &EntriesPage {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut EntriesPage {
        &mut self.entries
    }

    /// Dispatch the event of a validated action, or warn about the input.
    ///
    pub fn run_action(&mut self, action: Result<NetworkEvent, ValidationError>) {
        match action {
            Ok(event) => self.dispatch(event),
            Err(e) => self.show_toast(ToastKind::Warning, e.to_string()),
        }
    }

    /// Run the primary action of the current page for the focused field.
    ///
    pub fn submit(&mut self) {
        match self.current_page() {
            Page::Search => {
                if self.search.focus != SearchField::Results {
                    let action = self.search.search();
                    self.run_action(action);
                }
            }
            Page::Collections => match self.collections.focus {
                CollectionsField::Name => {
                    let action = self.collections.create_collection();
                    self.run_action(action);
                }
                CollectionsField::List => self.reset_selected(),
            },
            Page::Upload => {
                let action = self.upload.upload_file();
                self.run_action(action);
            }
            Page::Sources => {
                if self.sources.focus != SourcesField::List {
                    let action = self.sources.add_source();
                    self.run_action(action);
                }
            }
            Page::Entries => match self.entries.focus {
                EntriesField::Collection => self.refresh_current(),
                EntriesField::List => self.view_selected(),
            },
        }
    }

    /// Move focus between the fields of the current page.
    ///
    pub fn next_field(&mut self, delta: isize) {
        match self.current_page() {
            Page::Search => self.search.next_field(delta),
            Page::Collections => self.collections.next_field(delta),
            Page::Upload => self.upload.next_field(delta),
            Page::Sources => self.sources.next_field(delta),
            Page::Entries => self.entries.next_field(delta),
        }
    }

    /// Focused text input of the current page, if any.
    ///
    pub fn input_mut(&mut self) -> Option<&mut Input> {
        match self.current_page() {
            Page::Search => self.search.input_mut(),
            Page::Collections => self.collections.input_mut(),
            Page::Upload => self.upload.input_mut(),
            Page::Sources => self.sources.input_mut(),
            Page::Entries => None,
        }
    }

    pub fn is_editing(&mut self) -> bool {
        self.confirmation.is_none() && self.input_mut().is_some()
    }

    /// Step the collection picker of the current page. Sources and entries
    /// are re-listed when the selection changes.
    ///
    pub fn select_collection(&mut self, delta: isize) {
        let names = self.router.collections();
        match self.current_page() {
            Page::Search => {
                self.search.collection.cycle(&names, delta);
            }
            Page::Upload => {
                self.upload.collection.cycle(&names, delta);
            }
            Page::Sources => {
                if self.sources.collection.cycle(&names, delta) {
                    self.refresh_current();
                }
            }
            Page::Entries => {
                if self.entries.collection.cycle(&names, delta) {
                    self.refresh_current();
                }
            }
            Page::Collections => (),
        }
    }

    /// Move the list cursor of the current page, or scroll the open preview.
    ///
    pub fn move_cursor(&mut self, delta: isize) {
        match self.current_page() {
            Page::Search => {
                let len = self.search.results().len();
                self.search.cursor.step(len, delta);
            }
            Page::Collections => {
                let len = self.collections.collections().len();
                self.collections.cursor.step(len, delta);
            }
            Page::Sources => {
                let len = self.sources.sources().len();
                self.sources.cursor.step(len, delta);
            }
            Page::Entries if self.entries.preview().is_some() => {
                self.entries.scroll_preview(delta as i32);
            }
            Page::Entries => {
                let len = self.entries.entries().len();
                self.entries.cursor.step(len, delta);
            }
            Page::Upload => (),
        }
    }

    /// Re-fetch whatever the current page lists.
    ///
    pub fn refresh_current(&mut self) {
        match self.current_page() {
            Page::Sources => match self.sources.list_sources() {
                Some(event) => self.dispatch(event),
                None => self.show_toast(
                    ToastKind::Warning,
                    ValidationError::CollectionNotSelected.to_string(),
                ),
            },
            Page::Entries => match self.entries.list_entries() {
                Some(event) => self.dispatch(event),
                None => self.show_toast(
                    ToastKind::Warning,
                    ValidationError::CollectionNotSelected.to_string(),
                ),
            },
            _ => self.refresh_collections(),
        }
    }

    /// Remove the selected source or delete the selected entry.
    ///
    pub fn delete_selected(&mut self) {
        let action = match self.current_page() {
            Page::Sources => self.sources.remove_selected(),
            Page::Entries => self.entries.delete_selected(),
            _ => return,
        };
        self.run_action(action);
    }

    /// Ask to reset the collection selected on the current page.
    ///
    pub fn reset_selected(&mut self) {
        match self.current_page() {
            Page::Collections => {
                let name = self.collections.selected_collection().unwrap_or_default();
                self.confirm_reset_collection(Page::Collections, &name);
            }
            Page::Entries => {
                let name = self
                    .entries
                    .collection
                    .selected()
                    .unwrap_or_default()
                    .to_owned();
                self.confirm_reset_collection(Page::Entries, &name);
            }
            _ => (),
        }
    }

    pub fn view_selected(&mut self) {
        if self.current_page() == Page::Entries {
            let action = self.entries.view_selected();
            self.run_action(action);
        }
    }

    /// Text of the highlighted search result.
    ///
    pub fn selected_result_text(&self) -> Option<String> {
        if self.current_page() != Page::Search {
            return None;
        }
        self.search.selected_result().cloned()
    }

    /// Refetch the shared collection cache, tracking progress on the
    /// collections page.
    ///
    pub fn refresh_collections(&mut self) {
        let event = self.collections.refresh();
        self.dispatch(event);
    }

    pub fn finish_fetch_collections(&mut self, outcome: Result<Vec<String>, ApiError>) {
        match outcome {
            Ok(names) => self.router.replace_collections(names),
            Err(e) if e.is_malformed() => {
                warn!("Clearing collections after malformed response: {}", e);
                self.router.replace_collections(vec![]);
            }
            Err(e) => {
                let message = error_message(&e, "Failed to fetch collections");
                self.show_toast(ToastKind::Error, message);
            }
        }
        self.collections.finish_refresh();
    }

    pub fn finish_create_collection(&mut self, name: &str, outcome: Result<Ack, ApiError>) {
        let completion = self.collections.finish_create(name, outcome);
        self.complete(completion);
    }

    pub fn finish_reset_collection(
        &mut self,
        origin: Page,
        name: &str,
        outcome: Result<Ack, ApiError>,
    ) {
        let completion = match origin {
            Page::Entries => self.entries.finish_reset(name, outcome),
            _ => self.collections.finish_reset(name, outcome),
        };
        self.complete(completion);
    }

    pub fn finish_search(&mut self, query: &str, outcome: Result<Vec<SearchResult>, ApiError>) {
        let completion = self.search.finish_search(query, outcome);
        self.complete(completion);
    }

    pub fn finish_upload(&mut self, outcome: Result<Ack, ApiError>) {
        let completion = self.upload.finish_upload(outcome);
        self.complete(completion);
    }

    pub fn finish_list_sources(&mut self, collection: &str, outcome: Result<Vec<Source>, ApiError>) {
        let completion = self.sources.finish_list(collection, outcome);
        self.complete(completion);
    }

    pub fn finish_add_source(&mut self, outcome: Result<Ack, ApiError>) {
        let completion = self.sources.finish_add(outcome);
        self.complete(completion);
    }

    pub fn finish_remove_source(&mut self, outcome: Result<Ack, ApiError>) {
        let completion = self.sources.finish_remove(outcome);
        self.complete(completion);
    }

    pub fn finish_list_entries(&mut self, collection: &str, outcome: Result<Vec<Entry>, ApiError>) {
        let completion = self.entries.finish_list(collection, outcome);
        self.complete(completion);
    }

    pub fn finish_delete_entry(&mut self, outcome: Result<Ack, ApiError>) {
        let completion = self.entries.finish_delete(outcome);
        self.complete(completion);
    }

    pub fn finish_entry_content(&mut self, outcome: Result<EntryContent, ApiError>) {
        let completion = self.entries.finish_content(outcome);
        self.complete(completion);
    }

    /// Show the completion toast and run the requested refresh.
    ///
    fn complete(&mut self, completion: Completion) {
        if let Some((kind, message)) = completion.toast {
            self.show_toast(kind, message);
        }
        match completion.follow_up {
            Some(FollowUp::RefreshCollections) => self.refresh_collections(),
            Some(FollowUp::ListSources) => {
                if let Some(event) = self.sources.list_sources() {
                    self.dispatch(event);
                }
            }
            Some(FollowUp::ListEntries) => {
                if let Some(event) = self.entries.list_entries() {
                    self.dispatch(event);
                }
            }
            None => (),
        }
    }

    pub fn is_log_visible(&self) -> bool {
        self.log_visible
    }

    pub fn toggle_log(&mut self) -> &mut Self {
        self.log_visible = !self.log_visible;
        self
    }

    /// Update the terminal size.
    ///
    pub fn set_terminal_size(&mut self, size: Rect) -> &mut Self {
        self.terminal_size = size;
        self
    }

    pub fn get_terminal_size(&self) -> Rect {
        self.terminal_size
    }

    /// Advance the spinner index.
    ///
    pub fn advance_spinner_index(&mut self) -> &mut Self {
        self.spinner_index += 1;
        if self.spinner_index >= SPINNER_FRAME_COUNT {
            self.spinner_index = 0;
        }
        self
    }

    /// Return the current spinner index.
    ///
    pub fn get_spinner_index(&self) -> usize {
        self.spinner_index
    }

    /// Dispatches an asynchronous network event.
    ///
    pub fn dispatch(&self, event: NetworkEvent) {
        if let Some(net_sender) = &self.net_sender {
            if let Err(err) = net_sender.send(event) {
                error!("Recieved error from network dispatch: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::{channel, Receiver};

    fn wired(fragment: Option<&str>) -> (State, Receiver<NetworkEvent>, Receiver<bool>) {
        let (net_tx, net_rx) = channel();
        let (config_tx, config_rx) = channel();
        let state = State::new(net_tx, config_tx, fragment, false);
        (state, net_rx, config_rx)
    }

    #[test]
    fn start_fetches_collections_once() {
        let (mut state, rx, _) = wired(Some("#collections"));
        state.start();
        assert_eq!(rx.try_recv(), Ok(NetworkEvent::FetchCollections));
        assert!(rx.try_recv().is_err());
        assert!(state.collections().loading.collections.is_busy());
    }

    #[test]
    fn unknown_start_fragment_lands_on_search() {
        let (state, _, _) = wired(Some("#nowhere"));
        assert_eq!(state.current_page(), Page::Search);
        assert_eq!(state.router().fragment(), "#search");
    }

    #[test]
    fn navigating_to_entries_relists_selected_collection() {
        let (mut state, rx, _) = wired(None);
        state.entries_mut().collection.select("docs");
        state.navigate(Page::Entries);
        assert_eq!(
            rx.try_recv(),
            Ok(NetworkEvent::ListEntries {
                collection: "docs".to_string()
            })
        );
        state.navigate(Page::Entries);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn back_returns_to_previous_page() {
        let (mut state, _, _) = wired(None);
        state.navigate(Page::Upload);
        state.navigate(Page::Collections);
        state.back();
        assert_eq!(state.current_page(), Page::Upload);
        state.back();
        assert_eq!(state.current_page(), Page::Search);
    }

    #[test]
    fn cancelled_reset_sends_nothing() {
        let (mut state, rx, _) = wired(None);
        state.confirm_reset_collection(Page::Collections, "docs");
        assert!(state.confirmation().unwrap().prompt().contains("docs"));
        state.cancel_confirmation();
        assert!(state.confirmation().is_none());
        assert!(rx.try_recv().is_err());
        assert!(!state.collections().loading.reset.is_busy());
    }

    #[test]
    fn accepted_reset_is_dispatched() {
        let (mut state, rx, _) = wired(None);
        state.confirm_reset_collection(Page::Entries, "docs");
        state.accept_confirmation();
        assert_eq!(
            rx.try_recv(),
            Ok(NetworkEvent::ResetCollection {
                origin: Page::Entries,
                name: "docs".to_string()
            })
        );
        assert!(state.entries().loading.reset.is_busy_with("docs"));
        assert!(state.confirmation().is_none());
    }

    #[test]
    fn reset_without_name_warns() {
        let (mut state, rx, _) = wired(None);
        state.confirm_reset_collection(Page::Collections, "");
        assert!(state.confirmation().is_none());
        assert_eq!(state.toasts().last().unwrap().kind, ToastKind::Warning);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn invalid_input_warns_without_dispatch() {
        let (mut state, rx, _) = wired(None);
        for page in Page::ALL {
            state.navigate(page);
            while rx.try_recv().is_ok() {}
            if page == Page::Collections {
                state.collections_mut().focus = CollectionsField::Name;
            }
            let before = state.toasts().len();
            state.submit();
            assert_eq!(state.toasts().len(), before + 1);
            assert_eq!(state.toasts().last().unwrap().kind, ToastKind::Warning);
            assert!(rx.try_recv().is_err());
        }
    }

    #[test]
    fn dark_mode_toggle_requests_save() {
        let (mut state, _, config_rx) = wired(None);
        assert!(!state.is_dark_mode());
        state.toggle_dark_mode();
        assert!(state.is_dark_mode());
        assert_eq!(state.theme().name, Theme::dark().name);
        assert_eq!(config_rx.try_recv(), Ok(true));
    }

    #[test]
    fn malformed_collections_clear_cache() {
        let mut state = State::default();
        state
            .router()
            .replace_collections(vec!["docs".to_string()]);
        state.finish_fetch_collections(Err(ApiError::Malformed("bad".to_string())));
        assert!(state.router().collections().is_empty());
        assert!(state.toasts().is_empty());
    }

    #[test]
    fn failed_fetch_keeps_cache() {
        let mut state = State::default();
        state
            .router()
            .replace_collections(vec!["docs".to_string()]);
        state.finish_fetch_collections(Err(ApiError::Server {
            status: 500,
            message: "Failed to list collections".to_string(),
            code: None,
            details: None,
        }));
        assert_eq!(state.router().collections().len(), 1);
        assert_eq!(
            state.toasts().last().unwrap().message,
            "Failed to list collections"
        );
    }

    #[test]
    fn named_toasts_fall_back_to_info() {
        let mut state = State::default();
        state.show_toast_named("shiny", "hello");
        assert_eq!(state.toasts().last().unwrap().kind, ToastKind::Info);
        state.show_toast_named("error", "boom");
        assert_eq!(state.toasts().last().unwrap().kind, ToastKind::Error);
    }

    #[test]
    fn picker_change_relists_sources() {
        let (mut state, rx, _) = wired(Some("sources"));
        state
            .router()
            .replace_collections(vec!["docs".to_string(), "reports".to_string()]);
        state.select_collection(1);
        assert_eq!(
            rx.try_recv(),
            Ok(NetworkEvent::ListSources {
                collection: "docs".to_string()
            })
        );
    }

    #[test]
    fn spinner_wraps() {
        let mut state = State::default();
        for _ in 0..SPINNER_FRAME_COUNT {
            state.advance_spinner_index();
        }
        assert_eq!(state.get_spinner_index(), 0);
    }
}
