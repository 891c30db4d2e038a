//! Navigation-related state types.
//!
//! This module contains the page enum and the router that tracks the current
//! page, its fragment, the back history, the dark-mode flag and the shared
//! collection cache.

use super::cache::{CollectionCache, CollectionsReader};
use log::*;
use std::sync::Arc;

/// Specifying the different pages.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Page {
    Search,
    Collections,
    Upload,
    Sources,
    Entries,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Search,
        Page::Collections,
        Page::Upload,
        Page::Sources,
        Page::Entries,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Page::Search => "search",
            Page::Collections => "collections",
            Page::Upload => "upload",
            Page::Sources => "sources",
            Page::Entries => "entries",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Search => "Search",
            Page::Collections => "Collections",
            Page::Upload => "Upload",
            Page::Sources => "Sources",
            Page::Entries => "Entries",
        }
    }

    pub fn fragment(&self) -> String {
        format!("#{}", self.name())
    }

    /// Parse a fragment with or without its leading `#`.
    ///
    pub fn from_fragment(fragment: &str) -> Option<Page> {
        let name = fragment.strip_prefix('#').unwrap_or(fragment);
        Page::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn index(&self) -> usize {
        Page::ALL.iter().position(|p| p == self).unwrap_or(0)
    }
}

/// Houses current page, fragment history, dark mode and the collection cache.
///
#[derive(Debug)]
pub struct Router {
    current_page: Page,
    fragment: String,
    history: Vec<String>,
    dark_mode: bool,
    collections: CollectionCache,
}

impl Default for Router {
    fn default() -> Self {
        Router::new(None, false)
    }
}

impl Router {
    /// Start on the page named by the fragment, or on search with the
    /// fragment rewritten when it names no known page.
    ///
    pub fn new(fragment: Option<&str>, dark_mode: bool) -> Router {
        let current_page = match fragment.and_then(Page::from_fragment) {
            Some(page) => page,
            None => {
                if let Some(fragment) = fragment {
                    debug!("Ignoring unknown start fragment '{}'", fragment);
                }
                Page::Search
            }
        };
        Router {
            current_page,
            fragment: current_page.fragment(),
            history: vec![],
            dark_mode,
            collections: CollectionCache::default(),
        }
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Move to a page, recording the previous fragment for `back`. Returns
    /// whether the page changed.
    ///
    pub fn navigate(&mut self, page: Page) -> bool {
        let changed = self.current_page != page;
        self.current_page = page;
        let fragment = page.fragment();
        if self.fragment != fragment {
            let previous = std::mem::replace(&mut self.fragment, fragment);
            self.history.push(previous);
        }
        changed
    }

    /// React to a fragment changed from outside. Unknown fragments are
    /// stored but leave the page alone. Returns the new page if it changed.
    ///
    pub fn on_fragment_change(&mut self, fragment: &str) -> Option<Page> {
        self.fragment = fragment.to_owned();
        match Page::from_fragment(fragment) {
            Some(page) if page != self.current_page => {
                self.current_page = page;
                Some(page)
            }
            _ => None,
        }
    }

    /// Return to the previous fragment.
    ///
    pub fn back(&mut self) -> Option<Page> {
        let previous = self.history.pop()?;
        self.on_fragment_change(&previous)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    pub fn collections(&self) -> Arc<Vec<String>> {
        self.collections.snapshot()
    }

    pub fn collections_reader(&self) -> CollectionsReader {
        self.collections.reader()
    }

    pub fn replace_collections(&self, names: Vec<String>) {
        debug!("Replacing collection cache with {} names", names.len());
        self.collections.replace(names);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_fragments() {
        for page in Page::ALL {
            assert_eq!(Page::from_fragment(&page.fragment()), Some(page));
            assert_eq!(Page::from_fragment(page.name()), Some(page));
        }
        assert_eq!(Page::from_fragment("#settings"), None);
        assert_eq!(Page::from_fragment(""), None);
        assert_eq!(Page::Sources.index(), 3);
    }

    #[test]
    fn starts_on_known_fragment() {
        let router = Router::new(Some("#entries"), false);
        assert_eq!(router.current_page(), Page::Entries);
        assert_eq!(router.fragment(), "#entries");
    }

    #[test]
    fn unknown_start_fragment_is_rewritten() {
        let router = Router::new(Some("#nope"), false);
        assert_eq!(router.current_page(), Page::Search);
        assert_eq!(router.fragment(), "#search");

        let router = Router::new(None, true);
        assert_eq!(router.fragment(), "#search");
        assert!(router.is_dark_mode());
    }

    #[test]
    fn navigate_updates_fragment_and_history() {
        let mut router = Router::default();
        assert!(router.navigate(Page::Upload));
        assert_eq!(router.fragment(), "#upload");
        assert_eq!(router.history_len(), 1);

        // Navigating to the current page records nothing.
        assert!(!router.navigate(Page::Upload));
        assert_eq!(router.history_len(), 1);
    }

    #[test]
    fn back_reverses_navigation_without_recording() {
        let mut router = Router::default();
        router.navigate(Page::Collections);
        router.navigate(Page::Sources);
        assert_eq!(router.back(), Some(Page::Collections));
        assert_eq!(router.fragment(), "#collections");
        assert_eq!(router.back(), Some(Page::Search));
        assert_eq!(router.history_len(), 0);
        assert_eq!(router.back(), None);
    }

    #[test]
    fn external_unknown_fragment_keeps_page() {
        let mut router = Router::new(Some("sources"), false);
        assert_eq!(router.on_fragment_change("#bogus"), None);
        assert_eq!(router.current_page(), Page::Sources);
        assert_eq!(router.on_fragment_change("#upload"), Some(Page::Upload));
        assert_eq!(router.history_len(), 0);
    }

    #[test]
    fn toggle_dark_mode() {
        let mut router = Router::default();
        assert!(router.toggle_dark_mode());
        assert!(!router.toggle_dark_mode());
    }
}
