use super::Frame;
use crate::state::{
    CollectionsField, EntriesField, Page, SearchField, SourcesField, State,
};
use crate::ui::widgets::styling;
use ratatui::{layout::Rect, text::Span, widgets::Paragraph};

const GLOBAL_HINTS: &str = "F1-F5 pages · Ctrl+B back · Ctrl+D theme · Ctrl+L log · Ctrl+C quit";

/// Key hints for the focused part of the current page.
///
fn page_hints(state: &State) -> &'static str {
    if state.confirmation().is_some() {
        return "Enter/y confirm · Esc/n cancel";
    }
    match state.current_page() {
        Page::Search => match state.search().focus {
            SearchField::Collection => "Tab next · ◀ ▶ collection · Enter search",
            SearchField::Results => "↑↓ select · y copy · Tab next",
            _ => "Tab next · Enter search",
        },
        Page::Collections => match state.collections().focus {
            CollectionsField::Name => "Tab list · Enter create",
            CollectionsField::List => "↑↓ select · r reset · R refresh · Tab form",
        },
        Page::Upload => "Tab next · ◀ ▶ collection · Enter upload",
        Page::Sources => match state.sources().focus {
            SourcesField::List => "↑↓ select · d remove · R refresh · Tab next",
            _ => "Tab next · ◀ ▶ collection · Enter add source",
        },
        Page::Entries if state.entries().preview().is_some() => "↑↓ scroll · Esc close",
        Page::Entries => match state.entries().focus {
            EntriesField::Collection => "◀ ▶ collection · Enter list · r reset · Tab list",
            EntriesField::List => "↑↓ select · Enter/v view · d delete · r reset · R refresh",
        },
    }
}

/// Render footer hints.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let text = format!(" {}  |  {}", page_hints(state), GLOBAL_HINTS);
    let paragraph = Paragraph::new(Span::styled(text, styling::muted_text_style(state.theme())));
    frame.render_widget(paragraph, size);
}
