use super::Frame;
use crate::state::{EntriesField, State};
use crate::ui::widgets::{field, spinner, styling};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

/// Render the entries of the selected collection.
///
pub fn entries(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let page = state.entries();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(size);

    frame.render_widget(
        field::picker(
            "Collection",
            &page.collection,
            page.collections().len(),
            page.focus == EntriesField::Collection,
            theme,
        ),
        rows[0],
    );
    let status = format!(
        " {}",
        spinner::label(
            state,
            &page.loading.reset,
            "r to reset the collection",
            "Resetting..."
        )
    );
    frame.render_widget(
        Paragraph::new(Span::styled(status, styling::muted_text_style(theme))),
        rows[1],
    );

    let items: Vec<ListItem> = if page.collection.selected().is_none() {
        vec![ListItem::new(Span::styled(
            "Select a collection to see its entries",
            styling::muted_text_style(theme),
        ))]
    } else if page.entries().is_empty() && !page.loading.entries.is_busy() {
        vec![ListItem::new(Span::styled(
            "No entries in this collection",
            styling::muted_text_style(theme),
        ))]
    } else {
        page.entries()
            .iter()
            .map(|entry| {
                let key = entry.key();
                let mut spans = vec![Span::raw(entry.to_string())];
                if page.loading.delete.is_busy_with(&key) {
                    spans.push(Span::styled(
                        format!("  {} Deleting...", spinner::frame(state)),
                        styling::muted_text_style(theme),
                    ));
                } else if page.loading.content.is_busy_with(&key) {
                    spans.push(Span::styled(
                        format!("  {} Loading...", spinner::frame(state)),
                        styling::muted_text_style(theme),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect()
    };
    let title = if page.loading.entries.is_busy() {
        format!("Entries {}", spinner::frame(state))
    } else {
        format!("Entries ({})", page.entries().len())
    };
    let list = List::new(items)
        .block(field::block(&title, page.focus == EntriesField::List, theme))
        .style(styling::normal_text_style(theme))
        .highlight_style(styling::current_list_item_style(theme));
    let mut list_state = ListState::default().with_selected(page.cursor.selected());
    frame.render_stateful_widget(list, rows[2], &mut list_state);
}
