use super::Frame;
use crate::state::{SearchField, State, ToastKind};
use crate::ui::widgets::{field, spinner, styling};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

/// Render search form and results.
///
pub fn search(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let page = state.search();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(size);
    let form = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(55),
            Constraint::Percentage(15),
        ])
        .split(rows[0]);

    frame.render_widget(
        field::picker(
            "Collection",
            &page.collection,
            page.collections().len(),
            page.focus == SearchField::Collection,
            theme,
        ),
        form[0],
    );
    frame.render_widget(
        field::input("Query", &page.query, page.focus == SearchField::Query, theme),
        form[1],
    );
    frame.render_widget(
        field::input(
            "Max results",
            &page.max_results,
            page.focus == SearchField::MaxResults,
            theme,
        ),
        form[2],
    );

    let status = match (page.error(), page.timestamp()) {
        (Some(error), _) => Span::styled(
            format!(" {}", error),
            styling::toast_style(theme, ToastKind::Error),
        ),
        (None, Some(timestamp)) => Span::styled(
            format!(
                " {}  ·  searched at {} UTC",
                spinner::label(state, &page.loading.search, "Ready", "Searching..."),
                timestamp
            ),
            styling::muted_text_style(theme),
        ),
        (None, None) => Span::styled(
            format!(
                " {}",
                spinner::label(state, &page.loading.search, "Ready", "Searching...")
            ),
            styling::muted_text_style(theme),
        ),
    };
    frame.render_widget(Paragraph::new(Line::from(status)), rows[1]);

    let items: Vec<ListItem> = page
        .results()
        .iter()
        .map(|result| ListItem::new(result.as_str()))
        .collect();
    let title = format!("Results ({})", page.results().len());
    let list = List::new(items)
        .block(field::block(&title, page.focus == SearchField::Results, theme))
        .style(styling::normal_text_style(theme))
        .highlight_style(styling::current_list_item_style(theme));
    let mut list_state = ListState::default().with_selected(page.cursor.selected());
    frame.render_stateful_widget(list, rows[2], &mut list_state);
}
