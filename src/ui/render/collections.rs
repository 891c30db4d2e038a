use super::Frame;
use crate::state::{CollectionsField, State};
use crate::ui::widgets::{field, spinner, styling};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

/// Render the create form and the collection list.
///
pub fn collections(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let page = state.collections();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(size);

    frame.render_widget(
        field::input(
            "New collection name",
            &page.name,
            page.focus == CollectionsField::Name,
            theme,
        ),
        rows[0],
    );
    let status = format!(
        " {}",
        spinner::label(state, &page.loading.create, "Enter to create", "Creating...")
    );
    frame.render_widget(
        Paragraph::new(Span::styled(status, styling::muted_text_style(theme))),
        rows[1],
    );

    let names = page.collections();
    let items: Vec<ListItem> = if names.is_empty() && !page.loading.collections.is_busy() {
        vec![ListItem::new(Span::styled(
            "No collections yet",
            styling::muted_text_style(theme),
        ))]
    } else {
        names
            .iter()
            .map(|name| {
                let mut spans = vec![Span::raw(name.clone())];
                if page.loading.reset.is_busy_with(name) {
                    spans.push(Span::styled(
                        format!("  {} Resetting...", spinner::frame(state)),
                        styling::muted_text_style(theme),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect()
    };
    let title = if page.loading.collections.is_busy() {
        format!("Collections {}", spinner::frame(state))
    } else {
        format!("Collections ({})", names.len())
    };
    let list = List::new(items)
        .block(field::block(&title, page.focus == CollectionsField::List, theme))
        .style(styling::normal_text_style(theme))
        .highlight_style(styling::current_list_item_style(theme));
    let mut list_state = ListState::default().with_selected(page.cursor.selected());
    frame.render_stateful_widget(list, rows[2], &mut list_state);
}
