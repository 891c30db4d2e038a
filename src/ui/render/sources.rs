use super::Frame;
use crate::state::{SourcesField, State};
use crate::ui::widgets::{field, spinner, styling};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

/// Render the source form and the sources of the selected collection.
///
pub fn sources(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let page = state.sources();
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
            Constraint::Percentage(25),
            Constraint::Percentage(55),
            Constraint::Percentage(20),
        ])
        .split(rows[0]);

    frame.render_widget(
        field::picker(
            "Collection",
            &page.collection,
            page.collections().len(),
            page.focus == SourcesField::Collection,
            theme,
        ),
        form[0],
    );
    frame.render_widget(
        field::input("Source URL", &page.url, page.focus == SourcesField::Url, theme),
        form[1],
    );
    frame.render_widget(
        field::input(
            "Interval (min)",
            &page.interval,
            page.focus == SourcesField::Interval,
            theme,
        ),
        form[2],
    );
    let status = format!(
        " {}",
        spinner::label(state, &page.loading.add_source, "Enter to add source", "Adding...")
    );
    frame.render_widget(
        Paragraph::new(Span::styled(status, styling::muted_text_style(theme))),
        rows[1],
    );

    let items: Vec<ListItem> = if page.collection.selected().is_none() {
        vec![ListItem::new(Span::styled(
            "Select a collection to see its sources",
            styling::muted_text_style(theme),
        ))]
    } else if page.sources().is_empty() && !page.loading.sources.is_busy() {
        vec![ListItem::new(Span::styled(
            "No sources for this collection",
            styling::muted_text_style(theme),
        ))]
    } else {
        page.sources()
            .iter()
            .map(|source| {
                let mut spans = vec![
                    Span::raw(source.url.clone()),
                    Span::styled(
                        format!("  every {} min", source.update_interval),
                        styling::muted_text_style(theme),
                    ),
                ];
                if let Some(last_update) = &source.last_update {
                    spans.push(Span::styled(
                        format!("  · last update {}", last_update),
                        styling::muted_text_style(theme),
                    ));
                }
                if page.loading.remove_source.is_busy_with(&source.url) {
                    spans.push(Span::styled(
                        format!("  {} Removing...", spinner::frame(state)),
                        styling::muted_text_style(theme),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect()
    };
    let title = if page.loading.sources.is_busy() {
        format!("Sources {}", spinner::frame(state))
    } else {
        format!("Sources ({})", page.sources().len())
    };
    let list = List::new(items)
        .block(field::block(&title, page.focus == SourcesField::List, theme))
        .style(styling::normal_text_style(theme))
        .highlight_style(styling::current_list_item_style(theme));
    let mut list_state = ListState::default().with_selected(page.cursor.selected());
    frame.render_stateful_widget(list, rows[2], &mut list_state);
}
