use super::{collections, entries, footer, header, log, overlay, search, sources, upload, Frame};
use crate::state::{Page, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::Block,
};

/// Render all widgets according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    state.prune_toasts();
    let size = frame.size();
    frame.render_widget(
        Block::default().style(styling::normal_text_style(state.theme())),
        size,
    );

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(8)];
    if state.is_log_visible() {
        constraints.push(Constraint::Length(10));
    }
    constraints.push(Constraint::Length(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    header(frame, rows[0], state);
    match state.current_page() {
        Page::Search => search::search(frame, rows[1], state),
        Page::Collections => collections::collections(frame, rows[1], state),
        Page::Upload => upload::upload(frame, rows[1], state),
        Page::Sources => sources::sources(frame, rows[1], state),
        Page::Entries => entries::entries(frame, rows[1], state),
    }
    if state.is_log_visible() {
        log(frame, rows[2], state);
    }
    footer(frame, rows[rows.len() - 1], state);

    if state.current_page() == Page::Entries && state.entries().preview().is_some() {
        overlay::preview(frame, size, state);
    }
    if state.confirmation().is_some() {
        overlay::confirmation(frame, size, state);
    }
    overlay::toasts(frame, size, state);
}
