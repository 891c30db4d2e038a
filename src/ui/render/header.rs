use super::Frame;
use crate::state::{Page, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
};

const BLOCK_TITLE: &str = "Recall";

/// Render page tabs, highlighting the current page.
///
pub fn header(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let titles: Vec<Line> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, page)| Line::from(format!("F{} {}", i + 1, page.title())))
        .collect();
    let mode = if state.is_dark_mode() { "dark" } else { "light" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme))
        .title(Span::styled(BLOCK_TITLE, styling::banner_style(theme)))
        .title(
            ratatui::widgets::block::Title::from(Span::styled(
                format!("{} · {}", state.router().fragment(), mode),
                styling::muted_text_style(theme),
            ))
            .alignment(ratatui::layout::Alignment::Right),
        );
    let tabs = Tabs::new(titles)
        .block(block)
        .style(styling::muted_text_style(theme))
        .highlight_style(styling::active_list_item_style(theme))
        .select(state.current_page().index());
    frame.render_widget(tabs, size);
}
