use super::styling;
use crate::state::{CollectionPicker, Input};
use crate::ui::theme::Theme;
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Bordered block for a form field, highlighted when focused.
///
pub fn block<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    let block = Block::default().borders(Borders::ALL);
    if focused {
        block
            .border_style(styling::active_block_border_style(theme))
            .title(Span::styled(title, styling::active_block_title_style()))
    } else {
        block
            .border_style(styling::normal_block_border_style(theme))
            .title(title)
    }
}

/// Text input field; the focused field shows a trailing cursor.
///
pub fn input<'a>(title: &'a str, input: &Input, focused: bool, theme: &Theme) -> Paragraph<'a> {
    let mut spans = vec![Span::styled(
        input.value().to_string(),
        styling::normal_text_style(theme),
    )];
    if focused {
        spans.push(Span::styled("▏", styling::active_block_border_style(theme)));
    }
    Paragraph::new(Line::from(spans)).block(block(title, focused, theme))
}

/// Collection picker; Left/Right cycle through the cached names.
///
pub fn picker<'a>(
    title: &'a str,
    picker: &CollectionPicker,
    available: usize,
    focused: bool,
    theme: &Theme,
) -> Paragraph<'a> {
    let line = match picker.selected() {
        Some(name) if focused => Line::from(vec![
            Span::styled("◀ ", styling::muted_text_style(theme)),
            Span::styled(name.to_string(), styling::normal_text_style(theme)),
            Span::styled(" ▶", styling::muted_text_style(theme)),
        ]),
        Some(name) => Line::from(Span::styled(
            name.to_string(),
            styling::normal_text_style(theme),
        )),
        None if available == 0 => Line::from(Span::styled(
            "No collections available",
            styling::muted_text_style(theme),
        )),
        None => Line::from(Span::styled(
            "Select a collection (◀ ▶)",
            styling::muted_text_style(theme),
        )),
    };
    Paragraph::new(line).block(block(title, focused, theme))
}
