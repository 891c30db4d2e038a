use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use crate::utils::text_processing::truncate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const TOAST_WIDTH: u16 = 48;

/// Render the reset confirmation modal.
///
pub fn confirmation(frame: &mut Frame, size: Rect, state: &State) {
    let confirmation = match state.confirmation() {
        Some(confirmation) => confirmation,
        None => return,
    };
    let theme = state.theme();
    let popup_area = centered_rect(60, 30, size);
    frame.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            confirmation.prompt(),
            Style::default()
                .fg(theme.text.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter/y: confirm, Esc/n: cancel",
            styling::muted_text_style(theme),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    "Confirm Reset",
                    Style::default()
                        .fg(theme.error.to_color())
                        .add_modifier(Modifier::BOLD),
                ))
                .border_style(Style::default().fg(theme.error.to_color()))
                .style(Style::default().bg(theme.surface.to_color())),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

/// Render the stored content of the previewed entry.
///
pub fn preview(frame: &mut Frame, size: Rect, state: &State) {
    let content = match state.entries().preview() {
        Some(content) => content,
        None => return,
    };
    let theme = state.theme();
    let popup_area = centered_rect(80, 80, size);
    frame.render_widget(Clear, popup_area);

    let title = format!(
        "{} / {} ({} chunks)",
        content.collection,
        truncate(&content.entry, 40),
        content.chunk_count
    );
    let paragraph = Paragraph::new(content.content.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::active_block_border_style(theme))
                .title(Span::styled(title, styling::active_block_title_style()))
                .style(Style::default().bg(theme.surface.to_color())),
        )
        .style(Style::default().fg(theme.text.to_color()))
        .wrap(Wrap { trim: false })
        .scroll((state.entries().preview_scroll(), 0));
    frame.render_widget(paragraph, popup_area);
}

/// Render visible toasts stacked in the top-right corner, newest last.
///
pub fn toasts(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let width = TOAST_WIDTH.min(size.width);
    let mut y = size.y + 1;
    for toast in state.toasts().iter() {
        if y + 3 > size.y + size.height {
            break;
        }
        let area = Rect::new(size.x + size.width - width, y, width, 3);
        let style = styling::toast_style(theme, toast.kind);
        let message = truncate(&toast.message, width.saturating_sub(6) as usize);
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", toast.kind.icon()), style),
                Span::styled(message, Style::default().fg(theme.text.to_color())),
            ]))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(style)
                    .style(Style::default().bg(theme.surface.to_color())),
            ),
            area,
        );
        y += 3;
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(60, 30, outer);
        assert!(inner.x >= outer.x && inner.right() <= outer.right());
        assert!(inner.y >= outer.y && inner.bottom() <= outer.bottom());
        assert_eq!(inner.width, 60);
    }
}
