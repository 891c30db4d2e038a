use super::Frame;
use crate::state::{State, UploadField};
use crate::ui::widgets::{field, spinner, styling};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{Paragraph, Wrap},
};

const HELP: &str = "Type the path of a local file. A leading ~/ is resolved against the \
home directory. The file is sent to the selected collection as a multipart upload.";

/// Render the upload form.
///
pub fn upload(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let page = state.upload();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(size);

    frame.render_widget(
        field::picker(
            "Collection",
            &page.collection,
            page.collections().len(),
            page.focus == UploadField::Collection,
            theme,
        ),
        rows[0],
    );
    frame.render_widget(
        field::input("File path", &page.file, page.focus == UploadField::File, theme),
        rows[1],
    );
    let status = format!(
        " {}",
        spinner::label(state, &page.loading.upload, "Enter to upload", "Uploading...")
    );
    frame.render_widget(
        Paragraph::new(Span::styled(status, styling::muted_text_style(theme))),
        rows[2],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(HELP, styling::muted_text_style(theme)))
            .wrap(Wrap { trim: true }),
        rows[3],
    );
}
