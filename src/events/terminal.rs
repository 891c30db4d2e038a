use crate::state::{Page, State, ToastKind};
use anyhow::Result;
use clipboard::{ClipboardContext, ClipboardProvider};
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Lines scrolled by page keys in the entry preview.
///
const PAGE_SCROLL: isize = 10;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            loop {
                match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            if tx_clone.send(Event::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => (),
                        Err(e) => error!("Failed to read terminal event: {}", e),
                    },
                    Ok(false) => (),
                    Err(e) => error!("Failed to poll terminal events: {}", e),
                }
                if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => return Ok(handle_key(state, key)),
            Event::Tick => {
                state.advance_spinner_index();
            }
        }
        Ok(true)
    }
}

/// Apply a key press to state. Returns false if exit was requested.
///
pub fn handle_key(state: &mut State, key: KeyEvent) -> bool {
    let KeyEvent {
        code, modifiers, ..
    } = key;

    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        debug!("Processing exit terminal event '{:?}'...", key);
        return false;
    }

    if state.confirmation().is_some() {
        match code {
            KeyCode::Enter | KeyCode::Char('y') => state.accept_confirmation(),
            KeyCode::Esc | KeyCode::Char('n') => state.cancel_confirmation(),
            _ => (),
        }
        return true;
    }

    if state.current_page() == Page::Entries && state.entries().preview().is_some() {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => state.entries_mut().close_preview(),
            KeyCode::Down | KeyCode::Char('j') => state.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => state.move_cursor(-1),
            KeyCode::PageDown => state.move_cursor(PAGE_SCROLL),
            KeyCode::PageUp => state.move_cursor(-PAGE_SCROLL),
            _ => (),
        }
        return true;
    }

    if modifiers.contains(KeyModifiers::CONTROL) {
        match code {
            KeyCode::Char('d') => {
                state.toggle_dark_mode();
            }
            KeyCode::Char('l') => {
                state.toggle_log();
            }
            KeyCode::Char('b') => state.back(),
            _ => (),
        }
        return true;
    }

    match code {
        KeyCode::F(n @ 1..=5) => state.navigate(Page::ALL[usize::from(n) - 1]),
        KeyCode::Left if modifiers.contains(KeyModifiers::ALT) => state.back(),
        KeyCode::Tab => state.next_field(1),
        KeyCode::BackTab => state.next_field(-1),
        KeyCode::Enter => state.submit(),
        KeyCode::Up => state.move_cursor(-1),
        KeyCode::Down => state.move_cursor(1),
        KeyCode::Left if !state.is_editing() => state.select_collection(-1),
        KeyCode::Right if !state.is_editing() => state.select_collection(1),
        KeyCode::Backspace => {
            if let Some(input) = state.input_mut() {
                input.pop();
            }
        }
        KeyCode::Char(c) if state.is_editing() => {
            if let Some(input) = state.input_mut() {
                input.push(c);
            }
        }
        KeyCode::Char('q') => return false,
        KeyCode::Char('j') => state.move_cursor(1),
        KeyCode::Char('k') => state.move_cursor(-1),
        KeyCode::Char('d') => state.delete_selected(),
        KeyCode::Char('r') => state.reset_selected(),
        KeyCode::Char('R') => state.refresh_current(),
        KeyCode::Char('v') => state.view_selected(),
        KeyCode::Char('y') => copy_selected_result(state),
        _ => (),
    }
    true
}

/// Copy the highlighted search result to the clipboard.
///
fn copy_selected_result(state: &mut State) {
    let text = match state.selected_result_text() {
        Some(text) => text,
        None => return,
    };
    let outcome = ClipboardContext::new().and_then(|mut ctx| ctx.set_contents(text));
    report_copy(state, outcome);
}

/// Toast the outcome of a clipboard copy.
///
fn report_copy<E: std::fmt::Display>(state: &mut State, outcome: Result<(), E>) {
    match outcome {
        Ok(_) => state.show_toast(ToastKind::Info, "Result copied to clipboard"),
        Err(e) => state.show_toast(
            ToastKind::Error,
            format!("Failed to copy to clipboard: {}", e),
        ),
    }
}
