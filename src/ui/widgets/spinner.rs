use crate::state::{Busy, State};

/// Spinner animation frames, advanced on every terminal tick.
///
pub const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Return the current spinner frame.
///
pub fn frame(state: &State) -> &'static str {
    FRAMES[state.get_spinner_index() % FRAMES.len()]
}

/// Label for an action button: the busy text with a spinner while the
/// action runs, the idle text otherwise.
///
pub fn label(state: &State, busy: &Busy, idle: &str, active: &str) -> String {
    if busy.is_busy() {
        format!("{} {}", frame(state), active)
    } else {
        idle.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_reflects_busy_flag() {
        let state = State::default();
        assert_eq!(label(&state, &Busy::Idle, "Search", "Searching..."), "Search");
        let busy = label(&state, &Busy::Active, "Search", "Searching...");
        assert!(busy.starts_with(FRAMES[0]));
        assert!(busy.ends_with("Searching..."));
    }
}
