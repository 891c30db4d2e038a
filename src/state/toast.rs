//! Transient notifications.

use log::*;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a toast stays on screen.
///
pub const TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Maximum toasts kept on screen at once.
///
const MAX_VISIBLE: usize = 5;

/// Specifying the different toast kinds.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    /// Map a kind name onto a kind, falling back to `Info` for anything
    /// unknown.
    ///
    pub fn from_name(name: &str) -> ToastKind {
        match name {
            "success" => ToastKind::Success,
            "error" => ToastKind::Error,
            "warning" => ToastKind::Warning,
            _ => ToastKind::Info,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✔",
            ToastKind::Error => "✖",
            ToastKind::Warning => "⚠",
            ToastKind::Info => "ℹ",
        }
    }
}

/// Defines toast data structure.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    expires_at: Instant,
}

/// Queue of visible toasts, oldest first.
///
#[derive(Debug, Default)]
pub struct Toasts {
    items: VecDeque<Toast>,
}

impl Toasts {
    /// Show a toast and mirror it to the log.
    ///
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.push_at(kind, message, Instant::now());
    }

    fn push_at(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) {
        let message = message.into();
        match kind {
            ToastKind::Error => error!("{}", message),
            ToastKind::Warning => warn!("{}", message),
            ToastKind::Success | ToastKind::Info => info!("{}", message),
        }
        if self.items.len() == MAX_VISIBLE {
            self.items.pop_front();
        }
        self.items.push_back(Toast {
            kind,
            message,
            expires_at: now + TOAST_DURATION,
        });
    }

    /// Drop toasts whose timer ran out.
    ///
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|t| t.expires_at > now);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn last(&self) -> Option<&Toast> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_falls_back_to_info() {
        assert_eq!(ToastKind::from_name("success"), ToastKind::Success);
        assert_eq!(ToastKind::from_name("error"), ToastKind::Error);
        assert_eq!(ToastKind::from_name("warning"), ToastKind::Warning);
        assert_eq!(ToastKind::from_name("info"), ToastKind::Info);
        assert_eq!(ToastKind::from_name("celebrate"), ToastKind::Info);
        assert_eq!(ToastKind::from_name(""), ToastKind::Info);
    }

    #[test]
    fn toasts_expire() {
        let start = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push_at(ToastKind::Success, "first", start);
        toasts.push_at(ToastKind::Info, "second", start + Duration::from_secs(2));
        toasts.prune(start + Duration::from_millis(2500));
        assert_eq!(toasts.len(), 2);
        toasts.prune(start + Duration::from_millis(3500));
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.last().unwrap().message, "second");
        toasts.prune(start + Duration::from_secs(10));
        assert!(toasts.is_empty());
    }

    #[test]
    fn oldest_toast_is_dropped_when_full() {
        let mut toasts = Toasts::default();
        for i in 0..MAX_VISIBLE + 2 {
            toasts.push(ToastKind::Info, format!("toast {}", i));
        }
        assert_eq!(toasts.len(), MAX_VISIBLE);
        assert_eq!(toasts.iter().next().unwrap().message, "toast 2");
    }
}
