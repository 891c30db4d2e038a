//! Form editing types shared by the page modules.

/// Single-line text input.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Input {
    value: String,
}

impl Input {
    pub fn with_value(value: impl Into<String>) -> Self {
        Input {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Selected collection name; empty means nothing selected.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionPicker {
    selected: String,
}

impl CollectionPicker {
    pub fn selected(&self) -> Option<&str> {
        if self.selected.is_empty() {
            None
        } else {
            Some(&self.selected)
        }
    }

    pub fn select(&mut self, name: impl Into<String>) {
        self.selected = name.into();
    }

    /// Step through the available names, wrapping at either end. Returns
    /// whether the selection changed.
    ///
    pub fn cycle(&mut self, names: &[String], delta: isize) -> bool {
        if names.is_empty() {
            return false;
        }
        let next = match names.iter().position(|n| *n == self.selected) {
            Some(index) => wrap(index, names.len(), delta),
            None if delta < 0 => names.len() - 1,
            None => 0,
        };
        let changed = names[next] != self.selected;
        self.selected = names[next].clone();
        changed
    }
}

/// Selection within a rendered list.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursor {
    selected: Option<usize>,
}

impl ListCursor {
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn step(&mut self, len: usize, delta: isize) {
        self.selected = match (self.selected, len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), len) => Some(wrap(i.min(len - 1), len, delta)),
        };
    }

    /// Keep the selection inside a list that may have shrunk.
    ///
    pub fn clamp(&mut self, len: usize) {
        self.selected = match (self.selected, len) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => None,
        };
    }

    pub fn reset(&mut self) {
        self.selected = None;
    }
}

/// Step `index` by `delta` within `0..len`, wrapping around.
///
pub fn wrap(index: usize, len: usize, delta: isize) -> usize {
    let len = len as isize;
    ((index as isize + delta) % len + len) as usize % len as usize
}

/// Step through an ordered set of fields.
///
pub fn cycle<T: Copy + PartialEq>(all: &[T], current: T, delta: isize) -> T {
    let index = all.iter().position(|f| *f == current).unwrap_or(0);
    all[wrap(index, all.len(), delta)]
}
