/// Progress of a single page operation.
///
/// `Item` carries the identifier of the row being acted on so the UI can mark
/// that row busy.
///
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Busy {
    #[default]
    Idle,
    Active,
    Item(String),
}

impl Busy {
    pub fn is_busy(&self) -> bool {
        !matches!(self, Busy::Idle)
    }

    /// Whether the operation is outstanding for the given row.
    ///
    pub fn is_busy_with(&self, item: &str) -> bool {
        matches!(self, Busy::Item(current) if current == item)
    }

    pub fn clear(&mut self) {
        *self = Busy::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy() {
        let mut busy = Busy::default();
        assert!(!busy.is_busy());
        busy = Busy::Item("docs".to_string());
        assert!(busy.is_busy());
        assert!(busy.is_busy_with("docs"));
        assert!(!busy.is_busy_with("reports"));
        busy.clear();
        assert_eq!(busy, Busy::Idle);
        assert!(Busy::Active.is_busy());
        assert!(!Busy::Active.is_busy_with("docs"));
    }
}
