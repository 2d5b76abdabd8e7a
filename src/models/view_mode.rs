use serde::Serialize;

/// Whether table cells render as editable inputs or plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Display,
    Edit,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Display => ViewMode::Edit,
            ViewMode::Edit => ViewMode::Display,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, ViewMode::Edit)
    }

    /// Label of the button that switches away from this mode.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            ViewMode::Display => "Edit Prices/Stock",
            ViewMode::Edit => "Save Changes",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Display => "display",
            ViewMode::Edit => "edit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_display() {
        assert_eq!(ViewMode::default(), ViewMode::Display);
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        for mode in [ViewMode::Display, ViewMode::Edit] {
            assert_ne!(mode.toggled(), mode);
            assert_eq!(mode.toggled().toggled(), mode);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(ViewMode::Display.toggle_label(), "Edit Prices/Stock");
        assert_eq!(ViewMode::Edit.toggle_label(), "Save Changes");
    }
}
