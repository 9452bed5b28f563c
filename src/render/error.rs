//! Failure view.

use serde::Serialize;

use super::ResultsPane;

/// A single error block replacing the results pane content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorView {
    pub title: String,
    /// Shown verbatim.
    pub message: String,
}

impl ErrorView {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

pub fn render_error<P>(message: &str, pane: &mut P)
where
    P: ResultsPane + ?Sized,
{
    pane.show_error(&ErrorView::new(message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_verbatim() {
        let view = ErrorView::new("<b>Execution timeout</b>\n");
        assert_eq!(view.title, "Error");
        assert_eq!(view.message, "<b>Execution timeout</b>\n");
    }
}
