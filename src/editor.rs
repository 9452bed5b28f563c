//! Editor adapter seam.
//!
//! The controller only needs to read and replace the buffer and switch the
//! syntax mode; any widget offering that can sit behind [`Editor`].

use std::path::Path;

use crate::language::Language;

/// Text-editing surface the user types code into.
pub trait Editor {
    fn text(&self) -> String;
    fn set_text(&mut self, text: &str);
    fn set_syntax_mode(&mut self, language: Language);
}

/// In-memory editor used by the terminal host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferEditor {
    text: String,
    mode: Language,
}

impl BufferEditor {
    pub fn new(text: impl Into<String>, mode: Language) -> Self {
        Self {
            text: text.into(),
            mode,
        }
    }

    /// Load a buffer from disk. The mode is inferred from the extension when possible.
    pub fn open<P: AsRef<Path>>(path: P, fallback: Language) -> std::io::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mode = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Language::from_extension)
            .unwrap_or(fallback);
        Ok(Self { text, mode })
    }

    pub fn mode(&self) -> Language {
        self.mode
    }
}

impl Editor for BufferEditor {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_syntax_mode(&mut self, language: Language) {
        self.mode = language;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_infers_mode() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("search.py");
        std::fs::write(&path, "def f(a):\n    return a\n").unwrap();

        let editor = BufferEditor::open(&path, Language::Go).unwrap();
        assert_eq!(editor.mode(), Language::Python);
        assert!(editor.text().starts_with("def f"));
    }

    #[test]
    fn test_open_unknown_extension_uses_fallback() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("snippet.txt");
        std::fs::write(&path, "loop").unwrap();

        let editor = BufferEditor::open(&path, Language::Go).unwrap();
        assert_eq!(editor.mode(), Language::Go);
    }
}
