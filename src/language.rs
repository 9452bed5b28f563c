//! Supported source languages and their starter templates.
//!
//! The registry is a pure lookup table: every [`Language`] maps to exactly
//! one default snippet that replaces the editor content when the user
//! switches languages.

use serde::{Deserialize, Serialize};

/// A language the analysis backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    JavaScript,
    Python,
    Go,
}

impl Language {
    /// All languages, in the order they are offered to the user.
    pub const ALL: [Language; 3] = [Language::JavaScript, Language::Python, Language::Go];

    /// Wire name sent to the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Go => "go",
        }
    }

    /// Get the file extensions associated with this language.
    pub fn extensions(&self) -> &[&'static str] {
        match self {
            Language::JavaScript => &["js", "mjs", "cjs"],
            Language::Python => &["py"],
            Language::Go => &["go"],
        }
    }

    /// Determine language from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext))
    }

    /// Default starter snippet for this language.
    pub fn template(&self) -> &'static str {
        match self {
            Language::JavaScript => {
                "// Write your algorithm here\nfunction algorithm(arr) {\n    // Your code\n    return arr;\n}"
            }
            Language::Python => {
                "# Write your algorithm here\ndef algorithm(arr):\n    # Your code\n    return arr"
            }
            Language::Go => {
                "// Write your algorithm here\nfunc algorithm(arr []int) []int {\n    // Your code\n    return arr\n}"
            }
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "javascript" | "js" => Ok(Language::JavaScript),
            "python" | "py" => Ok(Language::Python),
            "go" | "golang" => Ok(Language::Go),
            _ => Err(format!(
                "unknown language: {} (expected one of: javascript, python, go)",
                s
            )),
        }
    }
}
