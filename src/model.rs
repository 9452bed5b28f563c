//! Request and response types exchanged with the analysis backend.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::language::Language;

/// A single submission. Built fresh per submit and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    code: String,
    language: Language,
}

impl AnalysisRequest {
    /// Build a request, rejecting empty or whitespace-only code.
    pub fn new(code: impl Into<String>, language: Language) -> Result<Self, ValidationError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(ValidationError::EmptyCode);
        }
        Ok(Self { code, language })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

/// Verdict returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub complexity: String,
    pub confidence: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub static_analysis: Vec<String>,
    /// Assumed sorted by size; never re-sorted here.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub performance_data: Vec<PerformancePoint>,
}

/// One timing sample: input size and mean execution time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub size: u64,
    pub time: f64,
}

impl AnalysisResult {
    /// Check the payload against the documented schema.
    ///
    /// JSON parsing alone accepts e.g. a confidence of 140 or a negative
    /// timing; this rejects those.
    pub fn validate(&self) -> Result<(), String> {
        if self.complexity.trim().is_empty() {
            return Err("complexity is empty".to_string());
        }
        if !self.confidence.is_finite() || !(0.0..=100.0).contains(&self.confidence) {
            return Err(format!(
                "confidence {} is outside 0..=100",
                self.confidence
            ));
        }
        for (i, point) in self.performance_data.iter().enumerate() {
            if point.size == 0 {
                return Err(format!("performanceData[{}]: size must be positive", i));
            }
            if !point.time.is_finite() || point.time < 0.0 {
                return Err(format!(
                    "performanceData[{}]: time {} must be a non-negative number",
                    i, point.time
                ));
            }
        }
        Ok(())
    }
}

/// Body of a non-success response.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// The backend serializes absent lists as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
