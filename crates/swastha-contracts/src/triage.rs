//! Severity tiers and the classifier's output.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classifier output bucket, driving advisory text and booking prompts.
///
/// Variants are declared in evaluation order: serious rules are always
/// tested before minor ones, and `Unknown` is the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Serious,
    Minor,
    Unknown,
}

impl Severity {
    /// A serious assessment signals the caller to offer a location-based booking.
    pub fn is_serious(self) -> bool {
        self == Severity::Serious
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Serious => "serious",
            Severity::Minor => "minor",
            Severity::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of classifying one free-text symptom description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub severity: Severity,
    /// The canned advisory text for `severity`.
    pub advisory: String,
    /// The keyword that decided the tier. `None` for `Unknown`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_keyword: Option<String>,
}
