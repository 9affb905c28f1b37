//! Keyword rule types, the rule-file schema, and the built-in tables.
//!
//! A `RuleConfig` is deserialized from TOML and holds groups of keywords per
//! severity tier plus optional advisory overrides.  The classifier flattens
//! it into an ordered `KeywordRule` list with every serious rule ahead of
//! every minor rule.

use serde::{Deserialize, Serialize};

use swastha_contracts::triage::Severity;

/// Substrings that indicate a condition needing immediate attention.
pub const SERIOUS_KEYWORDS: &[&str] = &[
    "chest pain",
    "heart attack",
    "stroke",
    "seizure",
    "unconscious",
    "difficulty breathing",
    "shortness of breath",
    "severe bleeding",
    "severe headache",
    "high fever",
    "fever above 103",
    "blood pressure",
    "severe abdominal pain",
    "unable to breathe",
    "choking",
];

/// Substrings that indicate a self-manageable complaint.
pub const MINOR_KEYWORDS: &[&str] = &[
    "cold",
    "cough",
    "headache",
    "stomach ache",
    "nausea",
    "sore throat",
    "runny nose",
    "sneezing",
    "minor cut",
    "bruise",
    "muscle ache",
    "fatigue",
];

pub const SERIOUS_ADVISORY: &str = "⚠️ Your symptoms suggest a potentially serious condition that \
requires immediate medical attention. I recommend booking an appointment with the nearest \
hospital right away. Would you like me to help you find and book an appointment at a nearby \
hospital?";

pub const MINOR_ADVISORY: &str = "Based on your symptoms, this appears to be a minor health \
issue. Here are some recommendations:\n\n\
• Rest and stay hydrated\n\
• Take over-the-counter medication if needed\n\
• Monitor your symptoms\n\
• If symptoms worsen or persist for more than a few days, consider seeing a doctor\n\n\
Is there anything specific you'd like to know about managing these symptoms?";

pub const UNKNOWN_ADVISORY: &str = "I understand your concern. While I can provide general \
guidance, I'd recommend monitoring your symptoms closely. If you're worried or if symptoms \
worsen, it's always best to consult with a healthcare professional. Would you like me to help \
you find a nearby hospital or clinic?";

/// One entry in the flattened, ordered rule list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    /// Lower-cased substring tested against the lower-cased input.
    pub keyword: String,
    pub severity: Severity,
}

impl KeywordRule {
    pub fn new(keyword: &str, severity: Severity) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
            severity,
        }
    }

    /// `folded` must already be lower-cased.
    pub fn matches(&self, folded: &str) -> bool {
        folded.contains(&self.keyword)
    }
}

/// A group of keywords sharing one severity tier, as written in TOML.
///
/// ```toml
/// [[rules]]
/// severity = "serious"
/// keywords = ["chest pain", "stroke"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleGroup {
    pub severity: Severity,
    pub keywords: Vec<String>,
}

/// Per-tier advisory text. Missing tiers keep the built-in text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisoryOverrides {
    pub serious: Option<String>,
    pub minor: Option<String>,
    pub unknown: Option<String>,
}

/// The top-level structure deserialized from a triage rule file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default)]
    pub advisories: AdvisoryOverrides,
    #[serde(default)]
    pub rules: Vec<RuleGroup>,
}

/// The resolved advisory strings, one per tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisories {
    pub serious: String,
    pub minor: String,
    pub unknown: String,
}

impl Advisories {
    pub fn with_overrides(overrides: AdvisoryOverrides) -> Self {
        let builtin = Self::default();
        Self {
            serious: overrides.serious.unwrap_or(builtin.serious),
            minor: overrides.minor.unwrap_or(builtin.minor),
            unknown: overrides.unknown.unwrap_or(builtin.unknown),
        }
    }

    pub fn for_severity(&self, severity: Severity) -> &str {
        match severity {
            Severity::Serious => &self.serious,
            Severity::Minor => &self.minor,
            Severity::Unknown => &self.unknown,
        }
    }
}

impl Default for Advisories {
    fn default() -> Self {
        Self {
            serious: SERIOUS_ADVISORY.to_string(),
            minor: MINOR_ADVISORY.to_string(),
            unknown: UNKNOWN_ADVISORY.to_string(),
        }
    }
}
