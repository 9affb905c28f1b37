//! Keyword symptom classifier.
//!
//! Evaluation algorithm:
//!
//! 1. Lower-case the input.  No other normalization.
//! 2. Walk the rule list in order; the first rule whose keyword is a
//!    substring of the input decides the tier.  The list always holds every
//!    serious rule ahead of every minor rule, so a serious match wins over
//!    any minor match in the same text.
//! 3. If nothing matched, the tier is `Unknown`.
//!
//! Negation, synonyms and multiple symptoms are not handled.

use std::path::Path;

use tracing::{debug, warn};

use swastha_contracts::{
    error::{SwasthaError, SwasthaResult},
    triage::{Assessment, Severity},
};

use crate::rule::{Advisories, KeywordRule, RuleConfig, MINOR_KEYWORDS, SERIOUS_KEYWORDS};

/// Maps free text to a severity tier and its advisory message.
///
/// ```rust,ignore
/// use swastha_triage::SymptomClassifier;
///
/// let classifier = SymptomClassifier::default();
/// let assessment = classifier.classify("I have chest pain");
/// assert!(assessment.severity.is_serious());
/// ```
#[derive(Debug, Clone)]
pub struct SymptomClassifier {
    rules: Vec<KeywordRule>,
    advisories: Advisories,
}

impl SymptomClassifier {
    /// Build from arbitrary rules.  Rules are reordered serious-first; the
    /// relative order within a tier is kept.
    pub fn new(mut rules: Vec<KeywordRule>, advisories: Advisories) -> Self {
        rules.sort_by_key(|r| r.severity);
        Self { rules, advisories }
    }

    /// Parse `s` as a TOML rule file.
    ///
    /// Returns `SwasthaError::ConfigError` if the TOML is malformed, a
    /// keyword is blank, or a rule group targets the `unknown` tier.
    pub fn from_toml_str(s: &str) -> SwasthaResult<Self> {
        let config: RuleConfig = toml::from_str(s).map_err(|e| SwasthaError::ConfigError {
            reason: format!("failed to parse triage rules TOML: {}", e),
        })?;

        let mut rules = Vec::new();
        for group in config.rules {
            if group.severity == Severity::Unknown {
                return Err(SwasthaError::ConfigError {
                    reason: "triage rules may not target the 'unknown' tier; it is the fallback"
                        .to_string(),
                });
            }
            for keyword in &group.keywords {
                if keyword.trim().is_empty() {
                    return Err(SwasthaError::ConfigError {
                        reason: format!("blank keyword in a '{}' rule group", group.severity),
                    });
                }
                rules.push(KeywordRule::new(keyword, group.severity));
            }
        }

        if rules.is_empty() {
            warn!("triage rule file declares no keywords; every input will classify as unknown");
        }

        Ok(Self::new(rules, Advisories::with_overrides(config.advisories)))
    }

    /// Read the file at `path` and parse it as a TOML rule file.
    pub fn from_file(path: &Path) -> SwasthaResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| SwasthaError::ConfigError {
            reason: format!("failed to read triage rules '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Classify one free-text symptom description.
    pub fn classify(&self, text: &str) -> Assessment {
        let folded = text.to_lowercase();

        let hit = self.rules.iter().find(|rule| rule.matches(&folded));
        let (severity, matched_keyword) = match hit {
            Some(rule) => (rule.severity, Some(rule.keyword.clone())),
            None => (Severity::Unknown, None),
        };

        debug!(
            severity = %severity,
            keyword = matched_keyword.as_deref().unwrap_or("-"),
            "symptoms classified"
        );

        Assessment {
            severity,
            advisory: self.advisories.for_severity(severity).to_string(),
            matched_keyword,
        }
    }

    /// The ordered rule list, serious rules first.
    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }
}

impl Default for SymptomClassifier {
    fn default() -> Self {
        let rules = SERIOUS_KEYWORDS
            .iter()
            .map(|k| KeywordRule::new(k, Severity::Serious))
            .chain(MINOR_KEYWORDS.iter().map(|k| KeywordRule::new(k, Severity::Minor)))
            .collect();
        Self::new(rules, Advisories::default())
    }
}
