//! # swastha-triage
//!
//! Keyword-based symptom triage for the SWASTHA assistant.
//!
//! ## Overview
//!
//! [`SymptomClassifier`] is a flat, ordered rule list: each rule is a
//! lower-cased substring tagged with a severity tier.  Serious rules always
//! come first, so text mentioning both a serious and a minor symptom
//! resolves to serious.  Text matching nothing is `unknown`.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use swastha_triage::SymptomClassifier;
//!
//! let builtin = SymptomClassifier::default();
//! let custom = SymptomClassifier::from_file(Path::new("rules/triage.toml"))?;
//! ```

pub mod classifier;
pub mod rule;

pub use classifier::SymptomClassifier;
pub use rule::{Advisories, KeywordRule, RuleConfig, RuleGroup};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use swastha_contracts::{error::SwasthaError, triage::Severity};

    use crate::rule::{MINOR_ADVISORY, MINOR_KEYWORDS, SERIOUS_ADVISORY, SERIOUS_KEYWORDS, UNKNOWN_ADVISORY};
    use crate::SymptomClassifier;

    const SHIPPED_RULES: &str = include_str!("../rules/triage.toml");

    // ── 1. documented examples ────────────────────────────────────────────────

    #[test]
    fn test_serious_keyword_wins_over_minor() {
        let classifier = SymptomClassifier::default();
        let assessment = classifier.classify("I have chest pain and a cold");

        assert_eq!(assessment.severity, Severity::Serious);
        assert_eq!(assessment.matched_keyword.as_deref(), Some("chest pain"));
        assert_eq!(assessment.advisory, SERIOUS_ADVISORY);
    }

    #[test]
    fn test_minor_keyword() {
        let assessment = SymptomClassifier::default().classify("I have a sore throat");

        assert_eq!(assessment.severity, Severity::Minor);
        assert_eq!(assessment.advisory, MINOR_ADVISORY);
    }

    #[test]
    fn test_no_keyword_is_unknown() {
        let assessment = SymptomClassifier::default().classify("I feel weird");

        assert_eq!(assessment.severity, Severity::Unknown);
        assert_eq!(assessment.matched_keyword, None);
        assert_eq!(assessment.advisory, UNKNOWN_ADVISORY);
    }

    // ── 2. every built-in keyword, any case ───────────────────────────────────

    #[test]
    fn test_every_serious_keyword_is_serious_in_any_case() {
        let classifier = SymptomClassifier::default();
        for keyword in SERIOUS_KEYWORDS {
            for text in [
                format!("since this morning: {keyword}"),
                format!("{} again", keyword.to_uppercase()),
            ] {
                assert_eq!(
                    classifier.classify(&text).severity,
                    Severity::Serious,
                    "expected serious for {text:?}"
                );
            }
        }
    }

    #[test]
    fn test_serious_beats_every_minor_keyword() {
        let classifier = SymptomClassifier::default();
        for minor in MINOR_KEYWORDS {
            let text = format!("{minor} with shortness of breath");
            assert_eq!(classifier.classify(&text).severity, Severity::Serious, "{text:?}");
        }
    }

    #[test]
    fn test_severe_headache_outranks_headache() {
        // "headache" is minor, but "severe headache" is listed as serious.
        let classifier = SymptomClassifier::default();
        assert_eq!(classifier.classify("a SEVERE Headache").severity, Severity::Serious);
        assert_eq!(classifier.classify("a mild headache").severity, Severity::Minor);
    }

    #[test]
    fn test_substring_matching_has_no_word_boundaries() {
        // Known limitation: "cold" matches inside "scolded".
        let assessment = SymptomClassifier::default().classify("my boss scolded me");
        assert_eq!(assessment.severity, Severity::Minor);
    }

    #[test]
    fn test_empty_input_is_unknown() {
        assert_eq!(SymptomClassifier::default().classify("").severity, Severity::Unknown);
    }

    // ── 3. rule ordering ──────────────────────────────────────────────────────

    #[test]
    fn test_builtin_rules_are_serious_first() {
        let classifier = SymptomClassifier::default();
        let rules = classifier.rules();

        assert_eq!(rules.len(), SERIOUS_KEYWORDS.len() + MINOR_KEYWORDS.len());
        let first_minor = rules.iter().position(|r| r.severity == Severity::Minor).unwrap();
        assert!(rules[..first_minor].iter().all(|r| r.severity == Severity::Serious));
        assert!(rules[first_minor..].iter().all(|r| r.severity == Severity::Minor));
    }

    #[test]
    fn test_toml_minor_group_declared_first_still_loses() {
        let toml = r#"
            [[rules]]
            severity = "minor"
            keywords = ["rash"]

            [[rules]]
            severity = "serious"
            keywords = ["Swollen Throat"]
        "#;

        let classifier = SymptomClassifier::from_toml_str(toml).unwrap();
        assert_eq!(classifier.rules()[0].severity, Severity::Serious);
        assert_eq!(classifier.rules()[0].keyword, "swollen throat");

        let assessment = classifier.classify("a rash and a swollen throat");
        assert_eq!(assessment.severity, Severity::Serious);
    }

    // ── 4. TOML loading ───────────────────────────────────────────────────────

    #[test]
    fn test_shipped_rule_file_matches_builtin() {
        let shipped = SymptomClassifier::from_toml_str(SHIPPED_RULES).unwrap();
        let builtin = SymptomClassifier::default();

        assert_eq!(shipped.rules(), builtin.rules());
        for text in ["chest pain", "a cough", "nothing at all"] {
            assert_eq!(shipped.classify(text), builtin.classify(text));
        }
    }

    #[test]
    fn test_advisory_override_replaces_only_named_tier() {
        let toml = r#"
            [advisories]
            minor = "Drink water."

            [[rules]]
            severity = "minor"
            keywords = ["hiccups"]
        "#;

        let classifier = SymptomClassifier::from_toml_str(toml).unwrap();
        assert_eq!(classifier.classify("hiccups").advisory, "Drink water.");
        assert_eq!(classifier.classify("hmm").advisory, UNKNOWN_ADVISORY);
    }

    #[test]
    fn test_unknown_tier_rule_is_rejected() {
        let toml = r#"
            [[rules]]
            severity = "unknown"
            keywords = ["meh"]
        "#;

        match SymptomClassifier::from_toml_str(toml) {
            Err(SwasthaError::ConfigError { reason }) => assert!(reason.contains("unknown")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_keyword_is_rejected() {
        let toml = r#"
            [[rules]]
            severity = "serious"
            keywords = ["  "]
        "#;

        assert!(matches!(
            SymptomClassifier::from_toml_str(toml),
            Err(SwasthaError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_toml_parse_error() {
        match SymptomClassifier::from_toml_str("this is not valid toml ][[[") {
            Err(SwasthaError::ConfigError { reason }) => {
                assert!(reason.contains("failed to parse triage rules TOML"), "{reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_rule_file_is_config_error() {
        let path = std::path::Path::new("/definitely/not/here/triage.toml");
        assert!(matches!(
            SymptomClassifier::from_file(path),
            Err(SwasthaError::ConfigError { .. })
        ));
    }
}
