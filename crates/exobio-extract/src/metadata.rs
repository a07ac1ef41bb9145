//! Heuristic experiment-metadata extraction.

use exobio_core::{Document, ExperimentMetadata, UNKNOWN};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::{
    METHODOLOGY_PATTERNS, OBJECTIVE_PATTERNS, ORGANISM_TERMS, OUTCOME_PATTERNS, PROTOCOL_RULES,
    SAFETY_PATTERNS,
};

/// Extract structured experiment metadata from a document using the rule
/// lexicon alone. Produces the same shape as the generative path.
pub fn extract_experiment_metadata(doc: &Document) -> ExperimentMetadata {
    let text = doc.combined_text();
    let mut meta = ExperimentMetadata::unresolved(&doc.id, &doc.title);
    meta.protocol_type = classify_protocol(&text);
    meta.organisms = if doc.organisms.is_empty() {
        detect_organisms(&text)
    } else {
        doc.organisms.clone()
    };
    meta.objectives = capture_all(&OBJECTIVE_PATTERNS, &text, 5);
    meta.methodologies = extract_methodologies(&text);
    meta.expected_outcomes = capture_all(&OUTCOME_PATTERNS, &text, 5);
    meta.safety_considerations = capture_all(&SAFETY_PATTERNS, &text, 3);
    meta
}

/// Classify the protocol from keyword triggers; first rule that matches wins.
pub fn classify_protocol(text: &str) -> String {
    let lower = text.to_lowercase();
    for (trigger, label) in PROTOCOL_RULES {
        if lower.contains(trigger) {
            return (*label).to_string();
        }
    }
    UNKNOWN.to_string()
}

/// Methodology mentions, lowercased, deduplicated in first-seen order.
pub fn extract_methodologies(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for pattern in METHODOLOGY_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            let method = m.as_str().to_lowercase();
            if !seen.contains(&method) {
                seen.push(method);
            }
        }
    }
    seen
}

fn detect_organisms(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    ORGANISM_TERMS
        .iter()
        .filter(|term| lower.contains(*term))
        .map(|term| term.to_string())
        .collect()
}

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace"));

/// Run each pattern over `text`, collecting trimmed first capture groups up
/// to `cap` entries, in pattern-then-position order.
pub(crate) fn capture_all(patterns: &[Regex], text: &str, cap: usize) -> Vec<String> {
    let mut out = Vec::new();
    for pattern in patterns {
        for captures in pattern.captures_iter(text) {
            if let Some(group) = captures.get(1) {
                let cleaned = WHITESPACE_RUN
                    .replace_all(group.as_str().trim(), " ")
                    .into_owned();
                if !cleaned.is_empty() && !out.contains(&cleaned) {
                    out.push(cleaned);
                }
                if out.len() == cap {
                    return out;
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::new("OSD-1", "Test study", text)
    }

    #[test]
    fn protocol_classification_prefers_first_matching_rule() {
        assert_eq!(
            classify_protocol("primary cell culture under simulated microgravity"),
            "Cell Culture"
        );
        assert_eq!(classify_protocol("a rodent habitat aboard ISS"), "Animal Study");
        assert_eq!(classify_protocol("plant growth chambers"), "Plant Study");
        assert_eq!(classify_protocol("telemetry calibration"), UNKNOWN);
    }

    #[test]
    fn methodologies_are_lowercased_and_deduplicated() {
        let methods =
            extract_methodologies("We performed RNA-seq and more RNA-seq, plus qPCR and ELISA.");
        assert_eq!(methods[0], "rna-seq");
        assert_eq!(methods.iter().filter(|m| *m == "rna-seq").count(), 1);
        assert!(methods.contains(&"qpcr".to_string()));
        assert!(methods.contains(&"elisa".to_string()));
    }

    #[test]
    fn objectives_come_from_sentence_patterns() {
        let meta = extract_experiment_metadata(&doc(
            "The objective is to quantify bone loss in microgravity. \
             We aim to identify countermeasures.",
        ));
        assert!(!meta.objectives.is_empty());
        assert!(meta.objectives[0].contains("quantify bone loss"));
    }

    #[test]
    fn organisms_prefer_structured_field_over_text_scan() {
        let mut d = doc("Observations of mice in orbit.");
        d.organisms = vec!["Mus musculus".to_string()];
        let meta = extract_experiment_metadata(&d);
        assert_eq!(meta.organisms, vec!["Mus musculus"]);

        let meta = extract_experiment_metadata(&doc("Observations of mice in orbit."));
        assert!(meta.organisms.contains(&"mice".to_string()));
    }

    #[test]
    fn unresolvable_fields_use_sentinels_not_absence() {
        let meta = extract_experiment_metadata(&doc(""));
        assert_eq!(meta.protocol_type, UNKNOWN);
        assert!(meta.objectives.is_empty());
        assert!(meta.conditions.is_empty());
    }

    #[test]
    fn safety_considerations_are_capped_at_three() {
        let text = "Safety: wear gloves. Risk of exposure is high. Avoid direct contact. \
                    Caution around sharp edges. Hazard from chemicals persists.";
        let meta = extract_experiment_metadata(&doc(text));
        assert!(meta.safety_considerations.len() <= 3);
        assert!(!meta.safety_considerations.is_empty());
    }
}
