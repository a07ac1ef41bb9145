//! Heuristic literature analysis: summaries, findings, methodology, gaps,
//! and the research context fed to hypothesis generation.

use exobio_core::{Document, LiteratureAnalysis, UNKNOWN};

use crate::lexicon::{
    FALLBACK_HYPOTHESES, FALLBACK_RESEARCH_GAPS, FINDING_INDICATORS, FUTURE_PATTERNS,
    METHOD_KEYWORDS,
};
use crate::metadata::capture_all;

/// Analyze one document's text without the generation collaborator.
pub fn extract_literature(doc: &Document) -> LiteratureAnalysis {
    let text = doc.combined_text();
    let mut lit = LiteratureAnalysis::unresolved(&doc.id);
    lit.summary = heuristic_summary(&text);
    lit.key_findings = extract_key_findings(&text);
    lit.methodology = extract_methodology(&text);
    lit.research_gaps = heuristic_research_gaps();
    lit.future_directions = capture_all(&FUTURE_PATTERNS, &text, 5);
    lit
}

/// Leading sentences of the body, truncated for reporting. Falls back to the
/// unknown sentinel only when there is no text at all.
fn heuristic_summary(text: &str) -> String {
    let body = text.trim();
    if body.is_empty() {
        return UNKNOWN.to_string();
    }
    let mut summary: String = sentences(body).into_iter().take(2).collect::<Vec<_>>().join(" ");
    if summary.is_empty() {
        summary = body.to_string();
    }
    if summary.len() > 300 {
        let cut = summary
            .char_indices()
            .take_while(|&(i, _)| i < 300)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        summary.truncate(cut);
        summary.push_str("...");
    }
    summary
}

/// Sentences containing a finding indicator, longest-first input order,
/// capped at five. Very short fragments are dropped.
pub fn extract_key_findings(text: &str) -> Vec<String> {
    let mut findings = Vec::new();
    for sentence in sentences(text) {
        let lower = sentence.to_lowercase();
        if FINDING_INDICATORS
            .iter()
            .any(|indicator| lower.contains(indicator))
            && sentence.len() > 20
        {
            findings.push(sentence);
            if findings.len() == 5 {
                break;
            }
        }
    }
    findings
}

/// Up to three methodology sentences joined into one description.
pub fn extract_methodology(text: &str) -> String {
    let picked: Vec<String> = sentences(text)
        .into_iter()
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            METHOD_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
        })
        .take(3)
        .collect();
    if picked.is_empty() {
        UNKNOWN.to_string()
    } else {
        picked.join(" ")
    }
}

/// Curated gap statements for the collaborator-less path.
pub fn heuristic_research_gaps() -> Vec<String> {
    FALLBACK_RESEARCH_GAPS
        .iter()
        .take(3)
        .map(|gap| gap.to_string())
        .collect()
}

/// Curated candidate hypotheses, filtered by research area when one is set.
pub fn heuristic_hypotheses(research_area: Option<&str>) -> Vec<String> {
    let all: Vec<String> = FALLBACK_HYPOTHESES.iter().map(|h| h.to_string()).collect();
    let filtered: Vec<String> = match research_area.map(str::to_lowercase) {
        Some(area) if area.contains("human") || area.contains("physiology") => all
            .iter()
            .filter(|h| {
                let lower = h.to_lowercase();
                ["cellular", "bone", "gravity"]
                    .iter()
                    .any(|term| lower.contains(term))
            })
            .cloned()
            .collect(),
        Some(area) if area.contains("plant") => all
            .iter()
            .filter(|h| {
                let lower = h.to_lowercase();
                lower.contains("plant") || lower.contains("root")
            })
            .cloned()
            .collect(),
        _ => all.clone(),
    };
    let picked = if filtered.is_empty() { all } else { filtered };
    picked.into_iter().take(3).collect()
}

/// Finding sentences across the corpus that seed hypothesis generation,
/// capped at ten.
pub fn extract_current_findings(documents: &[Document]) -> Vec<String> {
    let mut findings = Vec::new();
    for doc in documents {
        for sentence in extract_key_findings(&doc.text) {
            findings.push(sentence);
            if findings.len() == 10 {
                return findings;
            }
        }
    }
    findings
}

/// Prompt context for hypothesis generation: the first five documents' titles
/// and truncated bodies, optionally prefixed with the research area.
pub fn research_context(documents: &[Document], research_area: Option<&str>) -> String {
    let parts: Vec<String> = documents
        .iter()
        .take(5)
        .map(|doc| {
            let mut excerpt = doc.text.clone();
            if excerpt.len() > 200 {
                let cut = excerpt
                    .char_indices()
                    .take_while(|&(i, _)| i < 200)
                    .last()
                    .map(|(i, c)| i + c.len_utf8())
                    .unwrap_or(0);
                excerpt.truncate(cut);
                excerpt.push_str("...");
            }
            format!("Title: {}\nAbstract: {}", doc.title, excerpt)
        })
        .collect();
    let context = parts.join("\n\n---\n\n");
    match research_area {
        Some(area) => format!("Research Area: {area}\n\n{context}"),
        None => context,
    }
}

/// Split on sentence-ending punctuation. Keeps the terminator attached and
/// trims surrounding whitespace; deterministic and allocation-light.
pub fn sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        if matches!(ch, '.' | '!' | '?') {
            let end = i + ch.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                out.push(sentence.to_string());
            }
            start = end;
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::new("OSD-2", "Bone loss in orbit", text)
    }

    #[test]
    fn sentences_split_on_terminators() {
        let split = sentences("First result. Second claim! Third question? Tail without end");
        assert_eq!(split.len(), 4);
        assert_eq!(split[0], "First result.");
        assert_eq!(split[3], "Tail without end");
    }

    #[test]
    fn key_findings_require_indicator_and_length() {
        let text = "We observed significant bone density reduction in flight mice. \
                    It rained. The data demonstrated altered osteoblast activity.";
        let findings = extract_key_findings(text);
        assert_eq!(findings.len(), 2);
        assert!(findings[0].contains("observed"));
    }

    #[test]
    fn methodology_joins_up_to_three_sentences() {
        let text = "Samples were measured with densitometry. \
                    The analysis used mixed models. \
                    A standardized protocol governed collection. \
                    Results were assessed blindly.";
        let methodology = extract_methodology(text);
        assert!(methodology.contains("measured"));
        assert!(methodology.contains("protocol"));
        assert!(!methodology.contains("assessed blindly"));
    }

    #[test]
    fn methodology_falls_back_to_unknown() {
        assert_eq!(extract_methodology("Nothing relevant here."), UNKNOWN);
    }

    #[test]
    fn literature_analysis_has_no_empty_scalar_fields() {
        let lit = extract_literature(&doc(
            "We found that microgravity reduces bone density. The method relied on imaging.",
        ));
        assert!(!lit.summary.is_empty());
        assert_ne!(lit.summary, UNKNOWN);
        assert!(!lit.methodology.is_empty());
        assert_eq!(lit.research_gaps.len(), 3);
    }

    #[test]
    fn empty_document_still_produces_complete_shape() {
        let lit = extract_literature(&Document::new("x", "", ""));
        assert_eq!(lit.summary, UNKNOWN);
        assert_eq!(lit.methodology, UNKNOWN);
        assert!(lit.key_findings.is_empty());
    }

    #[test]
    fn hypotheses_filter_by_research_area() {
        let plant = heuristic_hypotheses(Some("Plant Biology"));
        assert!(plant
            .iter()
            .all(|h| h.to_lowercase().contains("plant") || h.to_lowercase().contains("root")));
        let any = heuristic_hypotheses(None);
        assert_eq!(any.len(), 3);
    }

    #[test]
    fn research_context_includes_area_and_truncates() {
        let long_text = "x".repeat(400);
        let docs = vec![Document::new("a", "Alpha", long_text)];
        let context = research_context(&docs, Some("Radiation Biology"));
        assert!(context.starts_with("Research Area: Radiation Biology"));
        assert!(context.contains("..."));
    }

    #[test]
    fn current_findings_cap_at_ten() {
        let docs: Vec<Document> = (0..6)
            .map(|i| {
                doc(&format!(
                    "We found effect {i} in flight samples. We also observed artifact {i} in controls."
                ))
            })
            .collect();
        assert_eq!(extract_current_findings(&docs).len(), 10);
    }
}
