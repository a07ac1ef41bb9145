//! Heuristic scoring and ranking of candidate research hypotheses.
//!
//! Subscores, each clamped to [0, 1]:
//! - **novelty** = 1 − (unique hypothesis tokens found in the corpus'
//!   dominant-theme set ÷ unique hypothesis tokens): a hypothesis restating
//!   what the corpus already dwells on scores low.
//! - **feasibility** = min(1, 0.3 + 0.25 × matched methodology terms): a
//!   floor of 0.3 for untestable phrasing, rising with each established
//!   technique the hypothesis names.
//! - **relevance** = matched mission terms ÷ mission lexicon size.
//!
//! Overall = weighted mean under `RankWeights` (validated to sum to 1).
//! The sort is stable, so equal overall scores keep generation order; ranks
//! are 1-based.

use std::collections::HashSet;

use exobio_core::{RankWeights, RankedHypothesis};

use crate::normalize::normalize;

/// Corpus-derived signals the subscores are computed against.
#[derive(Debug, Clone, Copy)]
pub struct RankSignals<'a> {
    /// Union of per-document top-weighted terms (see
    /// `VectorSpace::top_theme_terms`).
    pub corpus_themes: &'a HashSet<String>,
    /// Established methodology vocabulary, lowercase.
    pub methodology_terms: &'a [&'a str],
    /// Mission/domain concern vocabulary, lowercase.
    pub mission_terms: &'a [&'a str],
}

/// Score, sort, and rank candidate hypotheses. Re-running on the same input
/// with the same configuration yields identical order and ranks.
pub fn rank_hypotheses(
    candidates: &[String],
    signals: &RankSignals<'_>,
    weights: &RankWeights,
    max: usize,
) -> Vec<RankedHypothesis> {
    let mut ranked: Vec<RankedHypothesis> = candidates
        .iter()
        .map(|text| {
            let novelty = novelty_score(text, signals.corpus_themes);
            let feasibility = feasibility_score(text, signals.methodology_terms);
            let relevance = relevance_score(text, signals.mission_terms);
            let overall = (weights.novelty * novelty
                + weights.feasibility * feasibility
                + weights.relevance * relevance)
                .clamp(0.0, 1.0);
            RankedHypothesis {
                text: text.clone(),
                novelty,
                feasibility,
                relevance,
                overall,
                rank: 0,
            }
        })
        .collect();

    // Stable: ties keep generation order.
    ranked.sort_by(|a, b| {
        b.overall
            .partial_cmp(&a.overall)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(max);
    for (i, hypothesis) in ranked.iter_mut().enumerate() {
        hypothesis.rank = i + 1;
    }
    ranked
}

fn novelty_score(text: &str, corpus_themes: &HashSet<String>) -> f32 {
    let tokens: HashSet<String> = normalize(text).into_iter().collect();
    if tokens.is_empty() {
        return 0.0;
    }
    let known = tokens
        .iter()
        .filter(|token| corpus_themes.contains(*token))
        .count();
    (1.0 - known as f32 / tokens.len() as f32).clamp(0.0, 1.0)
}

fn feasibility_score(text: &str, methodology_terms: &[&str]) -> f32 {
    let lower = text.to_lowercase();
    let matched = methodology_terms
        .iter()
        .filter(|term| lower.contains(*term))
        .count();
    (0.3 + 0.25 * matched as f32).min(1.0)
}

fn relevance_score(text: &str, mission_terms: &[&str]) -> f32 {
    if mission_terms.is_empty() {
        return 0.0;
    }
    let lower = text.to_lowercase();
    let matched = mission_terms
        .iter()
        .filter(|term| lower.contains(*term))
        .count();
    (matched as f32 / mission_terms.len() as f32).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const METHODS: &[&str] = &["rna sequencing", "pcr", "microscopy"];
    const MISSION: &[&str] = &["microgravity", "space", "mars", "radiation", "astronaut"];

    fn signals(themes: &HashSet<String>) -> RankSignals<'_> {
        RankSignals {
            corpus_themes: themes,
            methodology_terms: METHODS,
            mission_terms: MISSION,
        }
    }

    fn themes(words: &[&str]) -> HashSet<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn subscores_stay_in_unit_interval() {
        let themes = themes(&["microgravity", "bone"]);
        let candidates = vec![
            "Microgravity bone loss is reversible via PCR-validated gene therapy under radiation on Mars with astronaut microscopy in space".to_string(),
        ];
        let ranked = rank_hypotheses(&candidates, &signals(&themes), &RankWeights::default(), 5);
        let h = &ranked[0];
        for score in [h.novelty, h.feasibility, h.relevance, h.overall] {
            assert!((0.0..=1.0).contains(&score), "score out of range: {score}");
        }
    }

    #[test]
    fn novelty_penalizes_corpus_restatement() {
        let themes = themes(&["microgravity", "bone", "loss"]);
        let stale = "Microgravity causes bone loss".to_string();
        let fresh = "Fungal biofilms alter spacecraft corrosion".to_string();
        let ranked = rank_hypotheses(
            &[stale, fresh],
            &signals(&themes),
            &RankWeights::default(),
            5,
        );
        let stale_h = ranked.iter().find(|h| h.text.contains("bone")).unwrap();
        let fresh_h = ranked.iter().find(|h| h.text.contains("Fungal")).unwrap();
        assert!(fresh_h.novelty > stale_h.novelty);
    }

    #[test]
    fn feasibility_rises_with_methodology_evidence() {
        let themes = themes(&[]);
        let vague = "Something changes in space".to_string();
        let concrete = "PCR and microscopy will show altered expression".to_string();
        let ranked = rank_hypotheses(
            &[vague.clone(), concrete],
            &signals(&themes),
            &RankWeights::default(),
            5,
        );
        let vague_h = ranked.iter().find(|h| h.text == vague).unwrap();
        let concrete_h = ranked.iter().find(|h| h.text != vague).unwrap();
        assert!((vague_h.feasibility - 0.3).abs() < 1e-6);
        assert!((concrete_h.feasibility - 0.8).abs() < 1e-6);
    }

    #[test]
    fn ranks_are_one_based_and_descending() {
        let themes = themes(&["plant"]);
        let candidates: Vec<String> = [
            "Plant growth stalls",
            "Radiation alters astronaut immune microscopy profiles in microgravity",
            "Mars dust is toxic",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let ranked = rank_hypotheses(&candidates, &signals(&themes), &RankWeights::default(), 5);
        assert_eq!(ranked[0].rank, 1);
        for window in ranked.windows(2) {
            assert!(window[0].overall >= window[1].overall);
            assert_eq!(window[1].rank, window[0].rank + 1);
        }
    }

    #[test]
    fn equal_scores_preserve_generation_order() {
        let themes = themes(&[]);
        // Identical scoring inputs, distinct text.
        let candidates = vec![
            "Alpha yields identical scores".to_string(),
            "Alpha yields identical scores too".to_string(),
        ];
        let ranked = rank_hypotheses(&candidates, &signals(&themes), &RankWeights::default(), 5);
        assert!(ranked[0].text.ends_with("scores"));
        assert!(ranked[1].text.ends_with("too"));
    }

    #[test]
    fn reranking_is_deterministic() {
        let themes = themes(&["microgravity"]);
        let candidates: Vec<String> = [
            "Microgravity exposure induces novel adaptive responses",
            "Artificial gravity prevents bone density loss",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let a = rank_hypotheses(&candidates, &signals(&themes), &RankWeights::default(), 5);
        let b = rank_hypotheses(&candidates, &signals(&themes), &RankWeights::default(), 5);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.text, y.text);
            assert_eq!(x.rank, y.rank);
            assert_eq!(x.overall, y.overall);
        }
    }

    #[test]
    fn truncates_to_max() {
        let themes = themes(&[]);
        let candidates: Vec<String> =
            (0..10).map(|i| format!("Hypothesis number {i} about space")).collect();
        let ranked = rank_hypotheses(&candidates, &signals(&themes), &RankWeights::default(), 3);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked.last().unwrap().rank, 3);
    }
}
