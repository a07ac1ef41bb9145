use serde::{Deserialize, Serialize};

/// Discrete relationship strength between two documents, ordered weakest to
/// strongest. Band boundaries live in [`crate::config::TierBounds`], not here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RelationTier {
    WeaklyRelated,
    SomewhatRelated,
    Related,
    HighlyRelated,
}

impl RelationTier {
    pub fn label(&self) -> &'static str {
        match self {
            RelationTier::WeaklyRelated => "Weakly Related",
            RelationTier::SomewhatRelated => "Somewhat Related",
            RelationTier::Related => "Related",
            RelationTier::HighlyRelated => "Highly Related",
        }
    }
}

impl std::fmt::Display for RelationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A retained cross-reference between two documents.
///
/// Undirected and stored once: `doc_a` is always the lexicographically
/// smaller id. Only pairs scoring at or above the configured threshold (and
/// strictly above zero) exist as edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityEdge {
    pub doc_a: String,
    pub doc_b: String,
    /// Cosine similarity in [0, 1].
    pub score: f32,
    /// Shared top-weighted terms, strongest overlap first.
    pub common_themes: Vec<String>,
    pub tier: RelationTier,
    /// One-sentence account of why the documents relate. Generated by the
    /// external collaborator when available, templated from the themes
    /// otherwise; never empty.
    pub explanation: String,
}

impl SimilarityEdge {
    /// Normalizes endpoint order so the smaller id is `doc_a`.
    pub fn new(
        doc_a: impl Into<String>,
        doc_b: impl Into<String>,
        score: f32,
        common_themes: Vec<String>,
        tier: RelationTier,
        explanation: String,
    ) -> Self {
        let (mut a, mut b) = (doc_a.into(), doc_b.into());
        if b < a {
            std::mem::swap(&mut a, &mut b);
        }
        Self {
            doc_a: a,
            doc_b: b,
            score,
            common_themes,
            tier,
            explanation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_ordering_matches_strength() {
        assert!(RelationTier::WeaklyRelated < RelationTier::SomewhatRelated);
        assert!(RelationTier::Related < RelationTier::HighlyRelated);
        assert_eq!(RelationTier::HighlyRelated.to_string(), "Highly Related");
    }

    #[test]
    fn edge_endpoints_are_canonically_ordered() {
        let edge = SimilarityEdge::new(
            "OSD-9",
            "OSD-12",
            0.5,
            vec!["microgravity".into()],
            RelationTier::SomewhatRelated,
            "shared themes".into(),
        );
        // "OSD-12" < "OSD-9" lexicographically
        assert_eq!(edge.doc_a, "OSD-12");
        assert_eq!(edge.doc_b, "OSD-9");
    }
}
