//! Relationship-tier classification and templated explanations.

use exobio_core::{RelationTier, TierBounds};

/// Map a similarity score onto a tier using the configured band bounds.
///
/// Bands are half-open on the low side: a score exactly at a bound stays in
/// the lower band. The bounds are validated by `AnalysisConfig::validate`,
/// so every score in [0, 1] lands in exactly one tier.
pub fn classify(score: f32, bounds: &TierBounds) -> RelationTier {
    if score > bounds.highly {
        RelationTier::HighlyRelated
    } else if score > bounds.related {
        RelationTier::Related
    } else if score > bounds.somewhat {
        RelationTier::SomewhatRelated
    } else {
        RelationTier::WeaklyRelated
    }
}

/// Deterministic explanation built from the shared themes, used when the
/// generation collaborator is unavailable or fails. Never empty.
pub fn fallback_explanation(themes: &[String]) -> String {
    if themes.is_empty() {
        "Documents share overlapping vocabulary without a dominant common theme.".to_string()
    } else {
        format!(
            "Documents share common themes including: {}",
            themes.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_cover_the_unit_interval() {
        let bounds = TierBounds::default();
        assert_eq!(classify(0.0, &bounds), RelationTier::WeaklyRelated);
        assert_eq!(classify(0.4, &bounds), RelationTier::WeaklyRelated);
        assert_eq!(classify(0.41, &bounds), RelationTier::SomewhatRelated);
        assert_eq!(classify(0.6, &bounds), RelationTier::SomewhatRelated);
        assert_eq!(classify(0.7, &bounds), RelationTier::Related);
        assert_eq!(classify(0.8, &bounds), RelationTier::Related);
        assert_eq!(classify(0.81, &bounds), RelationTier::HighlyRelated);
        assert_eq!(classify(1.0, &bounds), RelationTier::HighlyRelated);
    }

    #[test]
    fn identical_documents_reach_the_highest_tier() {
        assert_eq!(
            classify(1.0, &TierBounds::default()),
            RelationTier::HighlyRelated
        );
    }

    #[test]
    fn fallback_explanation_is_never_empty() {
        assert!(!fallback_explanation(&[]).is_empty());
        let text = fallback_explanation(&["microgravity".into(), "bone".into()]);
        assert!(text.contains("microgravity, bone"));
    }
}
