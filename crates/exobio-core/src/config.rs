use exobio_error::{Error, FatalError};
use serde::{Deserialize, Serialize};

/// Audiences for the plain-language result interpretations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    Scientific,
    General,
    MissionPlanning,
    Clinical,
}

impl Audience {
    pub fn label(&self) -> &'static str {
        match self {
            Audience::Scientific => "scientific",
            Audience::General => "general",
            Audience::MissionPlanning => "mission_planning",
            Audience::Clinical => "clinical",
        }
    }
}

/// Upper bounds of the lower three relationship bands.
///
/// Scores in (highly, 1.0] classify as Highly Related, (related, highly] as
/// Related, (somewhat, related] as Somewhat Related, and [0, somewhat] as
/// Weakly Related. Bounds must be strictly increasing within (0, 1).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierBounds {
    pub somewhat: f32,
    pub related: f32,
    pub highly: f32,
}

impl Default for TierBounds {
    fn default() -> Self {
        Self {
            somewhat: 0.4,
            related: 0.6,
            highly: 0.8,
        }
    }
}

/// Weights for combining hypothesis subscores into the overall score.
/// Must each be in [0, 1] and sum to 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RankWeights {
    pub novelty: f32,
    pub feasibility: f32,
    pub relevance: f32,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            novelty: 1.0 / 3.0,
            feasibility: 1.0 / 3.0,
            relevance: 1.0 / 3.0,
        }
    }
}

impl RankWeights {
    pub fn sum(&self) -> f32 {
        self.novelty + self.feasibility + self.relevance
    }
}

/// Configuration for one analysis run.
///
/// All knobs have working defaults; [`AnalysisConfig::validate`] must pass
/// before a run starts and rejects values outside their documented domains
/// with a fatal `Configuration` error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum cosine similarity for a pair to become an edge.
    pub similarity_threshold: f32,
    /// How many top-weighted terms per document feed theme intersection.
    pub top_terms_per_doc: usize,
    /// Cap on themes reported per edge.
    pub max_shared_themes: usize,
    /// Corpus admission cap; documents beyond this are dropped in input
    /// order with a note in the report.
    pub max_documents: usize,
    /// Per-document size guard in bytes; larger documents are excluded as a
    /// recoverable failure.
    pub max_document_bytes: usize,
    /// Per-call timeout for the external generation collaborator.
    pub timeout_seconds: u64,
    /// Bound on concurrent in-flight collaborator calls.
    pub max_in_flight: usize,
    pub max_hypotheses: usize,
    pub tier_bounds: TierBounds,
    pub rank_weights: RankWeights,
    /// Audiences to produce interpretations for. Clinical is appended
    /// automatically when the corpus looks biomedical.
    pub audiences: Vec<Audience>,
    /// Optional focus area threaded into hypothesis generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research_area: Option<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.3,
            top_terms_per_doc: 10,
            max_shared_themes: 5,
            max_documents: 50,
            max_document_bytes: 1024 * 1024,
            timeout_seconds: 300,
            max_in_flight: 4,
            max_hypotheses: 5,
            tier_bounds: TierBounds::default(),
            rank_weights: RankWeights::default(),
            audiences: vec![
                Audience::Scientific,
                Audience::General,
                Audience::MissionPlanning,
            ],
            research_area: None,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(FatalError::config(
                "similarity_threshold",
                format!("must be in [0, 1], got {}", self.similarity_threshold),
            )
            .into());
        }
        let TierBounds {
            somewhat,
            related,
            highly,
        } = self.tier_bounds;
        let ordered = 0.0 < somewhat && somewhat < related && related < highly && highly < 1.0;
        if !ordered {
            return Err(FatalError::config(
                "tier_bounds",
                format!("bounds must be strictly increasing within (0, 1), got {somewhat}/{related}/{highly}"),
            )
            .into());
        }
        let w = self.rank_weights;
        for (name, value) in [
            ("novelty", w.novelty),
            ("feasibility", w.feasibility),
            ("relevance", w.relevance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(FatalError::config(
                    "rank_weights",
                    format!("{name} weight must be in [0, 1], got {value}"),
                )
                .into());
            }
        }
        if (w.sum() - 1.0).abs() > 1e-4 {
            return Err(FatalError::config(
                "rank_weights",
                format!("weights must sum to 1, got {}", w.sum()),
            )
            .into());
        }
        if self.max_documents == 0 {
            return Err(FatalError::config("max_documents", "must be at least 1").into());
        }
        if self.top_terms_per_doc == 0 {
            return Err(FatalError::config("top_terms_per_doc", "must be at least 1").into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        AnalysisConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_threshold_outside_unit_interval() {
        let cfg = AnalysisConfig {
            similarity_threshold: 1.5,
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("similarity_threshold"));
    }

    #[test]
    fn rejects_unordered_tier_bounds() {
        let cfg = AnalysisConfig {
            tier_bounds: TierBounds {
                somewhat: 0.6,
                related: 0.4,
                highly: 0.8,
            },
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let cfg = AnalysisConfig {
            rank_weights: RankWeights {
                novelty: 0.5,
                feasibility: 0.5,
                relevance: 0.5,
            },
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("sum to 1"));
    }

    #[test]
    fn deserializes_with_partial_overrides() {
        let cfg: AnalysisConfig =
            serde_json::from_str(r#"{"similarity_threshold": 0.5, "max_hypotheses": 3}"#).unwrap();
        assert_eq!(cfg.similarity_threshold, 0.5);
        assert_eq!(cfg.max_hypotheses, 3);
        assert_eq!(cfg.max_documents, 50);
    }
}
