use serde::{Deserialize, Serialize};

/// A scored candidate research hypothesis.
///
/// Subscores are each in [0, 1]; `overall` is the weighted mean under
/// [`crate::config::RankWeights`]. Ranks are 1-based, assigned in descending
/// `overall` order with ties keeping generation order (stable sort).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedHypothesis {
    pub text: String,
    /// Distinctiveness against the corpus' dominant themes.
    pub novelty: f32,
    /// Evidence of established methodology in the formulation.
    pub feasibility: f32,
    /// Overlap with mission/domain concerns.
    pub relevance: f32,
    pub overall: f32,
    pub rank: usize,
}
