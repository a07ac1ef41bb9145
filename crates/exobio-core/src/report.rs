use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Audience;
use crate::edge::SimilarityEdge;
use crate::hypothesis::RankedHypothesis;
use crate::metadata::{ExperimentMetadata, LiteratureAnalysis};

/// Ranked hypotheses plus the context they were generated from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HypothesisReport {
    pub hypotheses: Vec<RankedHypothesis>,
    /// Finding sentences pulled from the corpus that seeded generation.
    pub current_findings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research_area: Option<String>,
    /// "generative" when the collaborator produced the candidates,
    /// "heuristic" for the curated fallback set.
    pub generation_method: String,
    pub confidence: f32,
}

/// Counts and timing for one completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_documents: usize,
    pub experiments_analyzed: usize,
    pub literature_analyzed: usize,
    pub cross_references_found: usize,
    pub hypotheses_generated: usize,
    pub timestamp: DateTime<Utc>,
}

/// The single structured output of an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub experiment_metadata: Vec<ExperimentMetadata>,
    pub literature_analyses: Vec<LiteratureAnalysis>,
    pub cross_references: Vec<SimilarityEdge>,
    pub research_hypotheses: HypothesisReport,
    pub interpretations: BTreeMap<Audience, String>,
    /// Partial failures, truncation, and degradation notes. Empty on a fully
    /// clean run.
    pub notes: Vec<String>,
    pub summary: AnalysisSummary,
}
