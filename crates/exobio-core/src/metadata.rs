use serde::{Deserialize, Serialize};

/// Sentinel for scalar fields neither the collaborator nor the heuristics
/// could resolve. Callers can rely on every field being present.
pub const UNKNOWN: &str = "unknown";

/// Structured metadata extracted from one experiment record.
///
/// Produced once per document and never mutated. Both the generative and the
/// heuristic extraction paths fill the same shape; unresolved scalars hold
/// [`UNKNOWN`] and unresolved lists are empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentMetadata {
    pub experiment_id: String,
    pub title: String,
    /// Coarse protocol classification, e.g. "Cell Culture" or "Animal Study".
    pub protocol_type: String,
    pub organisms: Vec<String>,
    /// Experimental conditions (temperature, duration, ...) when the
    /// collaborator could recover them; empty for the heuristic path.
    pub conditions: serde_json::Map<String, serde_json::Value>,
    pub objectives: Vec<String>,
    pub methodologies: Vec<String>,
    pub expected_outcomes: Vec<String>,
    pub safety_considerations: Vec<String>,
}

impl ExperimentMetadata {
    /// An all-defaults record for `id`/`title`, used as the base both
    /// extraction paths fill in.
    pub fn unresolved(experiment_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            experiment_id: experiment_id.into(),
            title: title.into(),
            protocol_type: UNKNOWN.to_string(),
            organisms: Vec::new(),
            conditions: serde_json::Map::new(),
            objectives: Vec::new(),
            methodologies: Vec::new(),
            expected_outcomes: Vec::new(),
            safety_considerations: Vec::new(),
        }
    }
}

/// Literature-analysis results for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiteratureAnalysis {
    pub document_id: String,
    pub summary: String,
    pub key_findings: Vec<String>,
    pub methodology: String,
    pub significance: String,
    pub research_gaps: Vec<String>,
    pub future_directions: Vec<String>,
    /// Ids of documents this one shares a retained edge with. Populated by
    /// the cross-reference stage after extraction.
    pub related_studies: Vec<String>,
}

impl LiteratureAnalysis {
    pub fn unresolved(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            summary: UNKNOWN.to_string(),
            key_findings: Vec::new(),
            methodology: UNKNOWN.to_string(),
            significance: UNKNOWN.to_string(),
            research_gaps: Vec::new(),
            future_directions: Vec::new(),
            related_studies: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_records_have_no_absent_fields() {
        let meta = ExperimentMetadata::unresolved("OSD-1", "Plant growth");
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["protocol_type"], UNKNOWN);
        assert!(json["organisms"].as_array().unwrap().is_empty());
        assert!(json.get("conditions").is_some());

        let lit = LiteratureAnalysis::unresolved("OSD-1");
        let json = serde_json::to_value(&lit).unwrap();
        assert_eq!(json["summary"], UNKNOWN);
        assert_eq!(json["methodology"], UNKNOWN);
    }
}
