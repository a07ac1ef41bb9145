//! Core data types for the exobio workspace.
//!
//! Everything here is plain data: documents as ingested, the vector-space
//! types shared between the builder and the similarity engine, cross-reference
//! edges, extraction results, and the run configuration. Algorithms live in
//! `exobio-analyze`; orchestration lives in `exobio-pipeline`.

pub mod config;
pub mod document;
pub mod edge;
pub mod hypothesis;
pub mod metadata;
pub mod report;
pub mod vector;

pub use config::{AnalysisConfig, Audience, RankWeights, TierBounds};
pub use document::Document;
pub use edge::{RelationTier, SimilarityEdge};
pub use hypothesis::RankedHypothesis;
pub use metadata::{ExperimentMetadata, LiteratureAnalysis, UNKNOWN};
pub use report::{AnalysisReport, AnalysisSummary, HypothesisReport};
pub use vector::{TermVector, Vocabulary};
