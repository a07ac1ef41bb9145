//! Deterministic extraction of structured metadata from research documents.
//!
//! Two producers feed the same shapes: the heuristic path here (pattern and
//! keyword matching against a curated space-biology lexicon) and the parsers
//! in [`parse`] that read the external collaborator's free-text responses.
//! Callers get identical output shapes either way; scalar fields that cannot
//! be resolved hold the `"unknown"` sentinel and lists are empty, never
//! absent.

pub mod lexicon;
pub mod literature;
pub mod metadata;
pub mod parse;

pub use literature::{
    extract_current_findings, extract_literature, heuristic_hypotheses, research_context,
};
pub use metadata::extract_experiment_metadata;
