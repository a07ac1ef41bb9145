//! Orchestration of the corpus analysis pipeline.
//!
//! [`Analyzer`] drives one run end to end: admission, normalization, the
//! TF-IDF vector space, the pairwise similarity sweep, relationship
//! classification, per-document extraction, hypothesis generation and
//! ranking, and audience interpretations, assembled into a single
//! [`exobio_core::AnalysisReport`].
//!
//! Supporting pieces:
//! - [`cancel::CancellationToken`]: cooperative run cancellation; partial
//!   results from completed units are still returned.
//! - [`cache::AnalysisCache`]: explicit content-addressed report cache keyed
//!   by a fingerprint of (document set, configuration).

pub mod cache;
pub mod cancel;
pub mod run;

pub use cache::{fingerprint, AnalysisCache, Fingerprint};
pub use cancel::{CancellationHandle, CancellationToken};
pub use run::Analyzer;
