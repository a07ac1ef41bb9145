//! Pure analysis algorithms over a document corpus.
//!
//! This crate is the CPU-bound heart of the pipeline and is intentionally
//! small, deterministic, and free of I/O:
//! - [`normalize::normalize`]: tokenization + stopword removal.
//! - [`vector_space::VectorSpace`]: smoothed TF-IDF vectors over one corpus.
//! - [`similarity::find_related`]: the pairwise cosine sweep with theme
//!   extraction and threshold filtering.
//! - [`classify::classify`]: score-band relationship tiers.
//! - [`rank::rank_hypotheses`]: heuristic hypothesis scoring and ranking.
//!
//! Everything here is reproducible for a fixed input and configuration;
//! ties always break on a documented, stable key.

pub mod classify;
pub mod normalize;
pub mod rank;
pub mod similarity;
pub mod vector_space;

pub use classify::{classify, fallback_explanation};
pub use normalize::normalize;
pub use rank::{rank_hypotheses, RankSignals};
pub use similarity::{cosine, find_related, RelatedPair, SimilarityParams};
pub use vector_space::VectorSpace;
