//! Pairwise cosine similarity and shared-theme extraction.
//!
//! The full upper-triangular sweep is O(N²) dot products and is the dominant
//! cost of a run. Pairs are scored in parallel with rayon and the retained
//! set is re-sorted on a stable key afterwards, so the output order is
//! deterministic regardless of scheduling.

use exobio_core::TermVector;
use rayon::prelude::*;

use crate::vector_space::VectorSpace;

/// Knobs for the pairwise sweep, taken from `AnalysisConfig`.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityParams {
    /// Minimum score for a pair to be retained.
    pub threshold: f32,
    /// Top-weighted terms per document considered for theme intersection.
    pub top_terms_per_doc: usize,
    /// Cap on themes reported per pair.
    pub max_shared_themes: usize,
}

/// A retained pair, by corpus index, with `a < b`.
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedPair {
    pub a: usize,
    pub b: usize,
    pub score: f32,
    pub themes: Vec<String>,
}

/// Cosine similarity of two unit-or-zero vectors, clamped to [0, 1].
///
/// A zero vector has similarity 0 with everything; the clamp removes
/// negative floating-point artifacts near zero.
pub fn cosine(a: &TermVector, b: &TermVector) -> f32 {
    if a.is_zero() || b.is_zero() {
        return 0.0;
    }
    a.dot(b).clamp(0.0, 1.0)
}

/// Score every unordered document pair and keep those at or above the
/// threshold.
///
/// Self-pairs are never produced. Pairs with similarity exactly 0 are always
/// excluded, even at threshold 0.0: a zero cosine means disjoint vocabulary
/// support, which is not a relationship. Output is sorted by score
/// descending, ties broken by `(a, b)` ascending.
pub fn find_related(space: &VectorSpace, params: &SimilarityParams) -> Vec<RelatedPair> {
    let n = space.len();
    let mut pairs: Vec<RelatedPair> = (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            (i + 1..n).filter_map(move |j| {
                let score = cosine(space.vector(i), space.vector(j));
                if score > 0.0 && score >= params.threshold {
                    Some(RelatedPair {
                        a: i,
                        b: j,
                        score,
                        themes: shared_themes(space, i, j, params),
                    })
                } else {
                    None
                }
            })
        })
        .collect();

    pairs.sort_by(|x, y| {
        y.score
            .partial_cmp(&x.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| (x.a, x.b).cmp(&(y.a, y.b)))
    });
    pairs
}

/// Intersection of the two documents' top-weighted term sets, ordered by the
/// product of their weights descending (ties toward the smaller term id),
/// capped for reporting.
fn shared_themes(space: &VectorSpace, i: usize, j: usize, params: &SimilarityParams) -> Vec<String> {
    let top_a = space.vector(i).top_terms(params.top_terms_per_doc);
    let top_b = space.vector(j).top_terms(params.top_terms_per_doc);

    let mut combined: Vec<(u32, f32)> = top_a
        .iter()
        .filter_map(|&(id, wa)| {
            top_b
                .iter()
                .find(|&&(idb, _)| idb == id)
                .map(|&(_, wb)| (id, wa * wb))
        })
        .collect();

    combined.sort_by(|(ida, wa), (idb, wb)| {
        wb.partial_cmp(wa)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(ida.cmp(idb))
    });
    combined.truncate(params.max_shared_themes);
    combined
        .into_iter()
        .map(|(id, _)| space.vocabulary().term(id).to_string())
        .collect()
}
