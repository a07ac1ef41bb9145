//! TF-IDF vector space over one corpus.
//!
//! Weighting: `tf = count / doc_tokens`, `idf = ln((N + 1) / (df + 1)) + 1`.
//! The smoothing keeps idf strictly positive, so a term occurring in every
//! document still contributes weight. Vectors are L2-normalized on
//! construction; a zero-token document yields the zero vector, which has
//! similarity 0 with everything by definition.

use std::collections::{HashMap, HashSet};

use exobio_core::{TermVector, Vocabulary};
use exobio_error::{Error, FatalError};

/// One corpus' vocabulary and per-document TF-IDF vectors.
///
/// Built once per run from the normalized token sequences and read-only
/// afterwards. Vector `i` corresponds to input sequence `i`.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    vocabulary: Vocabulary,
    vectors: Vec<TermVector>,
}

impl VectorSpace {
    /// Build the vocabulary and weighted vectors from normalized tokens.
    ///
    /// Fails with a fatal `EmptyCorpus` error when `corpus` has no documents.
    pub fn build(corpus: &[Vec<String>]) -> Result<Self, Error> {
        if corpus.is_empty() {
            return Err(FatalError::EmptyCorpus.into());
        }
        let n = corpus.len();
        let mut vocabulary = Vocabulary::with_doc_count(n);

        // First pass: intern terms, count per-document occurrences, and
        // accumulate document frequencies.
        let mut doc_counts: Vec<HashMap<u32, u32>> = Vec::with_capacity(n);
        for tokens in corpus {
            let mut counts: HashMap<u32, u32> = HashMap::new();
            for token in tokens {
                let id = vocabulary.intern(token);
                *counts.entry(id).or_insert(0) += 1;
            }
            for &id in counts.keys() {
                vocabulary.bump_doc_freq(id);
            }
            doc_counts.push(counts);
        }

        // Second pass: weight and normalize.
        let vectors = doc_counts
            .iter()
            .zip(corpus)
            .map(|(counts, tokens)| {
                let total = tokens.len() as f32;
                if total == 0.0 {
                    return TermVector::default();
                }
                let weights = counts
                    .iter()
                    .map(|(&id, &count)| {
                        let tf = count as f32 / total;
                        let df = vocabulary.doc_freq(id) as f32;
                        let idf = ((n as f32 + 1.0) / (df + 1.0)).ln() + 1.0;
                        (id, tf * idf)
                    })
                    .collect();
                TermVector::from_weights(weights)
            })
            .collect();

        Ok(Self {
            vocabulary,
            vectors,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vectors(&self) -> &[TermVector] {
        &self.vectors
    }

    pub fn vector(&self, idx: usize) -> &TermVector {
        &self.vectors[idx]
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Union of every document's `k` top-weighted terms. This is the corpus'
    /// dominant-theme set used by hypothesis novelty scoring.
    pub fn top_theme_terms(&self, k: usize) -> HashSet<String> {
        let mut themes = HashSet::new();
        for vector in &self.vectors {
            for (id, _) in vector.top_terms(k) {
                themes.insert(self.vocabulary.term(id).to_string());
            }
        }
        themes
    }
}
