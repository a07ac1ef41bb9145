use std::collections::HashMap;

/// Terms observed across one corpus, with document-frequency counts.
///
/// Built once per run by the vector-space builder and read-only afterwards.
/// Term ids are dense `u32` indices in interning order, which is input order
/// and therefore deterministic for a given corpus.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, u32>,
    doc_freq: Vec<u32>,
    doc_count: usize,
}

impl Vocabulary {
    pub fn with_doc_count(doc_count: usize) -> Self {
        Self {
            doc_count,
            ..Default::default()
        }
    }

    /// Intern `term`, returning its stable id.
    pub fn intern(&mut self, term: &str) -> u32 {
        if let Some(&id) = self.index.get(term) {
            return id;
        }
        let id = self.terms.len() as u32;
        self.terms.push(term.to_string());
        self.index.insert(term.to_string(), id);
        self.doc_freq.push(0);
        id
    }

    /// Record that `term_id` occurs in one more document.
    pub fn bump_doc_freq(&mut self, term_id: u32) {
        self.doc_freq[term_id as usize] += 1;
    }

    pub fn term_id(&self, term: &str) -> Option<u32> {
        self.index.get(term).copied()
    }

    pub fn term(&self, id: u32) -> &str {
        &self.terms[id as usize]
    }

    pub fn doc_freq(&self, id: u32) -> u32 {
        self.doc_freq[id as usize]
    }

    pub fn doc_count(&self) -> usize {
        self.doc_count
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Sparse TF-IDF vector for one document.
///
/// Weights are stored as `(term_id, weight)` pairs sorted by term id, which
/// makes the dot product a linear merge and iteration order deterministic.
/// Invariant: either the vector is empty (zero-token document) or it has unit
/// L2 norm. The builder enforces this before any similarity computation.
#[derive(Debug, Clone, Default)]
pub struct TermVector {
    weights: Vec<(u32, f32)>,
}

impl TermVector {
    /// Build from unsorted pairs; sorts by term id and L2-normalizes.
    /// A document with no tokens yields the zero vector.
    pub fn from_weights(mut weights: Vec<(u32, f32)>) -> Self {
        weights.retain(|&(_, w)| w > 0.0);
        weights.sort_by_key(|&(id, _)| id);
        let norm = weights.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut weights {
                *w /= norm;
            }
        }
        Self { weights }
    }

    pub fn is_zero(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, f32)> + '_ {
        self.weights.iter().copied()
    }

    /// Dot product over the shared support. Both operands are sorted by term
    /// id, so this is a linear merge.
    pub fn dot(&self, other: &TermVector) -> f32 {
        let (mut i, mut j) = (0usize, 0usize);
        let mut acc = 0.0f32;
        while i < self.weights.len() && j < other.weights.len() {
            let (ta, wa) = self.weights[i];
            let (tb, wb) = other.weights[j];
            match ta.cmp(&tb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    acc += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        acc
    }

    /// The `k` highest-weighted terms, heaviest first. Ties break toward the
    /// smaller term id so the result is stable across runs.
    pub fn top_terms(&self, k: usize) -> Vec<(u32, f32)> {
        let mut ranked = self.weights.clone();
        ranked.sort_by(|(ida, wa), (idb, wb)| {
            wb.partial_cmp(wa)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(ida.cmp(idb))
        });
        ranked.truncate(k);
        ranked
    }

    pub fn weight(&self, term_id: u32) -> f32 {
        self.weights
            .binary_search_by_key(&term_id, |&(id, _)| id)
            .map(|idx| self.weights[idx].1)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent_and_dense() {
        let mut vocab = Vocabulary::with_doc_count(2);
        let a = vocab.intern("microgravity");
        let b = vocab.intern("bone");
        assert_eq!(vocab.intern("microgravity"), a);
        assert_eq!((a, b), (0, 1));
        assert_eq!(vocab.term(b), "bone");
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn from_weights_normalizes_to_unit_norm() {
        let v = TermVector::from_weights(vec![(1, 3.0), (0, 4.0)]);
        let norm: f32 = v.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
        // sorted by term id after construction
        let ids: Vec<u32> = v.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn zero_vector_dot_is_zero() {
        let zero = TermVector::from_weights(vec![]);
        let v = TermVector::from_weights(vec![(0, 1.0)]);
        assert!(zero.is_zero());
        assert_eq!(zero.dot(&v), 0.0);
    }

    #[test]
    fn dot_merges_shared_support_only() {
        let a = TermVector::from_weights(vec![(0, 1.0), (2, 1.0)]);
        let b = TermVector::from_weights(vec![(1, 1.0), (2, 1.0)]);
        let sim = a.dot(&b);
        // each vector has norm 1/sqrt(2) per component; only term 2 overlaps
        assert!((sim - 0.5).abs() < 1e-6);
    }

    #[test]
    fn top_terms_orders_by_weight_then_id() {
        let v = TermVector::from_weights(vec![(0, 1.0), (1, 2.0), (2, 1.0)]);
        let top = v.top_terms(2);
        assert_eq!(top[0].0, 1);
        assert_eq!(top[1].0, 0); // tie between 0 and 2 breaks to smaller id
    }
}
