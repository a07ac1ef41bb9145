//! Content-addressed cache of completed analysis reports.
//!
//! Keys are a blake3 fingerprint of the exact (document set, configuration)
//! pair, so a hit is only possible for a byte-identical input. The cache is
//! an explicit value the caller owns and invalidates; there is no ambient
//! global state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use exobio_core::{AnalysisConfig, AnalysisReport, Document};

/// Identity of one (document set, configuration) input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Fingerprint the run input. Document order matters: a reordered corpus is
/// a different input (ids and indices feed the report).
pub fn fingerprint(documents: &[Document], config: &AnalysisConfig) -> Fingerprint {
    let mut hasher = blake3::Hasher::new();
    for doc in documents {
        for field in [&doc.id, &doc.title, &doc.text] {
            hasher.update(&(field.len() as u64).to_le_bytes());
            hasher.update(field.as_bytes());
        }
    }
    // Struct field order is fixed, so the JSON encoding is deterministic.
    let config_bytes = serde_json::to_vec(config).unwrap_or_default();
    hasher.update(&(config_bytes.len() as u64).to_le_bytes());
    hasher.update(&config_bytes);
    Fingerprint(*hasher.finalize().as_bytes())
}

/// Thread-safe report cache with explicit invalidation.
#[derive(Debug, Default)]
pub struct AnalysisCache {
    inner: Mutex<HashMap<Fingerprint, Arc<AnalysisReport>>>,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &Fingerprint) -> Option<Arc<AnalysisReport>> {
        self.inner.lock().expect("cache lock").get(key).cloned()
    }

    pub fn insert(&self, key: Fingerprint, report: Arc<AnalysisReport>) {
        self.inner.lock().expect("cache lock").insert(key, report);
    }

    /// Drop one entry; returns whether it existed.
    pub fn invalidate(&self, key: &Fingerprint) -> bool {
        self.inner.lock().expect("cache lock").remove(key).is_some()
    }

    pub fn clear(&self) {
        self.inner.lock().expect("cache lock").clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("cache lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
