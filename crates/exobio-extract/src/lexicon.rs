//! Curated space-biology lexicon and compiled extraction patterns.
//!
//! Term lists are lowercase and matched against lowercased text. Patterns
//! compile once via `Lazy`; all are case-insensitive.

use once_cell::sync::Lazy;
use regex::Regex;

/// Spaceflight environments and platforms.
pub const ENVIRONMENT_TERMS: &[&str] = &[
    "microgravity",
    "weightless",
    "space",
    "orbital",
    "iss",
    "mars",
    "lunar",
];

/// Organism and specimen vocabulary.
pub const ORGANISM_TERMS: &[&str] = &[
    "human", "mouse", "mice", "rodent", "rat", "plant", "arabidopsis", "cell", "tissue",
    "organism", "bacterial", "bacteria", "fungal", "yeast", "drosophila",
];

/// Physiological systems commonly studied in flight experiments.
pub const SYSTEM_TERMS: &[&str] = &[
    "cardiovascular",
    "musculoskeletal",
    "nervous",
    "immune",
    "reproductive",
];

/// Mission/domain concern terms used for hypothesis relevance scoring.
pub const MISSION_TERMS: &[&str] = &["microgravity", "space", "mars", "radiation", "astronaut"];

/// Established methodology vocabulary used for hypothesis feasibility
/// scoring (flat, lowercase).
pub const ESTABLISHED_METHODS: &[&str] = &[
    "rna-seq",
    "rna seq",
    "sequencing",
    "pcr",
    "western blot",
    "elisa",
    "microscopy",
    "imaging",
    "proteomics",
    "genomics",
    "transcriptomics",
    "metabolomics",
    "flow cytometry",
    "spectroscopy",
    "chromatography",
];

/// Sentence-level indicators that a statement reports a finding.
pub const FINDING_INDICATORS: &[&str] = &[
    "found",
    "discovered",
    "observed",
    "demonstrated",
    "showed",
    "revealed",
    "indicated",
    "suggested",
    "confirmed",
    "identified",
    "detected",
];

/// Sentence-level keywords marking methodology descriptions.
pub const METHOD_KEYWORDS: &[&str] = &[
    "method",
    "approach",
    "technique",
    "procedure",
    "protocol",
    "analysis",
    "measured",
    "assessed",
    "evaluated",
    "performed",
];

/// Indicators that a corpus is biomedical, which adds the clinical audience.
pub const MEDICAL_INDICATORS: &[&str] = &[
    "health",
    "medical",
    "clinical",
    "patient",
    "treatment",
    "therapy",
    "disease",
    "diagnosis",
    "physiological",
];

/// Protocol-type classification rules: first matching trigger wins.
pub const PROTOCOL_RULES: &[(&str, &str)] = &[
    ("cell culture", "Cell Culture"),
    ("animal study", "Animal Study"),
    ("rodent", "Animal Study"),
    ("mice", "Animal Study"),
    ("plant", "Plant Study"),
];

/// Research-gap statements used when no collaborator is available.
pub const FALLBACK_RESEARCH_GAPS: &[&str] = &[
    "Long-term effects of microgravity on cellular function",
    "Optimization of life support systems for Mars missions",
    "Plant growth strategies in low-resource environments",
    "Radiation protection mechanisms for deep space travel",
    "Psychological adaptation to isolated space environments",
];

/// Curated candidate hypotheses used when no collaborator is available.
pub const FALLBACK_HYPOTHESES: &[&str] = &[
    "Microgravity exposure induces novel adaptive responses in cellular metabolism",
    "Artificial gravity systems could prevent bone density loss in long-duration spaceflight",
    "Plant root architecture adapts to optimize nutrient uptake in space environments",
    "Cosmic radiation exposure creates predictable patterns of DNA damage and repair",
    "Closed-loop ecological systems require specific microbial community structures",
];

/// Methodology mention patterns. Matches are reported lowercased, first
/// occurrence wins for ordering.
pub static METHODOLOGY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)RNA[-\s]?seq(?:uencing)?",
        r"(?i)\bq?PCR\b|\bRT-PCR\b",
        r"(?i)western\s+blot",
        r"(?i)\bELISA\b",
        r"(?i)microscopy|imaging",
        r"(?i)proteomics?",
        r"(?i)genomics?",
        r"(?i)transcriptomics?",
        r"(?i)metabolomics?",
        r"(?i)flow\s+cytometry",
        r"(?i)spectroscopy",
        r"(?i)chromatography",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("methodology pattern"))
    .collect()
});

/// Objective statements ("the objective is to ...", "we aim to ...").
pub static OBJECTIVE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(?:objective|aim|goal|purpose)s?\s*(?:is|are|was|were)?\s*to\s+([^.]+)",
        r"(?i)(?:we|this study)\s+(?:aim|seek|intend)s?\s+to\s+([^.]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("objective pattern"))
    .collect()
});

/// Expected-outcome statements ("we expect that ...", "should result in ...").
pub static OUTCOME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(?:expect|anticipate|predict)(?:s|ed)?\s+(?:that\s+)?([^.]+)",
        r"(?i)(?:hypothesis|hypothesize)(?:s|d)?\s+(?:that\s+)?([^.]+)",
        r"(?i)(?:should|will|would)\s+(?:result in|lead to|cause)\s+([^.]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("outcome pattern"))
    .collect()
});

/// Safety-consideration statements.
pub static SAFETY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(?:safety|hazard|risk|precaution)s?\s*:?\s*([^.]+)",
        r"(?i)(?:careful|caution|warning)(?:ly)?\s+([^.]+)",
        r"(?i)(?:avoid|prevent|minimize)\s+([^.]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("safety pattern"))
    .collect()
});

/// Future-direction statements.
pub static FUTURE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(?:future|further|additional)\s+(?:research|studies|work|investigation)s?\s+([^.]+)",
        r"(?i)(?:next|subsequent)\s+(?:steps?|phase|stage)\s+([^.]+)",
        r"(?i)(?:remains?|requires?|needs?)\s+(?:to be\s+)?(?:investigated|studied|explored)\s*([^.]*)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("future pattern"))
    .collect()
});

/// True when the text reads as biomedical research.
pub fn is_medical(text: &str) -> bool {
    let lower = text.to_lowercase();
    MEDICAL_INDICATORS
        .iter()
        .any(|indicator| lower.contains(indicator))
}
