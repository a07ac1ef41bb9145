//! The analysis run: admission, vector space, cross-referencing, extraction,
//! hypothesis generation, interpretations, and report assembly.
//!
//! External collaborator calls are issued with bounded concurrency and a
//! per-call timeout; any failure degrades the affected unit to its heuristic
//! path and is recorded in the report notes. Cancellation stops new external
//! calls and new units; completed units are returned as a partial report.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use exobio_analyze::{
    classify, fallback_explanation, find_related, rank_hypotheses, similarity::RelatedPair,
    RankSignals, SimilarityParams, VectorSpace,
};
use exobio_core::{
    AnalysisConfig, AnalysisReport, AnalysisSummary, Audience, Document, ExperimentMetadata,
    HypothesisReport, LiteratureAnalysis, SimilarityEdge, UNKNOWN,
};
use exobio_error::{Error, FatalError, RecoverableError};
use exobio_extract::lexicon::{is_medical, ESTABLISHED_METHODS, MISSION_TERMS};
use exobio_extract::{
    extract_current_findings, extract_experiment_metadata, extract_literature,
    heuristic_hypotheses, parse, research_context,
};
use exobio_llm::{prompts, DocContext, TextGenerator};

use crate::cache::{fingerprint, AnalysisCache};
use crate::cancel::CancellationToken;

/// Drives one or more analysis runs over document corpora.
///
/// The generation collaborator is an injected capability; without one, every
/// stage runs its deterministic heuristic path and the report shape is
/// unchanged.
pub struct Analyzer {
    config: AnalysisConfig,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Analyzer {
    /// Validates the configuration up front; invalid knobs are fatal before
    /// any work starts.
    pub fn new(config: AnalysisConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            config,
            generator: None,
        })
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full analysis over `documents`.
    ///
    /// Fatal errors: an empty corpus (or a corpus where no document passes
    /// the size guard) and invalid configuration. Everything else is
    /// isolated per document or per pair and lands in the report notes.
    #[instrument(skip_all, fields(documents = documents.len()))]
    pub async fn analyze(
        &self,
        documents: Vec<Document>,
        cancel: &CancellationToken,
    ) -> Result<AnalysisReport, Error> {
        if documents.is_empty() {
            return Err(FatalError::EmptyCorpus.into());
        }
        let submitted = documents.len();
        let mut notes = Vec::new();
        let admitted = self.admit(documents, &mut notes);
        if admitted.is_empty() {
            return Err(FatalError::EmptyCorpus.into());
        }
        info!(admitted = admitted.len(), "starting analysis run");

        // CPU-bound stages: tokenize, weight, and score pairs.
        let token_seqs: Vec<Vec<String>> = admitted
            .iter()
            .map(|doc| exobio_analyze::normalize(&doc.combined_text()))
            .collect();
        let space = VectorSpace::build(&token_seqs)?;
        let params = SimilarityParams {
            threshold: self.config.similarity_threshold,
            top_terms_per_doc: self.config.top_terms_per_doc,
            max_shared_themes: self.config.max_shared_themes,
        };
        let pairs = find_related(&space, &params);
        debug!(pairs = pairs.len(), "pairwise sweep complete");

        let edges = self.build_edges(&admitted, pairs, cancel, &mut notes).await;

        let (experiment_metadata, mut literature_analyses) =
            self.extract_documents(&admitted, cancel, &mut notes).await;
        attach_related_studies(&mut literature_analyses, &edges);

        let corpus_themes = space.top_theme_terms(self.config.top_terms_per_doc);
        let research_hypotheses = self
            .generate_hypotheses(&admitted, &corpus_themes, cancel, &mut notes)
            .await;

        let results_text = format_results(
            admitted.len(),
            edges.len(),
            research_hypotheses.hypotheses.len(),
            &corpus_themes,
        );
        let combined_text: String = admitted
            .iter()
            .map(|doc| doc.combined_text())
            .collect::<Vec<_>>()
            .join(" ");
        let interpretations = self
            .interpret(&combined_text, &results_text, cancel, &mut notes)
            .await;

        let summary = AnalysisSummary {
            total_documents: submitted,
            experiments_analyzed: experiment_metadata.len(),
            literature_analyzed: literature_analyses.len(),
            cross_references_found: edges.len(),
            hypotheses_generated: research_hypotheses.hypotheses.len(),
            timestamp: Utc::now(),
        };
        info!(
            edges = summary.cross_references_found,
            hypotheses = summary.hypotheses_generated,
            "analysis run complete"
        );

        Ok(AnalysisReport {
            experiment_metadata,
            literature_analyses,
            cross_references: edges,
            research_hypotheses,
            interpretations,
            notes,
            summary,
        })
    }

    /// Cache-aware variant: returns the cached report on a fingerprint hit,
    /// otherwise runs and (for uncancelled runs) stores the result. The
    /// boolean is true on a hit.
    pub async fn analyze_with_cache(
        &self,
        documents: Vec<Document>,
        cancel: &CancellationToken,
        cache: &AnalysisCache,
    ) -> Result<(Arc<AnalysisReport>, bool), Error> {
        let key = fingerprint(&documents, &self.config);
        if let Some(report) = cache.get(&key) {
            debug!(%key, "analysis cache hit");
            return Ok((report, true));
        }
        let report = Arc::new(self.analyze(documents, cancel).await?);
        if !cancel.is_cancelled() {
            cache.insert(key, Arc::clone(&report));
        }
        Ok((report, false))
    }

    /// Admission policy: truncate past `max_documents` (noted), exclude
    /// individual documents over the size guard (recoverable, noted).
    fn admit(&self, mut documents: Vec<Document>, notes: &mut Vec<String>) -> Vec<Document> {
        if documents.len() > self.config.max_documents {
            warn!(
                submitted = documents.len(),
                max = self.config.max_documents,
                "corpus truncated"
            );
            notes.push(format!(
                "corpus truncated to the first {} of {} documents",
                self.config.max_documents,
                documents.len()
            ));
            documents.truncate(self.config.max_documents);
        }
        let mut admitted = Vec::with_capacity(documents.len());
        for doc in documents {
            let len = doc.content_len();
            if len > self.config.max_document_bytes {
                let err = RecoverableError::DocumentTooLarge {
                    id: doc.id.clone(),
                    len,
                    max: self.config.max_document_bytes,
                };
                warn!(id = %doc.id, len, "document excluded by size guard");
                notes.push(err.to_string());
            } else {
                admitted.push(doc);
            }
        }
        admitted
    }

    /// Classify retained pairs and attach explanations, collaborator-backed
    /// where possible, templated otherwise. Pair order (score descending) is
    /// preserved regardless of completion order.
    async fn build_edges(
        &self,
        documents: &[Document],
        pairs: Vec<RelatedPair>,
        cancel: &CancellationToken,
        notes: &mut Vec<String>,
    ) -> Vec<SimilarityEdge> {
        let mut results: Vec<(usize, SimilarityEdge, Option<String>)> =
            stream::iter(pairs.into_iter().enumerate().map(|(idx, pair)| {
                let generator = self.generator.clone();
                let cancel = cancel.clone();
                async move {
                    let tier = classify(pair.score, &self.config.tier_bounds);
                    let a = &documents[pair.a];
                    let b = &documents[pair.b];
                    let mut note = None;
                    let explanation = match generator {
                        Some(generator) if !cancel.is_cancelled() => {
                            let call = generator.explain_relationship(
                                DocContext {
                                    title: &a.title,
                                    excerpt: excerpt(&a.text),
                                },
                                DocContext {
                                    title: &b.title,
                                    excerpt: excerpt(&b.text),
                                },
                                &pair.themes,
                            );
                            match timeout(self.call_timeout(), call).await {
                                Ok(Ok(text)) if !text.trim().is_empty() => {
                                    text.trim().to_string()
                                }
                                Ok(Ok(_)) => fallback_explanation(&pair.themes),
                                Ok(Err(e)) => {
                                    note = Some(format!(
                                        "explanation for {} / {} used template fallback: {e}",
                                        a.id, b.id
                                    ));
                                    fallback_explanation(&pair.themes)
                                }
                                Err(_) => {
                                    note = Some(format!(
                                        "explanation for {} / {} timed out; used template fallback",
                                        a.id, b.id
                                    ));
                                    fallback_explanation(&pair.themes)
                                }
                            }
                        }
                        _ => fallback_explanation(&pair.themes),
                    };
                    let edge = SimilarityEdge::new(
                        &a.id,
                        &b.id,
                        pair.score,
                        pair.themes,
                        tier,
                        explanation,
                    );
                    (idx, edge, note)
                }
            }))
            .buffer_unordered(self.max_in_flight())
            .collect()
            .await;

        results.sort_by_key(|(idx, ..)| *idx);
        let mut edges = Vec::with_capacity(results.len());
        for (_, edge, note) in results {
            if let Some(note) = note {
                notes.push(note);
            }
            edges.push(edge);
        }
        edges
    }

    /// Per-document metadata and literature extraction. Units are processed
    /// with bounded concurrency; each unit is assembled atomically, so a
    /// cancelled run contains only whole documents.
    async fn extract_documents(
        &self,
        documents: &[Document],
        cancel: &CancellationToken,
        notes: &mut Vec<String>,
    ) -> (Vec<ExperimentMetadata>, Vec<LiteratureAnalysis>) {
        type Unit = (usize, ExperimentMetadata, LiteratureAnalysis, Vec<String>);
        let results: Vec<Option<Unit>> =
            stream::iter(documents.iter().enumerate().map(|(idx, doc)| {
                let generator = self.generator.clone();
                let cancel = cancel.clone();
                async move {
                    if cancel.is_cancelled() {
                        return None;
                    }
                    let mut unit_notes = Vec::new();
                    let mut meta = extract_experiment_metadata(doc);
                    let mut lit = extract_literature(doc);

                    if let Some(generator) = &generator {
                        let text = doc.combined_text();
                        if !cancel.is_cancelled() {
                            match self
                                .call(generator.as_ref(), prompts::protocol_analysis(&text))
                                .await
                            {
                                Ok(resp) => {
                                    let parsed = parse::parse_protocol_response(&resp);
                                    if parsed.protocol_type != UNKNOWN {
                                        meta.protocol_type = parsed.protocol_type;
                                    }
                                    if !parsed.conditions.is_empty() {
                                        meta.conditions = parsed.conditions;
                                    }
                                }
                                Err(e) => unit_notes.push(format!(
                                    "document {}: protocol analysis degraded to heuristics: {e}",
                                    doc.id
                                )),
                            }
                        }
                        if !cancel.is_cancelled() {
                            match self
                                .call(generator.as_ref(), prompts::literature_analysis(&text))
                                .await
                            {
                                Ok(resp) => {
                                    let parsed = parse::parse_literature_response(&resp);
                                    lit.summary = parsed.summary;
                                    lit.significance = parsed.significance;
                                }
                                Err(e) => unit_notes.push(format!(
                                    "document {}: literature analysis degraded to heuristics: {e}",
                                    doc.id
                                )),
                            }
                        }
                        if !cancel.is_cancelled() {
                            match self
                                .call(generator.as_ref(), prompts::research_gaps(&text))
                                .await
                            {
                                Ok(resp) => {
                                    let gaps = parse::parse_research_gaps(&resp);
                                    if !gaps.is_empty() {
                                        lit.research_gaps = gaps;
                                    }
                                }
                                Err(e) => unit_notes.push(format!(
                                    "document {}: research-gap analysis degraded to heuristics: {e}",
                                    doc.id
                                )),
                            }
                        }
                    }
                    Some((idx, meta, lit, unit_notes))
                }
            }))
            .buffer_unordered(self.max_in_flight())
            .collect()
            .await;

        let mut units: Vec<Unit> = results.into_iter().flatten().collect();
        units.sort_by_key(|(idx, ..)| *idx);
        let skipped = documents.len() - units.len();
        if skipped > 0 {
            notes.push(format!(
                "cancellation requested: {} of {} documents analyzed",
                units.len(),
                documents.len()
            ));
        }

        let mut metadata = Vec::with_capacity(units.len());
        let mut literature = Vec::with_capacity(units.len());
        for (_, meta, lit, unit_notes) in units {
            notes.extend(unit_notes);
            metadata.push(meta);
            literature.push(lit);
        }
        (metadata, literature)
    }

    /// Generate candidates (collaborator or curated fallback), then score
    /// and rank them against the corpus.
    async fn generate_hypotheses(
        &self,
        documents: &[Document],
        corpus_themes: &HashSet<String>,
        cancel: &CancellationToken,
        notes: &mut Vec<String>,
    ) -> HypothesisReport {
        let research_area = self.config.research_area.as_deref();
        let current_findings = extract_current_findings(documents);

        let heuristic =
            || (heuristic_hypotheses(research_area), "heuristic".to_string(), 0.4f32);
        let (candidates, generation_method, confidence) = match &self.generator {
            Some(generator) if !cancel.is_cancelled() => {
                let context = research_context(documents, research_area);
                let prompt = prompts::hypotheses(&context, &current_findings, research_area);
                match self.call(generator.as_ref(), prompt).await {
                    Ok(resp) => {
                        let parsed = parse::parse_hypotheses(&resp);
                        if parsed.is_empty() {
                            notes.push(
                                "hypothesis response carried no parseable candidates; \
                                 used curated fallback"
                                    .to_string(),
                            );
                            heuristic()
                        } else {
                            (parsed, "generative".to_string(), 0.7)
                        }
                    }
                    Err(e) => {
                        notes.push(format!(
                            "hypothesis generation degraded to curated fallback: {e}"
                        ));
                        heuristic()
                    }
                }
            }
            _ => heuristic(),
        };

        let signals = RankSignals {
            corpus_themes,
            methodology_terms: ESTABLISHED_METHODS,
            mission_terms: MISSION_TERMS,
        };
        let hypotheses = rank_hypotheses(
            &candidates,
            &signals,
            &self.config.rank_weights,
            self.config.max_hypotheses,
        );
        HypothesisReport {
            hypotheses,
            current_findings,
            research_area: research_area.map(str::to_string),
            generation_method,
            confidence,
        }
    }

    /// Per-audience interpretations. The clinical audience is appended when
    /// the corpus reads as biomedical. Each audience degrades independently
    /// to a deterministic template.
    async fn interpret(
        &self,
        combined_text: &str,
        results_text: &str,
        cancel: &CancellationToken,
        notes: &mut Vec<String>,
    ) -> BTreeMap<Audience, String> {
        let mut audiences = self.config.audiences.clone();
        if is_medical(combined_text) && !audiences.contains(&Audience::Clinical) {
            audiences.push(Audience::Clinical);
        }

        let mut interpretations = BTreeMap::new();
        for audience in audiences {
            let text = match &self.generator {
                Some(generator) if !cancel.is_cancelled() => {
                    let prompt = prompts::interpretation(audience.label(), results_text);
                    match self.call(generator.as_ref(), prompt).await {
                        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
                        Ok(_) => templated_interpretation(audience, results_text),
                        Err(e) => {
                            notes.push(format!(
                                "{} interpretation degraded to template: {e}",
                                audience.label()
                            ));
                            templated_interpretation(audience, results_text)
                        }
                    }
                }
                _ => templated_interpretation(audience, results_text),
            };
            interpretations.insert(audience, text);
        }
        interpretations
    }

    /// One collaborator call with the configured timeout mapped to the
    /// workspace error type.
    async fn call(&self, generator: &dyn TextGenerator, prompt: String) -> Result<String, Error> {
        match timeout(self.call_timeout(), generator.summarize_or_extract(&prompt)).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(RecoverableError::ExternalService {
                message: format!(
                    "call exceeded the {}s timeout",
                    self.config.timeout_seconds
                ),
                is_timeout: true,
            }
            .into()),
        }
    }

    fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_seconds.max(1))
    }

    fn max_in_flight(&self) -> usize {
        self.config.max_in_flight.max(1)
    }
}

/// First 300 bytes of the body on a char boundary, for prompt context.
fn excerpt(text: &str) -> &str {
    if text.len() <= 300 {
        return text;
    }
    let mut end = 300;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn attach_related_studies(literature: &mut [LiteratureAnalysis], edges: &[SimilarityEdge]) {
    let mut related: HashMap<&str, Vec<String>> = HashMap::new();
    for edge in edges {
        related
            .entry(edge.doc_a.as_str())
            .or_default()
            .push(edge.doc_b.clone());
        related
            .entry(edge.doc_b.as_str())
            .or_default()
            .push(edge.doc_a.clone());
    }
    for lit in literature {
        if let Some(partners) = related.get_mut(lit.document_id.as_str()) {
            lit.related_studies = std::mem::take(partners);
        }
    }
}

/// Compact key/value block handed to the interpretation prompts.
fn format_results(
    document_count: usize,
    edge_count: usize,
    hypothesis_count: usize,
    corpus_themes: &HashSet<String>,
) -> String {
    let themes = corpus_themes.iter().sorted().take(10).join(", ");
    format!(
        "documents_analyzed: {document_count}\n\
         cross_references_found: {edge_count}\n\
         hypotheses_generated: {hypothesis_count}\n\
         dominant_themes: {themes}"
    )
}

fn templated_interpretation(audience: Audience, results_text: &str) -> String {
    let lead = match audience {
        Audience::Scientific => {
            "Automated scientific interpretation was not available for this run; \
             the aggregate metrics below summarize the corpus analysis."
        }
        Audience::General => {
            "This run compared a set of space-biology studies, measured how \
             strongly they relate, and proposed follow-up research questions."
        }
        Audience::MissionPlanning => {
            "For mission planning: the cross-reference counts below indicate how \
             much of this corpus addresses overlapping flight concerns."
        }
        Audience::Clinical => {
            "The corpus contains biomedical content; clinical review of the \
             individual findings is recommended before translational use."
        }
    };
    format!("{lead}\n\n{results_text}")
}
