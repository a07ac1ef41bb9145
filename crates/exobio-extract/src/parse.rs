//! Tolerant parsing of the generation collaborator's free-text responses
//! into the same shapes the heuristic extractors produce.
//!
//! Responses are model output and arrive in loosely structured prose; every
//! parser here degrades field-by-field rather than failing, so a partially
//! usable response still contributes what it can.

use exobio_core::UNKNOWN;
use once_cell::sync::Lazy;
use regex::Regex;

/// Protocol analysis recovered from a collaborator response.
#[derive(Debug, Clone)]
pub struct ProtocolAnalysis {
    pub protocol_type: String,
    pub conditions: serde_json::Map<String, serde_json::Value>,
}

impl Default for ProtocolAnalysis {
    fn default() -> Self {
        Self {
            protocol_type: UNKNOWN.to_string(),
            conditions: serde_json::Map::new(),
        }
    }
}

/// Parse a protocol-analysis response: prefer an embedded JSON object,
/// fall back to keyword classification of the prose.
pub fn parse_protocol_response(response: &str) -> ProtocolAnalysis {
    if let Some(value) = embedded_json(response) {
        if let serde_json::Value::Object(obj) = value {
            let protocol_type = obj
                .get("protocol_type")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| UNKNOWN.to_string());
            let conditions = obj
                .get("conditions")
                .and_then(|v| v.as_object())
                .cloned()
                .unwrap_or_default();
            return ProtocolAnalysis {
                protocol_type,
                conditions,
            };
        }
    }

    let mut analysis = ProtocolAnalysis::default();
    let lower = response.to_lowercase();
    if lower.contains("cell culture") {
        analysis.protocol_type = "Cell Culture".to_string();
    } else if lower.contains("animal study") {
        analysis.protocol_type = "Animal Study".to_string();
    } else if lower.contains("plant") {
        analysis.protocol_type = "Plant Study".to_string();
    }
    analysis
}

/// Summary and significance recovered from a literature-analysis response.
#[derive(Debug, Clone)]
pub struct LiteratureSummary {
    pub summary: String,
    pub significance: String,
}

/// Scan for `summary:`/`significance:` labeled lines; when no summary label
/// exists, the leading response text stands in for it.
pub fn parse_literature_response(response: &str) -> LiteratureSummary {
    let mut summary = String::new();
    let mut significance = String::new();
    for line in response.lines() {
        let lower = line.to_lowercase();
        if let Some((_, rest)) = line.split_once(':') {
            if lower.contains("summary") && summary.is_empty() {
                summary = rest.trim().to_string();
            } else if lower.contains("significance") && significance.is_empty() {
                significance = rest.trim().to_string();
            }
        }
    }
    if summary.is_empty() {
        summary = if response.len() > 200 {
            let cut = response
                .char_indices()
                .take_while(|&(i, _)| i < 200)
                .last()
                .map(|(i, c)| i + c.len_utf8())
                .unwrap_or(0);
            format!("{}...", &response[..cut])
        } else {
            response.to_string()
        };
    }
    if significance.is_empty() {
        significance = UNKNOWN.to_string();
    }
    LiteratureSummary {
        summary,
        significance,
    }
}

static LIST_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-•*\d.)\s]+").expect("list marker"));

/// Extract list items from a bulleted or numbered response. Items shorter
/// than `min_len` are dropped; at most `cap` items are returned.
pub fn parse_listed_items(response: &str, min_len: usize, cap: usize) -> Vec<String> {
    let mut items = Vec::new();
    for line in response.lines() {
        let line = line.trim();
        let is_item = line.starts_with('-')
            || line.starts_with('•')
            || line.starts_with('*')
            || line.chars().next().is_some_and(|c| c.is_ascii_digit());
        if !is_item {
            continue;
        }
        let cleaned = LIST_MARKER.replace(line, "").trim().to_string();
        if cleaned.len() > min_len {
            items.push(cleaned);
            if items.len() == cap {
                break;
            }
        }
    }
    items
}

/// Research gaps from a collaborator response (min length 10, top 5).
pub fn parse_research_gaps(response: &str) -> Vec<String> {
    parse_listed_items(response, 10, 5)
}

/// Candidate hypotheses from a collaborator response (min length 15, top 5).
pub fn parse_hypotheses(response: &str) -> Vec<String> {
    parse_listed_items(response, 15, 5)
}

fn embedded_json(response: &str) -> Option<serde_json::Value> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&response[start..=end]).ok()
}
