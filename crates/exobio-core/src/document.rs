use serde::{Deserialize, Serialize};

/// A research document as ingested from the data pipeline.
///
/// Immutable once admitted to a run. `id` is the caller-supplied accession
/// (e.g. an OSDR study id or a DOI) and must be unique within the corpus;
/// edges between documents are tie-broken by lexicographic id order, so ids
/// double as the deterministic ordering key. Fields the pipeline does not
/// understand are preserved untouched in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    /// Free-text body, typically the study abstract or description.
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_area: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub organisms: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: text.into(),
            research_area: None,
            organisms: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Title and body joined the way the analyzers consume them.
    pub fn combined_text(&self) -> String {
        format!("{}\n\n{}", self.title, self.text)
    }

    /// Size of the analyzable content in bytes, used by the admission guard.
    pub fn content_len(&self) -> usize {
        self.title.len() + self.text.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_fields_pass_through() {
        let raw = serde_json::json!({
            "id": "OSD-37",
            "title": "Rodent Research 1",
            "text": "Mice flown on ISS.",
            "doi": "10.0/xyz",
            "mission": {"vehicle": "SpaceX-4"}
        });
        let doc: Document = serde_json::from_value(raw).unwrap();
        assert_eq!(doc.id, "OSD-37");
        assert_eq!(doc.extra["doi"], "10.0/xyz");

        let back = serde_json::to_value(&doc).unwrap();
        assert_eq!(back["mission"]["vehicle"], "SpaceX-4");
    }

    #[test]
    fn combined_text_joins_title_and_body() {
        let doc = Document::new("a", "Title", "Body");
        assert_eq!(doc.combined_text(), "Title\n\nBody");
        assert_eq!(doc.content_len(), 9);
    }
}
