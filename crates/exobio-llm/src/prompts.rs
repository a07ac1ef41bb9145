//! Prompt builders for the collaborator operations.
//!
//! These are the only place prompt text lives; the pipeline passes the
//! returned strings to [`crate::TextGenerator::summarize_or_extract`] and
//! parses the responses with `exobio-extract`.

use crate::DocContext;

pub fn protocol_analysis(protocol_text: &str) -> String {
    format!(
        "Analyze this experimental protocol and extract structured information:\n\n\
         Protocol: {protocol_text}\n\n\
         Extract:\n\
         1. Protocol type (e.g., cell culture, animal study, plant growth, etc.)\n\
         2. Experimental conditions (temperature, pressure, duration, etc.)\n\
         3. Key variables being tested\n\n\
         Format as JSON with keys \"protocol_type\" and \"conditions\"."
    )
}

pub fn literature_analysis(literature_text: &str) -> String {
    format!(
        "As a space biology expert, analyze this research paper:\n\n\
         Text: {literature_text}\n\n\
         Provide:\n\
         1. Summary: concise summary of main findings\n\
         2. Significance: scientific significance for space biology\n\
         3. Implications for space missions\n\
         4. Novel contributions to the field\n\n\
         Keep responses focused and scientific."
    )
}

pub fn research_gaps(text: &str) -> String {
    format!(
        "Identify potential research gaps and unexplored areas in this space biology research:\n\n\
         Research: {text}\n\n\
         List 3-5 specific research gaps or questions that remain unanswered.\n\
         Focus on areas that could benefit future space missions."
    )
}

pub fn hypotheses(context: &str, findings: &[String], research_area: Option<&str>) -> String {
    let area_context = research_area
        .map(|area| format!(" in {area}"))
        .unwrap_or_default();
    format!(
        "Based on current research findings{area_context}, generate 3-5 novel, testable hypotheses:\n\n\
         Research Context: {context}\n\n\
         Current Findings:\n{findings}\n\n\
         Generate hypotheses that:\n\
         1. Build on existing knowledge\n\
         2. Are testable in space environments\n\
         3. Address important gaps\n\
         4. Could impact future missions\n\n\
         List each hypothesis on its own line, starting with a dash.",
        findings = findings.join("\n"),
    )
}

pub fn explain_relationship(
    doc_a: DocContext<'_>,
    doc_b: DocContext<'_>,
    themes: &[String],
) -> String {
    format!(
        "Explain why these two research papers are related:\n\n\
         Paper 1: {title_a}\n\
         Abstract 1: {excerpt_a}\n\n\
         Paper 2: {title_b}\n\
         Abstract 2: {excerpt_b}\n\n\
         Common themes: {themes}\n\n\
         Provide a brief explanation of their relationship and relevance to each other.",
        title_a = doc_a.title,
        excerpt_a = doc_a.excerpt,
        title_b = doc_b.title,
        excerpt_b = doc_b.excerpt,
        themes = themes.join(", "),
    )
}

/// Audience-specific interpretation prompt. Unknown audience labels fall
/// back to the general-audience framing.
pub fn interpretation(audience: &str, results_text: &str) -> String {
    match audience {
        "scientific" => format!(
            "Provide a scientific interpretation of these research results:\n\n\
             Results: {results_text}\n\n\
             Include:\n\
             1. Statistical significance and effect sizes\n\
             2. Mechanistic implications\n\
             3. Comparison to existing literature\n\
             4. Limitations and confounding factors\n\n\
             Write for a scientific audience."
        ),
        "mission_planning" => format!(
            "Analyze these research findings for space mission planning:\n\n\
             Results: {results_text}\n\n\
             Assess:\n\
             1. Impact on crew health and safety\n\
             2. Mission design considerations\n\
             3. Technology requirements\n\
             4. Risk mitigation strategies\n\
             5. Recommendations for future missions\n\n\
             Focus on practical applications for mission planners."
        ),
        "clinical" => format!(
            "Provide clinical interpretation of these biomedical research findings:\n\n\
             Results: {results_text}\n\n\
             Include:\n\
             1. Clinical relevance and implications\n\
             2. Potential therapeutic applications\n\
             3. Safety considerations\n\
             4. Translational research opportunities\n\
             5. Relevance to terrestrial medicine\n\n\
             Write for healthcare professionals."
        ),
        _ => format!(
            "Explain these research findings in simple, accessible language:\n\n\
             Results: {results_text}\n\n\
             Include:\n\
             1. What was discovered in plain English\n\
             2. Why this matters for space exploration\n\
             3. How this could benefit life on Earth\n\
             4. What this means for future astronauts\n\n\
             Avoid technical jargon. Write for general public understanding."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hypothesis_prompt_threads_area_and_findings() {
        let prompt = hypotheses(
            "Title: A\nAbstract: ...",
            &["We observed bone loss.".to_string()],
            Some("Human Physiology"),
        );
        assert!(prompt.contains("in Human Physiology"));
        assert!(prompt.contains("We observed bone loss."));
    }

    #[test]
    fn interpretation_varies_by_audience() {
        let results = "edge_count: 3";
        assert!(interpretation("scientific", results).contains("scientific audience"));
        assert!(interpretation("mission_planning", results).contains("mission planners"));
        assert!(interpretation("clinical", results).contains("healthcare professionals"));
        assert!(interpretation("general", results).contains("general public"));
        assert!(interpretation("anything-else", results).contains("general public"));
    }

    #[test]
    fn explanation_prompt_includes_both_titles_and_themes() {
        let prompt = explain_relationship(
            DocContext { title: "Bone loss", excerpt: "Mice in orbit." },
            DocContext { title: "Muscle atrophy", excerpt: "Crew studies." },
            &["microgravity".to_string(), "atrophy".to_string()],
        );
        assert!(prompt.contains("Bone loss"));
        assert!(prompt.contains("Muscle atrophy"));
        assert!(prompt.contains("microgravity, atrophy"));
    }
}
