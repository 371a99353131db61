//! Summary records: the model's JSON answer and its display form.

use crate::SummaryError;
use serde::{Deserialize, Serialize};

/// One agenda item as summarized by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaSummary {
    /// Agenda number; -1 when the model omitted it
    #[serde(default = "unknown_step")]
    pub step: i64,

    #[serde(default)]
    pub sub_topic: String,

    /// Speaker lines (`name: opinion`), newline-separated
    #[serde(default, alias = "key_statements")]
    pub summary: String,

    #[serde(default)]
    pub conclusion: String,
}

fn unknown_step() -> i64 {
    -1
}

/// Display form of an [`AgendaSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEntry {
    pub agenda_id: i64,
    pub topic: String,
    pub content: String,
}

/// JSON Schema sent with every summary request.
pub fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "required": ["step", "sub_topic", "summary", "conclusion"],
            "properties": {
                "step": { "type": "INTEGER" },
                "sub_topic": { "type": "STRING" },
                "summary": { "type": "STRING" },
                "conclusion": { "type": "STRING" }
            }
        }
    })
}

/// Parse a model response into summaries.
///
/// Accepts a bare JSON array or one wrapped in a Markdown code fence.
pub fn parse_summaries(content: &str) -> Result<Vec<AgendaSummary>, SummaryError> {
    let body = strip_code_fence(content.trim());
    serde_json::from_str(body).map_err(|e| SummaryError::InvalidResponse(e.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") up to the first newline.
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Turn summaries into display entries.
///
/// Content layout:
///
/// ```text
/// 주요 발언:
/// \t{line 1}
/// \t{line 2}
/// 결론:
/// \t{conclusion}
/// ```
pub fn format_summaries(summaries: &[AgendaSummary]) -> Vec<SummaryEntry> {
    summaries
        .iter()
        .map(|s| {
            let highlights: String = s
                .summary
                .split('\n')
                .map(|line| format!("\t{line}\n"))
                .collect();
            SummaryEntry {
                agenda_id: s.step,
                topic: s.sub_topic.clone(),
                content: format!("주요 발언:\n{highlights}결론:\n\t{}", s.conclusion),
            }
        })
        .collect()
}
