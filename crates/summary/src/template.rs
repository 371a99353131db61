//! Prompt templates with a single `{chat_history}` slot.

use crate::SummaryError;

/// Placeholder replaced by a history chunk.
pub const HISTORY_PLACEHOLDER: &str = "{chat_history}";

/// Default summary prompt. Asks for a JSON array matching
/// [`response_schema`](crate::format::response_schema).
pub const DEFAULT_SUMMARY_TEMPLATE: &str = r#"Summarize the main content of each agenda item of the meeting log in 'Text', in Korean.
For every agenda item, list each speaker's key opinions and attitudes on one line each
("name: opinion"), then write the conclusion reached for that item.
Focus on statements related to the agenda and the meeting topic.

Answer with a JSON array of objects with the keys
"step" (agenda number), "sub_topic" (agenda title), "summary" (speaker lines joined by newlines)
and "conclusion".

Text: {chat_history}
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    /// Create a template. It must contain [`HISTORY_PLACEHOLDER`].
    pub fn new(text: impl Into<String>) -> Result<Self, SummaryError> {
        let text = text.into();
        if !text.contains(HISTORY_PLACEHOLDER) {
            return Err(SummaryError::InvalidTemplate(format!(
                "template has no {HISTORY_PLACEHOLDER} placeholder"
            )));
        }
        Ok(Self { text })
    }

    /// Substitute every placeholder with `history`.
    pub fn render(&self, history: &str) -> String {
        self.text.replace(HISTORY_PLACEHOLDER, history)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            text: DEFAULT_SUMMARY_TEMPLATE.to_string(),
        }
    }
}
