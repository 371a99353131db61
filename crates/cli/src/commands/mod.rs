pub mod chunk;
pub mod config_cmd;
pub mod names;
pub mod prompts;

use agendum_core::{Error, MeetingContext, Result};
use std::path::Path;

/// Read a meeting record from a JSON file.
pub fn load_meeting(path: &Path) -> Result<MeetingContext> {
    let input_error = |reason: String| Error::Input {
        path: path.display().to_string(),
        reason,
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|e| input_error(format!("failed to read: {e}")))?;
    let context: MeetingContext = serde_json::from_str(&raw)
        .map_err(|e| input_error(format!("invalid JSON: {e}")))?;
    tracing::debug!(
        path = %path.display(),
        participants = context.participants.len(),
        turns = context.chats.len(),
        "Meeting record loaded"
    );
    Ok(context)
}
