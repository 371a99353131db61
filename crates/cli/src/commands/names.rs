//! `agendum names` — Show the speaker label table.

use super::load_meeting;
use agendum_context::{SpeakerLabels, resolve};
use agendum_core::Result;
use std::path::Path;

pub async fn run(input: &Path) -> Result<()> {
    let context = load_meeting(input)?;
    let labels = resolve(&context.participants);

    println!("👥 Speaker labels ({})", labels.len());
    println!("====================");
    for line in table(&labels) {
        println!("{line}");
    }
    Ok(())
}

fn table(labels: &SpeakerLabels) -> Vec<String> {
    let width = labels.iter().map(|(id, _)| id.chars().count()).max().unwrap_or(0);
    labels
        .iter()
        .map(|(id, label)| format!("  {id:<width$}  →  {label}"))
        .collect()
}
