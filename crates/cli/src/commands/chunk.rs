//! `agendum chunk` — Split a meeting history into budgeted chunks.

use super::load_meeting;
use agendum_config::AppConfig;
use agendum_context::{CharEstimator, HistoryOptions, MeetingHistoryBuilder};
use agendum_core::{AgendaOrder, ChunkError, MeetingContext, TokenCounter};
use std::path::Path;

const RULE: &str = "────────────────────────────────────────";

pub async fn run(
    input: &Path,
    budget: Option<usize>,
    order: Option<AgendaOrder>,
) -> agendum_core::Result<()> {
    let config = AppConfig::load()?;
    let context = load_meeting(input)?;

    let chunks = chunk_meeting(context, &config, budget, order)?;
    for (i, chunk) in chunks.iter().enumerate() {
        if i > 0 {
            println!("{RULE}");
        }
        println!("{chunk}");
    }
    eprintln!("{} chunk(s)", chunks.len());
    Ok(())
}

/// Command-line values win over config; a budget enables the heuristic
/// counter.
fn chunk_meeting(
    context: MeetingContext,
    config: &AppConfig,
    budget: Option<usize>,
    order: Option<AgendaOrder>,
) -> Result<Vec<String>, ChunkError> {
    let mut options = HistoryOptions::from_config(config);
    if let Some(order) = order {
        options.agenda_order = order;
    }
    let budget = budget.or(config.chunking.token_budget);

    let builder = MeetingHistoryBuilder::with_options(context, &options);
    let counter: Option<&dyn TokenCounter> = budget.map(|_| &CharEstimator as &dyn TokenCounter);
    builder.build_chunks(counter, budget)
}
