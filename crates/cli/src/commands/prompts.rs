//! `agendum prompts` — Render the summary prompts a meeting would produce,
//! without calling a model.

use super::load_meeting;
use agendum_config::AppConfig;
use agendum_context::{CharEstimator, HistoryOptions, MeetingHistoryBuilder, estimate_tokens};
use agendum_core::{MeetingContext, Provider, ProviderError, ProviderRequest, ProviderResponse};
use agendum_summary::{MeetingSummarizer, SummaryError};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

pub async fn run(input: &Path) -> agendum_core::Result<()> {
    let config = AppConfig::load()?;
    let context = load_meeting(input)?;

    let prompts = render_prompts(context, &config).await?;
    for (i, prompt) in prompts.iter().enumerate() {
        println!("── prompt {}/{} (~{} tokens) ──", i + 1, prompts.len(), estimate_tokens(prompt));
        println!("{prompt}");
    }
    Ok(())
}

async fn render_prompts(
    context: MeetingContext,
    config: &AppConfig,
) -> Result<Vec<String>, SummaryError> {
    let builder = MeetingHistoryBuilder::with_options(context, &HistoryOptions::from_config(config));
    let summarizer = MeetingSummarizer::new(Arc::new(DryRunProvider), config.summary.clone());

    let allocation = summarizer.history_allocation().await?;
    let chunks = builder.build_chunks_async(&CharEstimator, allocation).await?;
    Ok(summarizer.prompts_for(&chunks))
}

/// Counts with the byte heuristic; refuses to generate.
struct DryRunProvider;

#[async_trait]
impl Provider for DryRunProvider {
    fn name(&self) -> &str {
        "dry-run"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::NotConfigured("dry run: no model is called".into()))
    }

    async fn count_tokens(&self, _model: &str, text: &str) -> Result<usize, ProviderError> {
        Ok(estimate_tokens(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agendum_core::{ChatTurn, Participant};

    fn context() -> MeetingContext {
        MeetingContext {
            topic: "Launch".into(),
            agendas: [("1", "Checklist")].into_iter().collect(),
            host: "kim".into(),
            ai_participant: None,
            participants: vec![
                Participant::new("kim", "Kim"),
                Participant::new("helper@ai.com", "Assistant"),
            ],
            chats: vec![
                ChatTurn::new("kim", "Are we ready?", "1"),
                ChatTurn::new("helper@ai.com", "Two items remain.", "1"),
            ],
        }
    }

    #[tokio::test]
    async fn renders_one_prompt_with_history() {
        let prompts = render_prompts(context(), &AppConfig::default()).await.unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("회의 주제: Launch\n안건 1. Checklist"));
        assert!(prompts[0].contains("Assistant(YOU): Two items remain."));
        assert!(!prompts[0].contains("{chat_history}"));
    }

    #[tokio::test]
    async fn tiny_limit_is_rejected() {
        let mut config = AppConfig::default();
        config.summary.input_token_limit = 1;
        let err = render_prompts(context(), &config).await.unwrap_err();
        assert!(matches!(err, SummaryError::TemplateTooLarge { .. }));
    }

    #[tokio::test]
    async fn dry_run_never_completes() {
        let err = DryRunProvider
            .complete(ProviderRequest::new("m", "p"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}
