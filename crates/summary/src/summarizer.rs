//! Meeting summarizer: history chunks in, agenda summaries out.
//!
//! # Flow
//!
//! 1. Measure the empty prompt template; the history gets what is left of
//!    the model's input limit
//! 2. Chunk the meeting history against that allocation, using the
//!    provider's own token counter
//! 3. Render one prompt per chunk and send them all concurrently
//! 4. Parse every response and concatenate in chunk order

use crate::format::{self, AgendaSummary};
use crate::template::PromptTemplate;
use crate::SummaryError;
use agendum_config::SummaryConfig;
use agendum_context::MeetingHistoryBuilder;
use agendum_core::{AsyncTokenCounter, Provider, ProviderError, ProviderRequest};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info};

pub struct MeetingSummarizer {
    provider: Arc<dyn Provider>,
    template: PromptTemplate,
    settings: SummaryConfig,
}

impl MeetingSummarizer {
    /// Create a summarizer with the default template.
    pub fn new(provider: Arc<dyn Provider>, settings: SummaryConfig) -> Self {
        Self {
            provider,
            template: PromptTemplate::default(),
            settings,
        }
    }

    /// Replace the prompt template.
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Tokens available to history in one prompt.
    pub async fn history_allocation(&self) -> Result<usize, SummaryError> {
        let template_tokens = self
            .provider
            .count_tokens(&self.settings.model, &self.template.render(""))
            .await?;
        let limit = self.settings.input_token_limit;

        match limit.checked_sub(template_tokens) {
            Some(allocation) if allocation > 0 => Ok(allocation),
            _ => Err(SummaryError::TemplateTooLarge {
                template_tokens,
                limit,
            }),
        }
    }

    /// One prompt per history chunk.
    pub fn prompts_for(&self, chunks: &[String]) -> Vec<String> {
        chunks.iter().map(|c| self.template.render(c)).collect()
    }

    /// The provider request for a rendered prompt.
    pub fn request_for(&self, prompt: String) -> ProviderRequest {
        ProviderRequest {
            model: self.settings.model.clone(),
            prompt,
            temperature: self.settings.temperature,
            top_p: Some(self.settings.top_p),
            top_k: Some(self.settings.top_k),
            max_tokens: Some(self.settings.max_output_tokens),
            response_schema: Some(format::response_schema()),
        }
    }

    /// Summarize a meeting, agenda by agenda.
    pub async fn summarize(
        &self,
        history: &MeetingHistoryBuilder,
    ) -> Result<Vec<AgendaSummary>, SummaryError> {
        let allocation = self.history_allocation().await?;

        let counter = ProviderCounter {
            provider: self.provider.as_ref(),
            model: &self.settings.model,
        };
        let chunks = history.build_chunks_async(&counter, allocation).await?;
        let prompts = self.prompts_for(&chunks);

        info!(
            provider = self.provider.name(),
            model = %self.settings.model,
            allocation,
            prompts = prompts.len(),
            "Summarizing meeting"
        );

        let responses = try_join_all(
            prompts
                .into_iter()
                .map(|prompt| self.provider.complete(self.request_for(prompt))),
        )
        .await?;

        let mut summaries = Vec::new();
        for response in responses {
            let parsed = format::parse_summaries(&response.content)?;
            debug!(items = parsed.len(), model = %response.model, "Parsed summary response");
            summaries.extend(parsed);
        }
        Ok(summaries)
    }
}

/// Uses the provider's token counter as the chunking budget oracle.
struct ProviderCounter<'a> {
    provider: &'a dyn Provider,
    model: &'a str,
}

#[async_trait]
impl AsyncTokenCounter for ProviderCounter<'_> {
    async fn count_tokens(&self, text: &str) -> Result<usize, ProviderError> {
        self.provider.count_tokens(self.model, text).await
    }
}
