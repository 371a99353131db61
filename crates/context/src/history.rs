//! Meeting history rendering, the prompt-side view of a meeting.
//!
//! Turns a [`MeetingContext`] into per-agenda text blocks:
//!
//! ```text
//! 안건 1. Kickoff
//! KimA: Hello
//! Lee(진행자): Welcome
//! ```
//!
//! and packs those blocks into chunks under a topic header
//! (`회의 주제: {topic}\n`) that respect a token budget.
//!
//! # Determinism
//!
//! Rendering is a pure function of the context and options. Turns are never
//! reordered within an agenda item; agenda blocks follow [`AgendaOrder`].

use crate::names::{self, SpeakerLabels};
use crate::split;
use agendum_config::AppConfig;
use agendum_core::{
    AgendaMap, AgendaOrder, AsyncTokenCounter, ChatTurn, ChunkError, MeetingContext, TokenCounter,
};
use std::collections::HashMap;
use tracing::debug;

/// Prefix of the topic header line.
pub const TOPIC_PREFIX: &str = "회의 주제: ";
/// Prefix of an agenda block header line.
pub const AGENDA_PREFIX: &str = "안건 ";
/// Role marker appended to the host's label.
pub const HOST_MARKER: &str = "(진행자)";
/// Role marker appended to the AI participant's label.
pub const AI_MARKER: &str = "(YOU)";

/// Rendering options.
#[derive(Debug, Clone, Default)]
pub struct HistoryOptions {
    pub agenda_order: AgendaOrder,
    /// Identifier marker used to find the AI participant when the context
    /// does not name one.
    pub ai_marker: Option<String>,
}

impl HistoryOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            agenda_order: config.chunking.agenda_order,
            ai_marker: Some(config.bot_email_domain.clone()),
        }
    }
}

/// All rendered turns of one agenda item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaBlock {
    pub agenda_id: String,
    /// Header line followed by one line per turn, newline-joined
    pub text: String,
}

/// Renders and chunks one meeting's chat history.
#[derive(Debug, Clone)]
pub struct MeetingHistoryBuilder {
    topic: String,
    agendas: AgendaMap,
    host: String,
    ai_participant: Option<String>,
    labels: SpeakerLabels,
    chats: Vec<ChatTurn>,
    agenda_order: AgendaOrder,
}

impl MeetingHistoryBuilder {
    /// Build with default options (numeric agenda order, no AI detection).
    pub fn new(context: MeetingContext) -> Self {
        Self::with_options(context, &HistoryOptions::default())
    }

    pub fn with_options(context: MeetingContext, options: &HistoryOptions) -> Self {
        let ai_participant = context.ai_participant.clone().or_else(|| {
            options
                .ai_marker
                .as_deref()
                .and_then(|marker| context.detect_ai_participant(marker))
                .map(str::to_string)
        });
        let labels = names::resolve(&context.participants);

        debug!(
            participants = labels.len(),
            turns = context.chats.len(),
            ai = ?ai_participant,
            "Meeting history loaded"
        );

        Self {
            topic: context.topic,
            agendas: context.agendas,
            host: context.host,
            ai_participant,
            labels,
            chats: context.chats,
            agenda_order: options.agenda_order,
        }
    }

    /// The header repeated at the top of every chunk.
    pub fn topic_header(&self) -> String {
        format!("{}{}\n", TOPIC_PREFIX, self.topic)
    }

    pub fn labels(&self) -> &SpeakerLabels {
        &self.labels
    }

    pub fn ai_participant(&self) -> Option<&str> {
        self.ai_participant.as_deref()
    }

    /// Render one block per agenda item referenced by the chat log.
    ///
    /// Fails with [`ChunkError::UnknownSender`] if a turn's sender has no
    /// label.
    pub fn render_agenda_blocks(&self) -> Result<Vec<AgendaBlock>, ChunkError> {
        let mut groups: Vec<(&str, Vec<String>)> = Vec::new();
        let mut slot: HashMap<&str, usize> = HashMap::new();

        for turn in &self.chats {
            let agenda_id = turn.agenda_id.as_str();
            let i = *slot.entry(agenda_id).or_insert_with(|| {
                groups.push((agenda_id, vec![self.agenda_header(agenda_id)]));
                groups.len() - 1
            });
            groups[i].1.push(self.render_turn(turn)?);
        }

        if self.agenda_order == AgendaOrder::Numeric {
            // Stable: non-integer ids keep their first-seen order at the end.
            groups.sort_by_key(|(id, _)| match id.trim().parse::<i64>() {
                Ok(n) => (0, n),
                Err(_) => (1, 0),
            });
        }

        Ok(groups
            .into_iter()
            .map(|(agenda_id, lines)| AgendaBlock {
                agenda_id: agenda_id.to_string(),
                text: lines.join("\n"),
            })
            .collect())
    }

    /// Render the whole history, optionally split to fit a token budget.
    ///
    /// Without both a counter and a budget the result is a single chunk.
    /// Otherwise every chunk is `topic_header() + blocks.join("\n")` and
    /// counts at most `budget` tokens.
    pub fn build_chunks(
        &self,
        counter: Option<&dyn TokenCounter>,
        budget: Option<usize>,
    ) -> Result<Vec<String>, ChunkError> {
        let header = self.topic_header();
        let blocks = self.block_texts()?;

        let chunks = match (counter, budget) {
            (Some(counter), Some(budget)) => {
                split::split_within_budget(&header, &blocks, counter, budget)?
            }
            _ => vec![split::compose(&header, &blocks)],
        };

        debug!(blocks = blocks.len(), chunks = chunks.len(), ?budget, "History chunked");
        Ok(chunks)
    }

    /// Like [`build_chunks`](Self::build_chunks) with an async counter;
    /// both halves of each split are measured concurrently.
    pub async fn build_chunks_async(
        &self,
        counter: &dyn AsyncTokenCounter,
        budget: usize,
    ) -> Result<Vec<String>, ChunkError> {
        let header = self.topic_header();
        let blocks = self.block_texts()?;
        let chunks = split::split_within_budget_async(&header, &blocks, counter, budget).await?;

        debug!(blocks = blocks.len(), chunks = chunks.len(), budget, "History chunked");
        Ok(chunks)
    }

    /// The last block in render order, i.e. the last element of
    /// [`render_agenda_blocks`](Self::render_agenda_blocks). `None` for an
    /// empty history.
    pub fn last_agenda_block(&self) -> Result<Option<AgendaBlock>, ChunkError> {
        Ok(self.render_agenda_blocks()?.pop())
    }

    fn block_texts(&self) -> Result<Vec<String>, ChunkError> {
        Ok(self
            .render_agenda_blocks()?
            .into_iter()
            .map(|b| b.text)
            .collect())
    }

    fn agenda_header(&self, agenda_id: &str) -> String {
        format!("{}{}. {}", AGENDA_PREFIX, agenda_id, self.agendas.title(agenda_id))
    }

    fn render_turn(&self, turn: &ChatTurn) -> Result<String, ChunkError> {
        let sender = turn.sender_identifier.as_str();
        let label = self
            .labels
            .get(sender)
            .ok_or_else(|| ChunkError::UnknownSender {
                sender: sender.to_string(),
            })?;

        // Host wins if host and AI are misconfigured to the same identifier.
        let role = if sender == self.host {
            HOST_MARKER
        } else if self.ai_participant.as_deref() == Some(sender) {
            AI_MARKER
        } else {
            ""
        };

        Ok(format!("{}{}: {}", label, role, turn.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agendum_core::Participant;

    fn kickoff_context() -> MeetingContext {
        MeetingContext {
            topic: "Launch".into(),
            agendas: [("1", "Kickoff")].into_iter().collect(),
            host: "u3".into(),
            ai_participant: None,
            participants: vec![
                Participant::new("u1", "Kim"),
                Participant::new("u2", "Kim"),
                Participant::new("u3", "Lee"),
            ],
            chats: vec![
                ChatTurn::new("u1", "Hello", "1"),
                ChatTurn::new("u3", "Welcome", "1"),
            ],
        }
    }

    fn multi_agenda_context() -> MeetingContext {
        MeetingContext {
            topic: "Roadmap".into(),
            agendas: [("2", "Budget"), ("10", "Hiring"), ("1", "Intro")]
                .into_iter()
                .collect(),
            host: "h".into(),
            ai_participant: Some("bot@ai.com".into()),
            participants: vec![
                Participant::new("h", "Han"),
                Participant::new("p", "Park"),
                Participant::new("bot@ai.com", "ENTP"),
            ],
            chats: vec![
                ChatTurn::new("h", "Let's start with hiring", "10"),
                ChatTurn::new("p", "We need two engineers", "10"),
                ChatTurn::new("h", "Now budget", "2"),
                ChatTurn::new("bot@ai.com", "Budget looks tight", "2"),
                ChatTurn::new("p", "Quick intro first", "1"),
                ChatTurn::new("h", "Back to hiring", "10"),
            ],
        }
    }

    #[test]
    fn renders_kickoff_block() {
        let builder = MeetingHistoryBuilder::new(kickoff_context());
        let blocks = builder.render_agenda_blocks().unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].agenda_id, "1");
        assert_eq!(
            blocks[0].text,
            "안건 1. Kickoff\nKimA: Hello\nLee(진행자): Welcome"
        );
    }

    #[test]
    fn numeric_order_sorts_ids_as_integers() {
        let builder = MeetingHistoryBuilder::new(multi_agenda_context());
        let ids: Vec<_> = builder
            .render_agenda_blocks()
            .unwrap()
            .into_iter()
            .map(|b| b.agenda_id)
            .collect();
        assert_eq!(ids, ["1", "2", "10"]);
    }

    #[test]
    fn first_seen_order_follows_chat_log() {
        let options = HistoryOptions {
            agenda_order: AgendaOrder::FirstSeen,
            ai_marker: None,
        };
        let builder = MeetingHistoryBuilder::with_options(multi_agenda_context(), &options);
        let ids: Vec<_> = builder
            .render_agenda_blocks()
            .unwrap()
            .into_iter()
            .map(|b| b.agenda_id)
            .collect();
        assert_eq!(ids, ["10", "2", "1"]);
    }

    #[test]
    fn turns_keep_order_within_agenda() {
        let builder = MeetingHistoryBuilder::new(multi_agenda_context());
        let blocks = builder.render_agenda_blocks().unwrap();
        assert_eq!(
            blocks[2].text,
            "안건 10. Hiring\nHan(진행자): Let's start with hiring\nPark: We need two engineers\nHan(진행자): Back to hiring"
        );
    }

    #[test]
    fn non_integer_ids_sort_last_in_first_seen_order() {
        let mut ctx = kickoff_context();
        ctx.chats = vec![
            ChatTurn::new("u1", "a", "misc"),
            ChatTurn::new("u1", "b", "3"),
            ChatTurn::new("u1", "c", "extra"),
            ChatTurn::new("u1", "d", "1"),
        ];
        let builder = MeetingHistoryBuilder::new(ctx);
        let ids: Vec<_> = builder
            .render_agenda_blocks()
            .unwrap()
            .into_iter()
            .map(|b| b.agenda_id)
            .collect();
        assert_eq!(ids, ["1", "3", "misc", "extra"]);
    }

    #[test]
    fn ai_participant_marked() {
        let builder = MeetingHistoryBuilder::new(multi_agenda_context());
        let blocks = builder.render_agenda_blocks().unwrap();
        assert!(blocks[1].text.contains("ENTP(YOU): Budget looks tight"));
    }

    #[test]
    fn ai_participant_detected_from_marker() {
        let mut ctx = multi_agenda_context();
        ctx.ai_participant = None;

        let plain = MeetingHistoryBuilder::new(ctx.clone());
        assert_eq!(plain.ai_participant(), None);

        let options = HistoryOptions {
            ai_marker: Some("@ai.com".into()),
            ..Default::default()
        };
        let detected = MeetingHistoryBuilder::with_options(ctx, &options);
        assert_eq!(detected.ai_participant(), Some("bot@ai.com"));
    }

    #[test]
    fn host_marker_wins_over_ai_marker() {
        let mut ctx = kickoff_context();
        ctx.ai_participant = Some("u3".into());
        let builder = MeetingHistoryBuilder::new(ctx);
        let text = &builder.render_agenda_blocks().unwrap()[0].text;
        assert!(text.contains("Lee(진행자): Welcome"));
        assert!(!text.contains("(YOU)"));
    }

    #[test]
    fn unmapped_agenda_renders_empty_title() {
        let mut ctx = kickoff_context();
        ctx.chats.push(ChatTurn::new("u2", "Anything else?", "7"));
        let builder = MeetingHistoryBuilder::new(ctx);
        let blocks = builder.render_agenda_blocks().unwrap();
        assert_eq!(blocks[1].text, "안건 7. \nKimB: Anything else?");
    }

    #[test]
    fn unreferenced_agenda_items_produce_no_block() {
        let builder = MeetingHistoryBuilder::new(multi_agenda_context());
        let mut ctx = multi_agenda_context();
        ctx.agendas.insert("99", "Never discussed");
        let with_extra = MeetingHistoryBuilder::new(ctx);
        assert_eq!(
            builder.render_agenda_blocks().unwrap(),
            with_extra.render_agenda_blocks().unwrap()
        );
    }

    #[test]
    fn unknown_sender_is_an_error() {
        let mut ctx = kickoff_context();
        ctx.chats.push(ChatTurn::new("ghost", "boo", "1"));
        let builder = MeetingHistoryBuilder::new(ctx);
        let err = builder.render_agenda_blocks().unwrap_err();
        assert!(matches!(err, ChunkError::UnknownSender { ref sender } if sender == "ghost"));
        assert!(builder.build_chunks(None, None).is_err());
    }

    #[test]
    fn every_turn_rendered_exactly_once() {
        let ctx = multi_agenda_context();
        let builder = MeetingHistoryBuilder::new(ctx.clone());

        let mut rendered: Vec<String> = builder
            .render_agenda_blocks()
            .unwrap()
            .iter()
            .flat_map(|b| b.text.lines().skip(1).map(str::to_string).collect::<Vec<_>>())
            .collect();
        let mut expected: Vec<String> = ctx
            .chats
            .iter()
            .map(|t| builder.render_turn(t).unwrap())
            .collect();

        rendered.sort();
        expected.sort();
        assert_eq!(rendered, expected);
    }

    #[test]
    fn no_limit_returns_single_chunk() {
        let builder = MeetingHistoryBuilder::new(multi_agenda_context());
        let blocks: Vec<String> = builder
            .render_agenda_blocks()
            .unwrap()
            .into_iter()
            .map(|b| b.text)
            .collect();
        let expected = format!("회의 주제: Roadmap\n{}", blocks.join("\n"));

        assert_eq!(builder.build_chunks(None, None).unwrap(), vec![expected.clone()]);
        // Either half missing means "no limit".
        let tiny = |_: &str| usize::MAX;
        assert_eq!(builder.build_chunks(Some(&tiny), None).unwrap(), vec![expected.clone()]);
        assert_eq!(builder.build_chunks(None, Some(1)).unwrap(), vec![expected]);
    }

    #[test]
    fn budget_splits_between_agenda_blocks() {
        let builder = MeetingHistoryBuilder::new(multi_agenda_context());
        let header = builder.topic_header();
        let blocks = builder.render_agenda_blocks().unwrap();
        let widest = blocks
            .iter()
            .map(|b| (header.clone() + &b.text).chars().count())
            .max()
            .unwrap();

        let by_chars = |text: &str| text.chars().count();
        let chunks = builder.build_chunks(Some(&by_chars), Some(widest)).unwrap();

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.starts_with(&header));
            assert!(chunk.chars().count() <= widest);
        }
        let rejoined: Vec<String> = chunks
            .iter()
            .map(|c| c[header.len()..].to_string())
            .collect();
        let original: Vec<String> = blocks.into_iter().map(|b| b.text).collect();
        assert_eq!(rejoined.join("\n"), original.join("\n"));
    }

    #[test]
    fn zero_budget_is_a_real_budget() {
        let builder = MeetingHistoryBuilder::new(kickoff_context());
        let by_chars = |text: &str| text.chars().count();
        let err = builder.build_chunks(Some(&by_chars), Some(0)).unwrap_err();
        assert!(matches!(err, ChunkError::OverBudget { budget: 0, .. }));
    }

    #[tokio::test]
    async fn async_chunks_match_sync_chunks() {
        let builder = MeetingHistoryBuilder::new(multi_agenda_context());
        let budget = 40;
        let sync = builder
            .build_chunks(Some(&crate::token::CharEstimator), Some(budget))
            .unwrap();
        let concurrent = builder
            .build_chunks_async(&crate::token::CharEstimator, budget)
            .await
            .unwrap();
        assert_eq!(sync, concurrent);
    }

    #[test]
    fn last_agenda_block_is_last_rendered() {
        let builder = MeetingHistoryBuilder::new(multi_agenda_context());
        let last = builder.last_agenda_block().unwrap().unwrap();
        assert_eq!(last.agenda_id, "10");
        assert_eq!(last.text, builder.render_agenda_blocks().unwrap()[2].text);
    }

    #[test]
    fn last_agenda_block_ignores_which_agenda_was_spoken_last() {
        let ctx = MeetingContext {
            chats: vec![
                ChatTurn::new("h", "second item", "2"),
                ChatTurn::new("h", "back to first", "1"),
            ],
            ..multi_agenda_context()
        };
        let builder = MeetingHistoryBuilder::new(ctx);
        let blocks = builder.render_agenda_blocks().unwrap();

        let last = builder.last_agenda_block().unwrap().unwrap();
        assert_eq!(last.agenda_id, "2");
        assert_eq!(Some(&last), blocks.last());
        assert_eq!(last.text, "안건 2. Budget\nHan(진행자): second item");
    }

    #[test]
    fn last_agenda_block_follows_first_seen_order() {
        let ctx = MeetingContext {
            chats: vec![
                ChatTurn::new("h", "second item", "2"),
                ChatTurn::new("h", "back to first", "1"),
            ],
            ..multi_agenda_context()
        };
        let options = HistoryOptions {
            agenda_order: AgendaOrder::FirstSeen,
            ai_marker: None,
        };
        let builder = MeetingHistoryBuilder::with_options(ctx, &options);
        assert_eq!(builder.last_agenda_block().unwrap().unwrap().agenda_id, "1");
    }

    #[test]
    fn last_agenda_block_of_empty_history() {
        let mut ctx = kickoff_context();
        ctx.chats.clear();
        let builder = MeetingHistoryBuilder::new(ctx);
        assert_eq!(builder.last_agenda_block().unwrap(), None);
        assert_eq!(builder.build_chunks(None, None).unwrap(), vec!["회의 주제: Launch\n"]);
    }

    #[test]
    fn options_from_config() {
        let mut config = AppConfig::default();
        config.chunking.agenda_order = AgendaOrder::FirstSeen;
        let options = HistoryOptions::from_config(&config);
        assert_eq!(options.agenda_order, AgendaOrder::FirstSeen);
        assert_eq!(options.ai_marker.as_deref(), Some("@ai.com"));
    }
}
