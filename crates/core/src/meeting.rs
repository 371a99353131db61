//! Meeting record types.
//!
//! These are the value objects handed to the history builder by whatever
//! loads a meeting: participants, the agenda table and the chat log.
//! They are built fresh per request and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A meeting participant.
///
/// Identifiers are unique within a meeting; display names may collide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Stable identifier (usually an e-mail address)
    #[serde(alias = "email", alias = "id")]
    pub identifier: String,

    /// Human-readable name, possibly shared with other participants
    #[serde(alias = "username", alias = "name")]
    pub display_name: String,
}

impl Participant {
    pub fn new(identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
        }
    }
}

/// One utterance in the meeting chat, scoped to an agenda item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Identifier of the participant who sent the message
    #[serde(alias = "email", alias = "sender")]
    pub sender_identifier: String,

    /// Message text, treated as opaque
    pub message: String,

    /// Agenda item the message belongs to
    pub agenda_id: String,
}

impl ChatTurn {
    pub fn new(
        sender_identifier: impl Into<String>,
        message: impl Into<String>,
        agenda_id: impl Into<String>,
    ) -> Self {
        Self {
            sender_identifier: sender_identifier.into(),
            message: message.into(),
            agenda_id: agenda_id.into(),
        }
    }
}

/// Agenda id → title table.
///
/// Lookup only. Keys iterate (and serialize) in string order, so `"10"`
/// comes before `"2"`; block order is decided by [`AgendaOrder`] over the
/// chat log, never by this map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgendaMap(BTreeMap<String, String>);

impl AgendaMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an agenda title.
    pub fn insert(&mut self, agenda_id: impl Into<String>, title: impl Into<String>) {
        self.0.insert(agenda_id.into(), title.into());
    }

    /// Title for an agenda id, or `""` when the id is not mapped.
    pub fn title(&self, agenda_id: &str) -> &str {
        self.0.get(agenda_id).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AgendaMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// How agenda blocks are ordered when rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgendaOrder {
    /// Ascending by integer agenda id ("2" before "10"). Ids that are not
    /// integers follow, in first-seen order.
    #[default]
    Numeric,
    /// Order in which each agenda id first appears in the chat log.
    FirstSeen,
}

impl std::str::FromStr for AgendaOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "numeric" => Ok(Self::Numeric),
            "first_seen" => Ok(Self::FirstSeen),
            other => Err(format!("unknown agenda order '{other}' (expected numeric or first-seen)")),
        }
    }
}

/// Everything needed to render one meeting's history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeetingContext {
    /// Meeting topic, rendered once per chunk as a header
    #[serde(default, alias = "content")]
    pub topic: String,

    /// Agenda titles
    #[serde(default)]
    pub agendas: AgendaMap,

    /// Identifier of the meeting host
    #[serde(default)]
    pub host: String,

    /// Identifier of the AI participant, when one takes part
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_participant: Option<String>,

    /// Participants in the order they were loaded
    #[serde(default)]
    pub participants: Vec<Participant>,

    /// Chat turns in chronological order
    #[serde(default, alias = "chat_logs")]
    pub chats: Vec<ChatTurn>,
}

impl MeetingContext {
    /// Find the AI participant by an identifier marker such as `"@ai.com"`.
    ///
    /// Returns the first participant whose identifier contains `marker`.
    pub fn detect_ai_participant(&self, marker: &str) -> Option<&str> {
        if marker.is_empty() {
            return None;
        }
        self.participants
            .iter()
            .find(|p| p.identifier.contains(marker))
            .map(|p| p.identifier.as_str())
    }
}
