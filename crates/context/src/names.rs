//! Speaker name resolution.
//!
//! Participants may share a display name. Each homonym gets a letter
//! suffix (`KimA`, `KimB`, …) in the order the participants were given, so
//! every speaker label in a rendered history is unique.

use agendum_core::Participant;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Identifier → display label mapping, in participant order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeakerLabels {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl SpeakerLabels {
    /// Label for a participant identifier.
    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.index
            .get(identifier)
            .map(|&i| self.entries[i].1.as_str())
    }

    /// `(identifier, label)` pairs in participant order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(id, label)| (id.as_str(), label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, identifier: String, label: String) {
        self.index.insert(identifier.clone(), self.entries.len());
        self.entries.push((identifier, label));
    }
}

/// Resolve display labels for a participant list.
///
/// - A name that occurs once keeps its display name.
/// - A name that occurs N>1 times gets `'A'`, `'B'`, … appended in
///   first-seen order.
/// - A suffixed label that would equal another participant's label is
///   skipped in favour of the next letter.
/// - A repeated identifier keeps its first position but takes the display
///   name of its last entry.
///
/// Past 26 homonyms the suffix continues through the characters after `'Z'`.
pub fn resolve(participants: &[Participant]) -> SpeakerLabels {
    // (identifier, display name) in first-seen identifier order; a repeated
    // identifier keeps its position and takes the later display name.
    let mut unique: Vec<(&str, &str)> = Vec::with_capacity(participants.len());
    let mut position: HashMap<&str, usize> = HashMap::new();
    for p in participants {
        let (id, name) = (p.identifier.as_str(), p.display_name.as_str());
        match position.get(id) {
            Some(&i) => {
                warn!(
                    identifier = %id,
                    display_name = %name,
                    "Duplicate participant identifier, later name wins"
                );
                unique[i].1 = name;
            }
            None => {
                position.insert(id, unique.len());
                unique.push((id, name));
            }
        }
    }

    let mut name_counts: HashMap<&str, usize> = HashMap::new();
    for &(_, name) in &unique {
        *name_counts.entry(name).or_default() += 1;
    }

    // Names that stay as-is are reserved up front so no suffixed label can
    // take them, wherever they appear in the list.
    let mut taken: HashSet<String> = name_counts
        .iter()
        .filter(|&(_, &count)| count == 1)
        .map(|(&name, _)| name.to_string())
        .collect();

    let mut next_letter: HashMap<&str, u32> = HashMap::new();
    let mut labels = SpeakerLabels::default();

    for (identifier, name) in unique {
        let label = if name_counts[name] > 1 {
            let next = next_letter.entry(name).or_insert(0);
            loop {
                let candidate = format!("{}{}", name, suffix_letter(*next));
                *next += 1;
                if !taken.contains(&candidate) {
                    break candidate;
                }
            }
        } else {
            name.to_string()
        };
        taken.insert(label.clone());
        labels.push(identifier.to_string(), label);
    }

    labels
}

fn suffix_letter(index: u32) -> char {
    char::from_u32(u32::from(b'A') + index).unwrap_or(char::REPLACEMENT_CHARACTER)
}
