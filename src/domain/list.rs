use crate::domain::card::{Card, CardId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder used when a list title is empty after trimming
pub const DEFAULT_LIST_TITLE: &str = "Untitled List";

/// Unique identifier for a list (e.g., LST1, LST2)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListId(String);

impl ListId {
    const PREFIX: &'static str = "LST";

    /// Creates a new ListId from a counter
    pub fn new(counter: u32) -> Self {
        Self(format!("{}{}", Self::PREFIX, counter))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the numeric part of the id, if it parses
    pub(crate) fn number(&self) -> Option<u32> {
        self.0.strip_prefix(Self::PREFIX)?.parse().ok()
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, ordered container of cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: ListId,
    pub title: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl List {
    /// Creates a new empty list
    pub fn new(id: ListId, title: &str) -> Self {
        Self {
            id,
            title: normalize_list_title(title),
            cards: Vec::new(),
        }
    }

    /// Returns the position of a card within this list
    pub fn card_position(&self, card_id: &CardId) -> Option<usize> {
        self.cards.iter().position(|card| &card.id == card_id)
    }
}

/// Trims the title, substituting the placeholder when nothing is left
pub(crate) fn normalize_list_title(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_LIST_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::Label;

    #[test]
    fn test_list_id_creation() {
        let id = ListId::new(1);
        assert_eq!(id.as_str(), "LST1");
        assert_eq!(id.number(), Some(1));
    }

    #[test]
    fn test_list_title_placeholder() {
        let list = List::new(ListId::new(1), "");
        assert_eq!(list.title, DEFAULT_LIST_TITLE);

        let list = List::new(ListId::new(2), "  To Do  ");
        assert_eq!(list.title, "To Do");
    }

    #[test]
    fn test_card_position() {
        let mut list = List::new(ListId::new(1), "To Do");
        list.cards
            .push(Card::new(CardId::new(1), "First", "", Label::None));
        list.cards
            .push(Card::new(CardId::new(2), "Second", "", Label::None));

        assert_eq!(list.card_position(&CardId::new(1)), Some(0));
        assert_eq!(list.card_position(&CardId::new(2)), Some(1));
        assert_eq!(list.card_position(&CardId::new(3)), None);
    }
}
