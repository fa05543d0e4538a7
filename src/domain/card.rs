use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder used when a card title is empty after trimming
pub const DEFAULT_CARD_TITLE: &str = "Untitled Card";

/// Unique identifier for a card (e.g., CRD1, CRD2, CRD100)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(String);

impl CardId {
    const PREFIX: &'static str = "CRD";

    /// Creates a new CardId from a counter
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

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Color label attached to a card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    #[default]
    None,
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Red => write!(f, "red"),
            Self::Green => write!(f, "green"),
            Self::Blue => write!(f, "blue"),
            Self::Yellow => write!(f, "yellow"),
            Self::Purple => write!(f, "purple"),
        }
    }
}

/// Partial update to a card; unset fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub label: Option<Label>,
}

/// A kanban card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub label: Label,
    #[serde(default)]
    pub archived: bool,
    /// Append-only audit trail; shrinks only when the card itself is deleted
    #[serde(default)]
    pub history: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Creates a new card with a one-entry history
    pub fn new(id: CardId, title: &str, description: &str, label: Label) -> Self {
        let title = normalize_card_title(title);
        let now = Utc::now();
        Self {
            id,
            history: vec![format!("Created \"{}\"", title)],
            title,
            description: description.to_string(),
            label,
            archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update, recording one history entry per field that
    /// genuinely changed. Returns whether anything changed.
    pub fn apply_patch(&mut self, patch: CardPatch) -> bool {
        let mut changed = false;

        if let Some(raw) = patch.title {
            let title = normalize_card_title(&raw);
            if title != self.title {
                self.history
                    .push(format!("Title updated: \"{}\" -> \"{}\"", self.title, title));
                self.title = title;
                changed = true;
            }
        }

        if let Some(description) = patch.description {
            if description != self.description {
                self.history.push(format!(
                    "Description updated: \"{}\" -> \"{}\"",
                    self.description, description
                ));
                self.description = description;
                changed = true;
            }
        }

        if let Some(label) = patch.label {
            if label != self.label {
                self.history
                    .push(format!("Label updated: {} -> {}", self.label, label));
                self.label = label;
                changed = true;
            }
        }

        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }

    pub(crate) fn mark_archived(&mut self) {
        self.archived = true;
        self.history.push("Archived".to_string());
        self.updated_at = Utc::now();
    }

    pub(crate) fn mark_restored(&mut self, list_title: &str) {
        self.archived = false;
        self.history.push(format!("Restored to \"{}\"", list_title));
        self.updated_at = Utc::now();
    }
}

/// Trims the title, substituting the placeholder when nothing is left
pub(crate) fn normalize_card_title(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_CARD_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}
