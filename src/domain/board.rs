use crate::{
    domain::card::{Card, CardId, CardPatch, Label},
    domain::list::{normalize_list_title, List, ListId},
    error::{BoardError, Result},
};
use serde::{Deserialize, Serialize};

/// Full board state: the ordered lists, the archive, and the id counters
///
/// This is the shape that gets persisted; all mutation goes through
/// [`BoardStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    #[serde(default)]
    pub lists: Vec<List>,
    #[serde(default)]
    pub archived_cards: Vec<Card>,
    #[serde(default)]
    pub next_list_number: u32,
    #[serde(default)]
    pub next_card_number: u32,
}

impl Board {
    /// Generates the next list id
    pub fn next_list_id(&mut self) -> ListId {
        let id = ListId::new(self.next_list_number);
        self.next_list_number += 1;
        id
    }

    /// Generates the next card id
    pub fn next_card_id(&mut self) -> CardId {
        let id = CardId::new(self.next_card_number);
        self.next_card_number += 1;
        id
    }

    /// Looks up a list by id
    pub fn list(&self, list_id: &ListId) -> Option<&List> {
        self.lists.iter().find(|list| &list.id == list_id)
    }

    /// Returns the position of a list within the board
    pub fn list_index(&self, list_id: &ListId) -> Option<usize> {
        self.lists.iter().position(|list| &list.id == list_id)
    }

    /// Raises the id counters above every id currently present.
    ///
    /// Payloads written before the counters existed deserialize with both at
    /// zero; without this step a freshly created list or card would reuse an
    /// id already on the board.
    pub fn normalize_counters(&mut self) {
        let max_list = self
            .lists
            .iter()
            .filter_map(|list| list.id.number())
            .max()
            .unwrap_or(0);
        self.next_list_number = self.next_list_number.max(max_list + 1);

        let max_card = self
            .lists
            .iter()
            .flat_map(|list| list.cards.iter())
            .chain(self.archived_cards.iter())
            .filter_map(|card| card.id.number())
            .max()
            .unwrap_or(0);
        self.next_card_number = self.next_card_number.max(max_card + 1);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            lists: Vec::new(),
            archived_cards: Vec::new(),
            next_list_number: 1,
            next_card_number: 1,
        }
    }
}

/// The single writer of board state.
///
/// Owns the canonical in-memory [`Board`]; UI and persistence collaborators
/// hold a reference to the store, mutate through its operations, and re-read
/// [`BoardStore::snapshot`] afterwards.
///
/// # Examples
/// ```
/// use corkboard_core::{BoardStore, Label};
///
/// let mut store = BoardStore::new();
/// let todo = store.create_list("To Do");
/// let card = store.create_card(&todo, "Buy milk", "", Label::None).unwrap();
///
/// let board = store.snapshot();
/// assert_eq!(board.lists[0].cards[0].id, card);
/// ```
#[derive(Debug, Default)]
pub struct BoardStore {
    board: Board,
}

impl BoardStore {
    /// Creates a store over an empty board
    pub fn new() -> Self {
        Self {
            board: Board::default(),
        }
    }

    /// Creates a store over a previously loaded board
    pub fn from_board(mut board: Board) -> Self {
        board.normalize_counters();
        Self { board }
    }

    /// Read-only view of the current state, for rendering and persistence
    pub fn snapshot(&self) -> &Board {
        &self.board
    }

    /// Appends a new empty list to the end of the board
    pub fn create_list(&mut self, title: &str) -> ListId {
        let id = self.board.next_list_id();
        self.board.lists.push(List::new(id.clone(), title));
        id
    }

    /// Permanently removes a list and all its active cards.
    ///
    /// The cards do not move to the archive.
    pub fn delete_list(&mut self, list_id: &ListId) -> Result<()> {
        let index = self
            .board
            .list_index(list_id)
            .ok_or_else(|| BoardError::ListNotFound(list_id.to_string()))?;
        self.board.lists.remove(index);
        Ok(())
    }

    /// Replaces a list title; empty input reverts to the placeholder
    pub fn rename_list(&mut self, list_id: &ListId, title: &str) -> Result<()> {
        let index = self
            .board
            .list_index(list_id)
            .ok_or_else(|| BoardError::ListNotFound(list_id.to_string()))?;
        self.board.lists[index].title = normalize_list_title(title);
        Ok(())
    }

    /// Appends a new card to the given list
    pub fn create_card(
        &mut self,
        list_id: &ListId,
        title: &str,
        description: &str,
        label: Label,
    ) -> Result<CardId> {
        let index = self
            .board
            .list_index(list_id)
            .ok_or_else(|| BoardError::ListNotFound(list_id.to_string()))?;
        let id = self.board.next_card_id();
        self.board.lists[index]
            .cards
            .push(Card::new(id.clone(), title, description, label));
        Ok(id)
    }

    /// Applies a partial update to an active card.
    ///
    /// Fields are diffed individually; only genuinely changed fields gain a
    /// history entry.
    pub fn update_card(&mut self, card_id: &CardId, patch: CardPatch) -> Result<()> {
        let card = self
            .active_card_mut(card_id)
            .ok_or_else(|| BoardError::CardNotFound(card_id.to_string()))?;
        card.apply_patch(patch);
        Ok(())
    }

    /// Permanently removes a card from its list or from the archive.
    ///
    /// Idempotent: deleting an unknown id is a no-op.
    pub fn delete_card(&mut self, card_id: &CardId) {
        for list in &mut self.board.lists {
            if let Some(position) = list.card_position(card_id) {
                list.cards.remove(position);
                return;
            }
        }
        if let Some(position) = self
            .board
            .archived_cards
            .iter()
            .position(|card| &card.id == card_id)
        {
            self.board.archived_cards.remove(position);
        }
    }

    /// Moves an active card into the archive.
    ///
    /// Silent no-op when the card is not currently active.
    pub fn archive_card(&mut self, card_id: &CardId) {
        for list in &mut self.board.lists {
            if let Some(position) = list.card_position(card_id) {
                let mut card = list.cards.remove(position);
                card.mark_archived();
                self.board.archived_cards.push(card);
                return;
            }
        }
    }

    /// Moves an archived card back to the end of the target list.
    ///
    /// The original list is not remembered; the caller picks the target.
    pub fn restore_card(&mut self, card_id: &CardId, target_list_id: &ListId) -> Result<()> {
        let target_index = self
            .board
            .list_index(target_list_id)
            .ok_or_else(|| BoardError::ListNotFound(target_list_id.to_string()))?;
        let position = self
            .board
            .archived_cards
            .iter()
            .position(|card| &card.id == card_id)
            .ok_or_else(|| BoardError::CardNotFound(card_id.to_string()))?;

        let mut card = self.board.archived_cards.remove(position);
        let list = &mut self.board.lists[target_index];
        card.mark_restored(&list.title);
        list.cards.push(card);
        Ok(())
    }

    /// Repositions a list within the board.
    ///
    /// Rejected without touching state when `from_index` is out of range; the
    /// target index is clamped to the remaining length.
    pub fn move_list(&mut self, from_index: usize, to_index: usize) -> Result<()> {
        if from_index >= self.board.lists.len() {
            return Err(BoardError::ReorderRejected(format!(
                "list index {} out of range",
                from_index
            )));
        }
        let list = self.board.lists.remove(from_index);
        let to_index = to_index.min(self.board.lists.len());
        self.board.lists.insert(to_index, list);
        Ok(())
    }

    /// Relocates a card between (or within) lists.
    ///
    /// The card at `from_index` of the source list must carry `card_id`;
    /// stale events are rejected with the board untouched. The move never
    /// copies and never alters the card's fields or history.
    pub fn move_card(
        &mut self,
        card_id: &CardId,
        from_list_id: &ListId,
        from_index: usize,
        to_list_id: &ListId,
        to_index: usize,
    ) -> Result<()> {
        let from = self
            .board
            .list_index(from_list_id)
            .ok_or_else(|| BoardError::ListNotFound(from_list_id.to_string()))?;
        let to = self
            .board
            .list_index(to_list_id)
            .ok_or_else(|| BoardError::ListNotFound(to_list_id.to_string()))?;

        let source = &self.board.lists[from];
        match source.cards.get(from_index) {
            Some(card) if &card.id == card_id => {}
            Some(card) => {
                return Err(BoardError::ReorderRejected(format!(
                    "expected {} at index {}, found {}",
                    card_id, from_index, card.id
                )));
            }
            None => {
                return Err(BoardError::ReorderRejected(format!(
                    "card index {} out of range in {}",
                    from_index, from_list_id
                )));
            }
        }

        let card = self.board.lists[from].cards.remove(from_index);
        let target = &mut self.board.lists[to];
        let to_index = to_index.min(target.cards.len());
        target.cards.insert(to_index, card);
        Ok(())
    }

    /// Looks up an active card
    pub fn card(&self, card_id: &CardId) -> Option<&Card> {
        self.board
            .lists
            .iter()
            .flat_map(|list| list.cards.iter())
            .find(|card| &card.id == card_id)
    }

    /// Returns the owning list and position of an active card
    pub fn find_card(&self, card_id: &CardId) -> Option<(&ListId, usize)> {
        self.board.lists.iter().find_map(|list| {
            list.card_position(card_id)
                .map(|position| (&list.id, position))
        })
    }

    /// Cards currently in the archive, oldest first
    pub fn archived_cards(&self) -> &[Card] {
        &self.board.archived_cards
    }

    fn active_card_mut(&mut self, card_id: &CardId) -> Option<&mut Card> {
        self.board
            .lists
            .iter_mut()
            .flat_map(|list| list.cards.iter_mut())
            .find(|card| &card.id == card_id)
    }
}
