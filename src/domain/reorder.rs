use crate::{
    domain::board::BoardStore,
    domain::list::ListId,
    error::{BoardError, Result},
};

/// The sequence an entity was dragged out of or dropped into: the board
/// itself (for list moves) or a specific list (for card moves)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Container {
    Board,
    List(ListId),
}

/// A completed drop reported by the drag-and-drop collaborator.
///
/// Indices are positions in the source and target sequences at the time the
/// drop committed. The collaborator never reports overlapping events, so one
/// event is reconciled to completion before the next arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderEvent {
    pub source: Container,
    pub source_index: usize,
    pub target: Container,
    pub target_index: usize,
}

impl BoardStore {
    /// Reconciles a drop event into a list or card move.
    ///
    /// Both containers must be the board (list move) or both lists (card
    /// move). Unresolvable containers, stale indices, and mixed pairs are
    /// rejected with the board untouched; a successful move is atomic as
    /// observed by any subsequent read.
    pub fn apply_reorder(&mut self, event: &ReorderEvent) -> Result<()> {
        match (&event.source, &event.target) {
            (Container::Board, Container::Board) => {
                self.move_list(event.source_index, event.target_index)
            }
            (Container::List(from), Container::List(to)) => {
                let card_id = self
                    .snapshot()
                    .list(from)
                    .ok_or_else(|| BoardError::ListNotFound(from.to_string()))?
                    .cards
                    .get(event.source_index)
                    .map(|card| card.id.clone())
                    .ok_or_else(|| {
                        BoardError::ReorderRejected(format!(
                            "card index {} out of range in {}",
                            event.source_index, from
                        ))
                    })?;
                self.move_card(
                    &card_id,
                    from,
                    event.source_index,
                    to,
                    event.target_index,
                )
            }
            _ => Err(BoardError::ReorderRejected(
                "source and target containers are of different kinds".to_string(),
            )),
        }
    }
}
