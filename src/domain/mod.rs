pub mod board;
pub mod card;
pub mod list;
pub mod reorder;

pub use board::{Board, BoardStore};
pub use card::{Card, CardId, CardPatch, Label};
pub use list::{List, ListId};
pub use reorder::{Container, ReorderEvent};
