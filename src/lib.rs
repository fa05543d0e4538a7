//! # Corkboard Core
//!
//! Core board state, persistence, and reorder logic for Corkboard kanban
//! boards.
//!
//! This crate owns the canonical in-memory model of a board (ordered lists
//! of cards, a card archive, per-card audit history), persists it as a
//! single JSON payload through a pluggable storage backend, and reconciles
//! externally-reported drag-and-drop events into atomic moves, without any
//! dependency on specific UI implementations.

pub mod domain;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use domain::{
    board::{Board, BoardStore},
    card::{Card, CardId, CardPatch, Label},
    list::{List, ListId},
    reorder::{Container, ReorderEvent},
};
pub use error::{BoardError, Result};
pub use storage::{BoardPersistence, StorageBackend};
