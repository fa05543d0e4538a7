use crate::{domain::Board, error::Result};
use async_trait::async_trait;
use tracing::{debug, warn};

pub mod file_storage;
pub mod memory_storage;

/// Fixed key the board payload is stored under
pub const BOARD_KEY: &str = "board";

/// Key-value backend for persisting board state.
///
/// Backends may be unavailable; failures surface as [`crate::BoardError`]
/// values and the in-memory session continues.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Reads the value stored under a key, if any
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value under a key
    async fn set(&self, key: &str, value: String) -> Result<()>;
}

/// Serializes the board to and from a [`StorageBackend`].
///
/// The whole board (lists in order, each with its cards in order, the
/// archive, the history, and the id counters) travels as one self-describing
/// JSON document under [`BOARD_KEY`].
pub struct BoardPersistence<S: StorageBackend> {
    backend: S,
}

impl<S: StorageBackend> BoardPersistence<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Writes the current board state.
    ///
    /// Serialization and backend failures are reported to the caller, never
    /// swallowed.
    pub async fn save(&self, board: &Board) -> Result<()> {
        let json = serde_json::to_string_pretty(board)?;
        self.backend.set(BOARD_KEY, json).await?;
        debug!(
            lists = board.lists.len(),
            archived = board.archived_cards.len(),
            "board saved"
        );
        Ok(())
    }

    /// Reads the board state.
    ///
    /// A missing key yields an empty board; a payload that does not
    /// deserialize is discarded as corrupt and also yields an empty board.
    /// Only a backend read failure is an error.
    pub async fn load(&self) -> Result<Board> {
        let payload = match self.backend.get(BOARD_KEY).await? {
            Some(payload) => payload,
            None => return Ok(Board::default()),
        };

        match serde_json::from_str::<Board>(&payload) {
            Ok(mut board) => {
                board.normalize_counters();
                Ok(board)
            }
            Err(err) => {
                warn!(%err, "discarding corrupt board payload");
                Ok(Board::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory_storage::MemoryStorage;
    use super::*;
    use crate::domain::{BoardStore, CardPatch, Label};
    use crate::error::BoardError;

    /// Backend that always fails, standing in for an unavailable store
    struct FailingStorage;

    #[async_trait]
    impl StorageBackend for FailingStorage {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(BoardError::Storage("backend unavailable".to_string()))
        }

        async fn set(&self, _key: &str, _value: String) -> Result<()> {
            Err(BoardError::Storage("backend unavailable".to_string()))
        }
    }

    fn populated_store() -> BoardStore {
        let mut store = BoardStore::new();
        let todo = store.create_list("To Do");
        let done = store.create_list("Done");
        let card = store
            .create_card(&todo, "Buy milk", "2% milk", Label::Green)
            .unwrap();
        store
            .create_card(&done, "Walk dog", "", Label::None)
            .unwrap();
        store
            .update_card(
                &card,
                CardPatch {
                    label: Some(Label::Red),
                    ..Default::default()
                },
            )
            .unwrap();
        let archived = store.create_card(&todo, "Old chore", "", Label::None).unwrap();
        store.archive_card(&archived);
        store
    }

    #[tokio::test]
    async fn test_load_missing_key_returns_empty_board() {
        let persistence = BoardPersistence::new(MemoryStorage::new());
        let board = persistence.load().await.unwrap();
        assert!(board.lists.is_empty());
        assert!(board.archived_cards.is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_empty_board() {
        let persistence = BoardPersistence::new(MemoryStorage::new());
        let board = Board::default();

        persistence.save(&board).await.unwrap();
        let loaded = persistence.load().await.unwrap();
        assert_eq!(loaded, board);
    }

    #[tokio::test]
    async fn test_round_trip_single_empty_list() {
        let persistence = BoardPersistence::new(MemoryStorage::new());
        let mut store = BoardStore::new();
        store.create_list("To Do");

        persistence.save(store.snapshot()).await.unwrap();
        let loaded = persistence.load().await.unwrap();
        assert_eq!(&loaded, store.snapshot());
    }

    #[tokio::test]
    async fn test_round_trip_populated_board() {
        let persistence = BoardPersistence::new(MemoryStorage::new());
        let store = populated_store();

        persistence.save(store.snapshot()).await.unwrap();
        let loaded = persistence.load().await.unwrap();

        // Structural equality: lists, cards, order, history, archive
        assert_eq!(&loaded, store.snapshot());
    }

    #[tokio::test]
    async fn test_load_malformed_payload_returns_empty_board() {
        let backend = MemoryStorage::new();
        backend
            .set(BOARD_KEY, r#"{"lists": "not-an-array"}"#.to_string())
            .await
            .unwrap();

        let persistence = BoardPersistence::new(backend);
        let board = persistence.load().await.unwrap();
        assert!(board.lists.is_empty());
    }

    #[tokio::test]
    async fn test_load_garbage_payload_returns_empty_board() {
        let backend = MemoryStorage::new();
        backend
            .set(BOARD_KEY, "{{{ not json".to_string())
            .await
            .unwrap();

        let persistence = BoardPersistence::new(backend);
        let board = persistence.load().await.unwrap();
        assert!(board.lists.is_empty());
    }

    #[tokio::test]
    async fn test_load_legacy_payload_normalizes_counters() {
        let backend = MemoryStorage::new();
        let legacy = r#"{
            "lists": [
                { "id": "LST3", "title": "To Do",
                  "cards": [ { "id": "CRD5", "title": "Buy milk" } ] }
            ],
            "archivedCards": []
        }"#;
        backend.set(BOARD_KEY, legacy.to_string()).await.unwrap();

        let persistence = BoardPersistence::new(backend);
        let board = persistence.load().await.unwrap();

        let mut store = BoardStore::from_board(board);
        let list = store.create_list("New");
        let card = store.create_card(&list, "New card", "", Label::None).unwrap();
        assert_eq!(list.as_str(), "LST4");
        assert_eq!(card.as_str(), "CRD6");
    }

    #[tokio::test]
    async fn test_backend_failure_surfaces_storage_error() {
        let persistence = BoardPersistence::new(FailingStorage);

        let save_result = persistence.save(&Board::default()).await;
        assert!(matches!(save_result, Err(BoardError::Storage(_))));

        let load_result = persistence.load().await;
        assert!(matches!(load_result, Err(BoardError::Storage(_))));
    }

    #[tokio::test]
    async fn test_session_continues_after_backend_failure() {
        let persistence = BoardPersistence::new(FailingStorage);
        let mut store = populated_store();

        assert!(persistence.save(store.snapshot()).await.is_err());

        // The in-memory board is still fully usable
        let list = store.create_list("Later");
        store.create_card(&list, "Still works", "", Label::None).unwrap();
        assert_eq!(store.snapshot().lists.len(), 3);
    }
}
