//! Keyed storage for game records.

mod error;
mod memory;

pub use error::{StoreError, StoreErrorKind};
pub use memory::InMemoryGameStore;

use crate::games::tictactoe::Game;

/// Storage for [`Game`] records keyed by game id.
///
/// Reads hand out copies; writes replace a whole record. Implementations
/// must be safe to share across request tasks.
pub trait GameStore: Send + Sync {
    /// Returns a copy of the game with `id`.
    ///
    /// # Errors
    ///
    /// [`StoreErrorKind::NotFound`] when no such game exists.
    fn get(&self, id: &str) -> Result<Game, StoreError>;

    /// Returns copies of every stored game, in no particular order.
    fn list(&self) -> Result<Vec<Game>, StoreError>;

    /// Inserts `game`, or replaces the record with the same id.
    fn put(&self, game: Game) -> Result<(), StoreError>;

    /// Replaces an existing record.
    ///
    /// # Errors
    ///
    /// [`StoreErrorKind::NotFound`] when no record with `game.id` exists.
    fn update(&self, game: Game) -> Result<(), StoreError>;

    /// Runs `f` on a working copy of one record while holding that record's
    /// lock, then stores the copy. When `f` fails the record is left as it was.
    ///
    /// # Errors
    ///
    /// Whatever `f` returns, or the store error converted into `E`.
    fn modify<T, E, F>(&self, id: &str, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Game) -> Result<T, E>,
        E: From<StoreError>;
}
