//! In-memory game store with one lock per game.

use super::{GameStore, StoreError};
use crate::games::tictactoe::{Game, GameId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

type Record = Arc<Mutex<Game>>;

/// Process-lifetime game table.
///
/// The table lock only guards membership. Each game sits behind its own
/// mutex, so requests on different games do not wait on each other and
/// [`GameStore::modify`] can hold a single game for a whole read-modify-write.
#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    games: RwLock<HashMap<GameId, Record>>,
}

impl InMemoryGameStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory game store");
        Self::default()
    }

    /// Number of stored games.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.table()?.len())
    }

    /// Returns `true` when no game has been stored yet.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.table()?.is_empty())
    }

    fn table(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<GameId, Record>>, StoreError> {
        self.games.read().map_err(|_| StoreError::poisoned("games table"))
    }

    fn record(&self, id: &str) -> Result<Record, StoreError> {
        let record = self.table()?.get(id).cloned();
        record.ok_or_else(|| {
            debug!(game_id = id, "Game not found");
            StoreError::not_found(id)
        })
    }
}

fn lock_game(record: &Record) -> Result<std::sync::MutexGuard<'_, Game>, StoreError> {
    record.lock().map_err(|_| StoreError::poisoned("game record"))
}

impl GameStore for InMemoryGameStore {
    #[instrument(skip(self))]
    fn get(&self, id: &str) -> Result<Game, StoreError> {
        let record = self.record(id)?;
        let game = lock_game(&record)?.clone();
        Ok(game)
    }

    #[instrument(skip(self))]
    fn list(&self) -> Result<Vec<Game>, StoreError> {
        let records: Vec<Record> = self.table()?.values().cloned().collect();
        let games = records
            .iter()
            .map(|record| lock_game(record).map(|game| game.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = games.len(), "Listed games");
        Ok(games)
    }

    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    fn put(&self, game: Game) -> Result<(), StoreError> {
        let mut table = self
            .games
            .write()
            .map_err(|_| StoreError::poisoned("games table"))?;

        match table.get(game.id()) {
            Some(record) => {
                *lock_game(record)? = game;
                debug!("Game replaced");
            }
            None => {
                table.insert(game.id().clone(), Arc::new(Mutex::new(game)));
                debug!("Game inserted");
            }
        }
        Ok(())
    }

    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    fn update(&self, game: Game) -> Result<(), StoreError> {
        let record = self.record(game.id()).inspect_err(|_| {
            warn!("Update for a game that was never stored");
        })?;
        *lock_game(&record)? = game;
        debug!("Game updated");
        Ok(())
    }

    #[instrument(skip(self, f))]
    fn modify<T, E, F>(&self, id: &str, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Game) -> Result<T, E>,
        E: From<StoreError>,
    {
        let record = self.record(id)?;
        let mut stored = lock_game(&record)?;

        let mut working = stored.clone();
        let value = f(&mut working)?;
        *stored = working;

        debug!("Game modified");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::GameState;
    use crate::store::StoreErrorKind;

    fn game(id: &str) -> Game {
        Game::new(id.into(), ["p1".into(), "p2".into()], 3, 3)
    }

    #[test]
    fn test_get_missing_game() {
        let store = InMemoryGameStore::new();
        let err = store.get("nope").unwrap_err();
        assert_eq!(err.kind, StoreErrorKind::NotFound { id: "nope".into() });
    }

    #[test]
    fn test_put_then_get() {
        let store = InMemoryGameStore::new();
        store.put(game("a")).unwrap();
        assert_eq!(store.get("a").unwrap(), game("a"));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_put_replaces_whole_record() {
        let store = InMemoryGameStore::new();
        store.put(game("a")).unwrap();

        let mut replacement = game("a");
        replacement.state = GameState::Quit;
        store.put(replacement.clone()).unwrap();

        assert_eq!(store.get("a").unwrap(), replacement);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_update_requires_existing_record() {
        let store = InMemoryGameStore::new();
        let err = store.update(game("ghost")).unwrap_err();
        assert!(matches!(err.kind, StoreErrorKind::NotFound { .. }));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_list_returns_all_games() {
        let store = InMemoryGameStore::new();
        store.put(game("a")).unwrap();
        store.put(game("b")).unwrap();
        let mut ids: Vec<_> = store.list().unwrap().into_iter().map(|g| g.id).collect();
        ids.sort();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_failed_modify_keeps_record() {
        let store = InMemoryGameStore::new();
        store.put(game("a")).unwrap();

        let result: Result<(), StoreError> = store.modify("a", |g| {
            g.state = GameState::Quit;
            Err(StoreError::poisoned("test"))
        });

        assert!(result.is_err());
        assert_eq!(*store.get("a").unwrap().state(), GameState::InProgress);
    }

    #[test]
    fn test_modify_missing_game() {
        let store = InMemoryGameStore::new();
        let result: Result<(), StoreError> = store.modify("nope", |_| Ok(()));
        assert!(matches!(
            result.unwrap_err().kind,
            StoreErrorKind::NotFound { .. }
        ));
    }
}
