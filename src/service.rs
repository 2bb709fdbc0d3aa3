//! Game lifecycle operations.
//!
//! [`GameService`] is the only place that combines the store with the move
//! engine. Every public method returns a [`ServiceError`] instead of panicking
//! and leaves stored state unchanged when it fails.

use crate::games::tictactoe::{
    Game, GameId, GameState, Move, MoveError, MoveOutcome, Seat, play,
};
use crate::store::{GameStore, InMemoryGameStore, StoreError, StoreErrorKind};
use derive_getters::Getters;
use derive_more::{Display, Error};
use tracing::{debug, info, instrument, warn};

/// Only 3x3 boards are supported.
pub const BOARD_DIMENSION: usize = 3;

/// Failure of a game lifecycle operation.
#[derive(Debug, Clone, Display, Error)]
pub enum ServiceError {
    /// Request body or parameters are malformed.
    #[display("{message}")]
    InvalidRequest {
        /// What was wrong.
        message: String,
    },
    /// No game with the id exists.
    #[display("No game exists with provided game_id {game_id}")]
    GameNotFound {
        /// Requested game id.
        game_id: GameId,
    },
    /// The game exists but no longer accepts changes.
    #[display("Failed to find an IN_PROGRESS game with game_id {game_id}, it is {state}")]
    GameNotInProgress {
        /// Requested game id.
        game_id: GameId,
        /// State the game is in.
        state: GameState,
    },
    /// The player index is not one of the game's two seats.
    #[display("Player with playerID {player} is not found")]
    PlayerNotFound {
        /// Requested player index.
        player: i64,
    },
    /// Another player is due to move.
    #[display("It is not player {player}'s turn")]
    NotYourTurn {
        /// Requested player index.
        player: i64,
    },
    /// The move engine refused the move.
    #[display("Failed to play the move, it is illegal. {source}")]
    IllegalMove {
        /// Engine error.
        source: MoveError,
    },
    /// Bad `start`/`until` window for listing moves.
    #[display("{message}")]
    InvalidRange {
        /// What was wrong.
        message: String,
    },
    /// Move number past the end of the move list.
    #[display("move_number {move_number} is out of range, the game has {total} moves")]
    MoveOutOfRange {
        /// Requested move number.
        move_number: usize,
        /// Number of recorded moves.
        total: usize,
    },
    /// The store failed or is inconsistent.
    #[display("Internal error: {source}")]
    Internal {
        /// Store error.
        source: StoreError,
    },
}

impl ServiceError {
    /// Creates an [`ServiceError::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    fn invalid_range(message: impl Into<String>) -> Self {
        Self::InvalidRange {
            message: message.into(),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match &err.kind {
            StoreErrorKind::NotFound { id } => Self::GameNotFound {
                game_id: id.clone(),
            },
            StoreErrorKind::Poisoned => Self::Internal { source: err },
        }
    }
}

impl From<MoveError> for ServiceError {
    fn from(source: MoveError) -> Self {
        Self::IllegalMove { source }
    }
}

/// Public view of a game: players, state, and winner.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameSummary {
    /// Player names in seat order.
    players: [String; 2],
    /// Lifecycle state.
    state: GameState,
    /// Winner's name; `None` while playing, after a quit, or on a draw.
    winner: Option<String>,
}

/// Acknowledgement of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MoveReceipt {
    /// Reference to the move, `{game_id}/moves/{move_number}`.
    move_ref: String,
    /// Position of the move in the game's move list.
    move_number: usize,
    /// Set when this move won the game.
    winner: Option<String>,
    /// State after the move.
    state: GameState,
}

/// Orchestrates game lifecycle operations over a [`GameStore`].
#[derive(Debug)]
pub struct GameService<S = InMemoryGameStore> {
    store: S,
}

impl GameService<InMemoryGameStore> {
    /// Creates a service backed by a fresh in-memory store.
    #[instrument]
    pub fn in_memory() -> Self {
        Self::new(InMemoryGameStore::new())
    }
}

impl Default for GameService<InMemoryGameStore> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<S: GameStore> GameService<S> {
    /// Creates a service over `store`.
    pub fn new(store: S) -> Self {
        info!("Creating game service");
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a game for exactly two players on a 3x3 board.
    ///
    /// # Errors
    ///
    /// [`ServiceError::InvalidRequest`] for a wrong player count, a blank
    /// player name, or any board other than 3x3.
    #[instrument(skip(self))]
    pub fn create_game(
        &self,
        players: Vec<String>,
        rows: usize,
        columns: usize,
    ) -> Result<GameId, ServiceError> {
        let players: [String; 2] = players.try_into().map_err(|given: Vec<String>| {
            ServiceError::invalid_request(format!(
                "A game needs exactly 2 players, {} given",
                given.len()
            ))
        })?;

        if players.iter().any(|name| name.trim().is_empty()) {
            return Err(ServiceError::invalid_request("Player names must not be blank"));
        }

        if rows != BOARD_DIMENSION || columns != BOARD_DIMENSION {
            return Err(ServiceError::invalid_request(format!(
                "Only {0}x{0} boards are supported, got {1}x{2}",
                BOARD_DIMENSION, rows, columns
            )));
        }

        let id = uuid::Uuid::new_v4().to_string();
        self.store.put(Game::new(id.clone(), players, rows, columns))?;

        info!(game_id = %id, "Created new game");
        Ok(id)
    }

    /// Returns the ids of all games still in progress.
    #[instrument(skip(self))]
    pub fn list_in_progress_game_ids(&self) -> Result<Vec<GameId>, ServiceError> {
        let ids: Vec<GameId> = self
            .store
            .list()?
            .into_iter()
            .filter(|game| *game.state() == GameState::InProgress)
            .map(|game| game.id().clone())
            .collect();

        debug!(count = ids.len(), "Listed in-progress games");
        Ok(ids)
    }

    /// Returns the full game record.
    #[instrument(skip(self))]
    pub fn get_game(&self, game_id: &str) -> Result<Game, ServiceError> {
        Ok(self.store.get(game_id)?)
    }

    /// Returns players, state, and winner of a game.
    #[instrument(skip(self))]
    pub fn get_game_summary(&self, game_id: &str) -> Result<GameSummary, ServiceError> {
        let game = self.store.get(game_id)?;
        Ok(GameSummary {
            players: game.players().clone(),
            state: *game.state(),
            winner: game.winner().clone(),
        })
    }

    /// Plays a move for the player at index `player`.
    ///
    /// Lookup, checks, engine call, and write-back happen under the game's
    /// lock, so two requests on the same game cannot interleave.
    ///
    /// # Errors
    ///
    /// In order of checking: [`ServiceError::GameNotFound`] /
    /// [`ServiceError::GameNotInProgress`], [`ServiceError::PlayerNotFound`],
    /// [`ServiceError::NotYourTurn`], [`ServiceError::IllegalMove`].
    #[instrument(skip(self))]
    pub fn apply_player_move(
        &self,
        game_id: &str,
        player: i64,
        row: usize,
        col: usize,
    ) -> Result<MoveReceipt, ServiceError> {
        self.store.modify(game_id, |game| -> Result<MoveReceipt, ServiceError> {
            if *game.state() != GameState::InProgress {
                warn!(state = %game.state(), "Move on a finished game");
                return Err(ServiceError::GameNotInProgress {
                    game_id: game_id.to_string(),
                    state: *game.state(),
                });
            }

            let seat = Seat::from_index(player).ok_or_else(|| {
                warn!(player, "Unknown player attempted move");
                ServiceError::PlayerNotFound { player }
            })?;

            if let Some(expected) = game.next_player()
                && *expected != seat
            {
                warn!(player, expected = %expected, "Player tried to move out of turn");
                return Err(ServiceError::NotYourTurn { player });
            }

            let played = play(game, row, col, seat).inspect_err(|e| {
                warn!(player, row, col, error = %e, "Invalid move");
            })?;

            let winner = match &played.outcome {
                MoveOutcome::Won(name) => Some(name.clone()),
                MoveOutcome::InProgress | MoveOutcome::Draw => None,
            };

            info!(
                player,
                row,
                col,
                move_number = played.index,
                state = %game.state(),
                "Move completed successfully"
            );

            Ok(MoveReceipt {
                move_ref: format!("{}/moves/{}", game_id, played.index),
                move_number: played.index,
                winner,
                state: *game.state(),
            })
        })
    }

    /// Returns the inclusive window `[start, until]` of a game's moves.
    ///
    /// `start` defaults to 0 and `until` to the last move; an `until` past
    /// the last move is clamped to it.
    ///
    /// # Errors
    ///
    /// [`ServiceError::InvalidRange`] when the game has no moves, when
    /// `start > until`, or when `start` is past the last move.
    #[instrument(skip(self))]
    pub fn list_moves(
        &self,
        game_id: &str,
        start: Option<usize>,
        until: Option<usize>,
    ) -> Result<Vec<Move>, ServiceError> {
        let game = self.store.get(game_id)?;
        let total = game.moves().len();
        if total == 0 {
            return Err(ServiceError::invalid_range("There are no moves for this game"));
        }

        let last = total - 1;
        let start = start.unwrap_or(0);
        let until = until.map_or(last, |until| until.min(last));

        let mut problems = Vec::new();
        if start > until {
            problems.push("'start' must be less than or equal to 'until'.".to_string());
        }
        if start >= total {
            problems.push(format!(
                "This game has a total of {total} moves, so start must be less than {total}."
            ));
        }
        if !problems.is_empty() {
            return Err(ServiceError::invalid_range(problems.join(" ")));
        }

        Ok(game.moves()[start..=until].to_vec())
    }

    /// Returns move number `move_number` (0-based).
    ///
    /// # Errors
    ///
    /// [`ServiceError::MoveOutOfRange`] when no such move was played.
    #[instrument(skip(self))]
    pub fn get_move(&self, game_id: &str, move_number: usize) -> Result<Move, ServiceError> {
        let game = self.store.get(game_id)?;
        game.moves()
            .get(move_number)
            .cloned()
            .ok_or(ServiceError::MoveOutOfRange {
                move_number,
                total: game.moves().len(),
            })
    }

    /// Marks a game as quit. No winner is recorded.
    ///
    /// Quitting an already quit game succeeds without changes.
    ///
    /// # Errors
    ///
    /// [`ServiceError::GameNotFound`] for unknown ids and
    /// [`ServiceError::GameNotInProgress`] for completed games.
    #[instrument(skip(self))]
    pub fn quit_game(&self, game_id: &str) -> Result<GameId, ServiceError> {
        self.store.modify(game_id, |game| match *game.state() {
            GameState::InProgress => {
                game.state = GameState::Quit;
                info!("Game quit");
                Ok(game_id.to_string())
            }
            GameState::Quit => {
                debug!("Game already quit");
                Ok(game_id.to_string())
            }
            GameState::Complete => Err(ServiceError::GameNotInProgress {
                game_id: game_id.to_string(),
                state: GameState::Complete,
            }),
        })
    }
}
