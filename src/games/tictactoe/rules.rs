//! Move application and game resolution.
//!
//! Everything here is pure: functions take a [`Game`] value, mutate it in
//! place on success, and leave it untouched on error.

mod draw;
mod win;

pub use draw::is_draw;
pub use win::detect_winner;

use super::types::{Game, GameState, Move, MoveType, Seat, Square};
use derive_more::{Display, Error};
use tracing::{debug, instrument};

/// Why a move was refused.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Row or column lies outside the board.
    #[display("row {row} and column {col} must both be within [0-{max}]")]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Largest valid coordinate.
        max: usize,
    },
    /// Target square already holds a mark.
    #[display("move with row {row} and col {col} is already taken")]
    CellOccupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
    /// The game is complete or was quit.
    #[display("game is {state}, no further moves are accepted")]
    GameOver {
        /// State the game is in.
        state: GameState,
    },
}

/// How a game stands after an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Play continues.
    InProgress,
    /// The named player completed a line.
    Won(String),
    /// Board filled without a winner.
    Draw,
}

/// Result of [`play`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    /// Position of the move in the game's move list.
    pub index: usize,
    /// Resolution after the move.
    pub outcome: MoveOutcome,
}

/// Places `seat`'s mark and records the move. Returns the move's index.
///
/// # Errors
///
/// [`MoveError::OutOfRange`] when either coordinate is off the board,
/// [`MoveError::CellOccupied`] when the square is taken.
#[instrument(skip(game), fields(game_id = %game.id))]
pub fn apply_move(game: &mut Game, row: usize, col: usize, seat: Seat) -> Result<usize, MoveError> {
    let square = game.board.get(row, col).ok_or(MoveError::OutOfRange {
        row,
        col,
        max: game.rows.min(game.columns).saturating_sub(1),
    })?;

    if square != Square::Empty {
        return Err(MoveError::CellOccupied { row, col });
    }

    game.board.claim(row, col, seat);
    let player = game.player_name(seat).to_string();
    game.moves.push(Move::new(MoveType::Move, player, row, col));

    Ok(game.moves.len() - 1)
}

/// Hands the turn to the opponent of the seat that just moved.
///
/// Either seat may open a game; after that turns strictly alternate.
#[instrument(skip(game), fields(game_id = %game.id))]
pub fn advance_turn(game: &mut Game, moved: Seat) {
    game.next_player = Some(moved.opponent());
}

/// Applies a move, advances the turn, and resolves win or draw.
///
/// # Errors
///
/// [`MoveError::GameOver`] when the game is not in progress, otherwise
/// whatever [`apply_move`] reports. The game is unchanged on error.
#[instrument(skip(game), fields(game_id = %game.id))]
pub fn play(game: &mut Game, row: usize, col: usize, seat: Seat) -> Result<PlayedMove, MoveError> {
    if game.state != GameState::InProgress {
        return Err(MoveError::GameOver { state: game.state });
    }

    let index = apply_move(game, row, col, seat)?;
    advance_turn(game, seat);

    let outcome = if detect_winner(&game.board, row, col, seat) {
        let name = game.player_name(seat).to_string();
        game.state = GameState::Complete;
        game.winner = Some(name.clone());
        MoveOutcome::Won(name)
    } else if is_draw(game) {
        game.state = GameState::Complete;
        MoveOutcome::Draw
    } else {
        MoveOutcome::InProgress
    };

    debug!(index, ?outcome, board = %game.board.display(), "Move played");
    Ok(PlayedMove { index, outcome })
}
