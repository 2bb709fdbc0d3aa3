//! Tic-tac-toe board model and move engine.

mod rules;
mod types;

pub use rules::{
    MoveError, MoveOutcome, PlayedMove, advance_turn, apply_move, detect_winner, is_draw, play,
};
pub use types::{Board, Game, GameId, GameState, Move, MoveType, Seat, Square};
