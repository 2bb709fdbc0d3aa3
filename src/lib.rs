//! Tic-tac-toe HTTP backend library
//!
//! Two players create a game, take turns placing marks on a 3x3 board, and
//! query the game and its move history over HTTP.
//!
//! # Architecture
//!
//! - **Games**: board model and pure move engine (apply, win and draw detection)
//! - **Store**: in-memory game table with one lock per game
//! - **Service**: lifecycle operations combining store and engine
//! - **Server**: axum routes, request validation, response envelope
//!
//! # Example
//!
//! ```
//! use tictactoe_api::{GameService, GameState};
//!
//! # fn main() -> Result<(), tictactoe_api::ServiceError> {
//! let service = GameService::in_memory();
//! let id = service.create_game(vec!["p1".into(), "p2".into()], 3, 3)?;
//!
//! service.apply_player_move(&id, 0, 1, 1)?;
//! assert_eq!(*service.get_game_summary(&id)?.state(), GameState::InProgress);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod server;
mod service;
mod store;

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, Game, GameId, GameState, Move, MoveError, MoveOutcome, MoveType, PlayedMove, Seat,
    Square, advance_turn, apply_move, detect_winner, is_draw, play,
};

// Crate-level exports - Storage
pub use store::{GameStore, InMemoryGameStore, StoreError, StoreErrorKind};

// Crate-level exports - Service
pub use service::{BOARD_DIMENSION, GameService, GameSummary, MoveReceipt, ServiceError};

// Crate-level exports - HTTP server
pub use server::{
    ApiError, ApiResult, App, AppState, Coordinates, CreateGameRequest, Envelope, MoveRequest,
    MovesQuery, NewGame, app, router, serve,
};

// Crate-level exports - Configuration
pub use config::{ConfigError, HOST_ENV, PORT_ENV, ServerConfig};
