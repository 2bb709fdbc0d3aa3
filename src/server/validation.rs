//! Request bodies and explicit field checks performed before the service runs.
//!
//! Every check yields [`ServiceError::InvalidRequest`] with one sentence per
//! failed field, so a client sees all problems at once.

use crate::service::{BOARD_DIMENSION, ServiceError};
use serde::Deserialize;
use tracing::{debug, instrument};

/// Body of `POST /tictactoe`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateGameRequest {
    /// Player names.
    pub players: Option<Vec<String>>,
    /// Board width.
    pub columns: Option<i64>,
    /// Board height.
    pub rows: Option<i64>,
}

/// A create request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    /// Exactly two player names.
    pub players: Vec<String>,
    /// Board height.
    pub rows: usize,
    /// Board width.
    pub columns: usize,
}

/// Body of `POST /tictactoe/{game_id}/{player_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoveRequest {
    /// Target row.
    pub row: Option<i64>,
    /// Target column.
    pub column: Option<i64>,
}

/// Board coordinates of a validated move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinates {
    /// Row, 0-based.
    pub row: usize,
    /// Column, 0-based.
    pub col: usize,
}

/// Query of `GET /tictactoe/{game_id}/moves`. Values are parsed by hand so a
/// bad number is a 400 with a readable message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovesQuery {
    /// First move to return.
    pub start: Option<String>,
    /// Last move to return.
    pub until: Option<String>,
}

fn finish<T>(problems: Vec<String>, value: impl FnOnce() -> T) -> Result<T, ServiceError> {
    if problems.is_empty() {
        Ok(value())
    } else {
        debug!(?problems, "Request failed validation");
        Err(ServiceError::invalid_request(problems.join(" ")))
    }
}

fn require_dimension(name: &str, value: Option<i64>, problems: &mut Vec<String>) -> usize {
    match value {
        None => problems.push(format!("{name} is a required field.")),
        Some(v) if v != BOARD_DIMENSION as i64 => {
            problems.push(format!("{name} must be equal to {BOARD_DIMENSION}."))
        }
        Some(_) => {}
    }
    BOARD_DIMENSION
}

fn require_coordinate(name: &str, value: Option<i64>, problems: &mut Vec<String>) -> usize {
    let max = BOARD_DIMENSION as i64 - 1;
    match value {
        None => problems.push(format!("{name} is a required field.")),
        Some(v) if v < 0 => problems.push(format!("{name} must be 0 or greater.")),
        Some(v) if v > max => problems.push(format!("{name} must be {max} or less.")),
        Some(v) => return v as usize,
    }
    0
}

impl CreateGameRequest {
    /// Checks field presence, player count, and board size.
    #[instrument(skip(self))]
    pub fn validate(self) -> Result<NewGame, ServiceError> {
        let mut problems = Vec::new();

        let players = match self.players {
            None => {
                problems.push("players is a required field.".to_string());
                Vec::new()
            }
            Some(players) => {
                if players.len() != 2 {
                    problems.push("players must contain 2 items.".to_string());
                } else if players.iter().any(|p| p.trim().is_empty()) {
                    problems.push("players must not contain blank names.".to_string());
                }
                players
            }
        };
        let columns = require_dimension("columns", self.columns, &mut problems);
        let rows = require_dimension("rows", self.rows, &mut problems);

        finish(problems, || NewGame {
            players,
            rows,
            columns,
        })
    }
}

impl MoveRequest {
    /// Checks that both coordinates are present and on the board.
    #[instrument(skip(self))]
    pub fn validate(self) -> Result<Coordinates, ServiceError> {
        let mut problems = Vec::new();
        let col = require_coordinate("column", self.column, &mut problems);
        let row = require_coordinate("row", self.row, &mut problems);
        finish(problems, || Coordinates { row, col })
    }
}

fn parse_index(name: &str, raw: Option<&str>) -> Result<Option<usize>, ServiceError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(|_| {
            ServiceError::invalid_request(format!("{name} must be a non-negative integer"))
        }),
    }
}

impl MovesQuery {
    /// Parses `start` and `until`; empty values count as absent.
    pub fn window(&self) -> Result<(Option<usize>, Option<usize>), ServiceError> {
        Ok((
            parse_index("start", self.start.as_deref())?,
            parse_index("until", self.until.as_deref())?,
        ))
    }
}

/// Parses the `player_id` path segment.
pub fn parse_player_id(raw: &str) -> Result<i64, ServiceError> {
    raw.trim()
        .parse()
        .map_err(|_| ServiceError::invalid_request("player_id must be an integer"))
}

/// Parses the `move_number` path segment.
pub fn parse_move_number(raw: &str) -> Result<usize, ServiceError> {
    parse_index("move_number", Some(raw))?
        .ok_or_else(|| ServiceError::invalid_request("move_number not provided"))
}
