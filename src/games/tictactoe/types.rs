//! Core domain types for tic-tac-toe games.

use derive_getters::Getters;
use derive_new::new;
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// Unique identifier for a game.
pub type GameId = String;

/// Which of the two registered players a move belongs to (index 0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Seat {
    /// Player at index 0.
    #[strum(to_string = "0")]
    First,
    /// Player at index 1.
    #[strum(to_string = "1")]
    Second,
}

impl Seat {
    /// Resolves a raw player index. Only 0 and 1 are seats.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Seat::First),
            1 => Some(Seat::Second),
            _ => None,
        }
    }

    /// Returns the player index of this seat.
    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }

    /// Returns the other seat.
    pub fn opponent(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

impl Serialize for Seat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.index() as u8)
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square claimed by a seat.
    Occupied(Seat),
}

impl Square {
    /// Wire code of the square: `-1` when empty, else the owner's index.
    pub fn code(self) -> i8 {
        match self {
            Square::Empty => -1,
            Square::Occupied(seat) => seat.index() as i8,
        }
    }
}

/// Rectangular game board stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    columns: usize,
    squares: Vec<Square>,
}

impl Board {
    /// Creates an empty `rows` x `columns` board.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            squares: vec![Square::Empty; rows * columns],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.columns).then(|| row * self.columns + col)
    }

    /// Gets the square at the given coordinates, `None` when off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Square> {
        self.offset(row, col).map(|i| self.squares[i])
    }

    /// Claims the square for `seat`. Returns `false` when off the board.
    pub(crate) fn claim(&mut self, row: usize, col: usize, seat: Seat) -> bool {
        match self.offset(row, col) {
            Some(i) => {
                self.squares[i] = Square::Occupied(seat);
                true
            }
            None => false,
        }
    }

    /// All squares in row-major order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Number of squares holding a mark.
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Formats the board as a human-readable grid, `.` for empty squares.
    pub fn display(&self) -> String {
        self.squares
            .chunks(self.columns.max(1))
            .map(|row| {
                row.iter()
                    .map(|square| match square {
                        Square::Empty => ".".to_string(),
                        Square::Occupied(seat) => seat.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows))?;
        for row in self.squares.chunks(self.columns.max(1)) {
            let codes: Vec<i8> = row.iter().map(|s| s.code()).collect();
            seq.serialize_element(&codes)?;
        }
        seq.end()
    }
}

/// Kind of a recorded action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MoveType {
    /// A mark placed on the board.
    Move,
    /// A player quitting.
    Quit,
}

/// One recorded action within a game. Never changed once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Move {
    /// Kind of action.
    #[serde(rename = "type")]
    kind: MoveType,
    /// Name of the player who made it.
    player: String,
    /// Board row.
    row: usize,
    /// Board column.
    col: usize,
}

/// Lifecycle state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    /// Moves are still accepted.
    InProgress,
    /// Ended in a win or a draw.
    Complete,
    /// Abandoned.
    Quit,
}

/// Full state of one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct Game {
    /// Game identifier.
    pub(crate) id: GameId,
    /// Player names, indexed by seat.
    pub(crate) players: [String; 2],
    /// Board width.
    pub(crate) columns: usize,
    /// Board height.
    pub(crate) rows: usize,
    /// Lifecycle state.
    pub(crate) state: GameState,
    /// Winner's name, set only when a player completed a line.
    pub(crate) winner: Option<String>,
    /// Applied moves in order.
    pub(crate) moves: Vec<Move>,
    /// Seat expected to move next; `None` until the first move.
    #[serde(rename = "nextPlayerIdx", serialize_with = "serialize_next_player")]
    pub(crate) next_player: Option<Seat>,
    /// The board.
    #[serde(rename = "gameBoard")]
    pub(crate) board: Board,
}

fn serialize_next_player<S: Serializer>(
    next_player: &Option<Seat>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match next_player {
        Some(seat) => serializer.serialize_i8(seat.index() as i8),
        None => serializer.serialize_i8(-1),
    }
}

impl Game {
    /// Creates an in-progress game with an empty board and no moves.
    pub fn new(id: GameId, players: [String; 2], rows: usize, columns: usize) -> Self {
        Self {
            id,
            players,
            columns,
            rows,
            state: GameState::InProgress,
            winner: None,
            moves: Vec::new(),
            next_player: None,
            board: Board::new(rows, columns),
        }
    }

    /// Returns the name of the player in `seat`.
    pub fn player_name(&self, seat: Seat) -> &str {
        &self.players[seat.index()]
    }
}
