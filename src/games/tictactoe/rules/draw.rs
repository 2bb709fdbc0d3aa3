//! Draw detection logic for tic-tac-toe.

use super::super::types::Game;
use tracing::instrument;

/// Checks whether every square has been played.
///
/// Callers check for a winner first; a full board with no winner is a draw.
#[instrument(skip(game), fields(game_id = %game.id, moves = game.moves.len()))]
pub fn is_draw(game: &Game) -> bool {
    game.moves.len() == game.rows * game.columns
}

#[cfg(test)]
mod tests {
    use super::super::{MoveOutcome, play};
    use super::*;
    use crate::games::tictactoe::types::Seat;

    fn new_game() -> Game {
        Game::new("g".into(), ["a".into(), "b".into()], 3, 3)
    }

    #[test]
    fn test_empty_board_not_draw() {
        assert!(!is_draw(&new_game()));
    }

    #[test]
    fn test_partial_board_not_draw() {
        let mut game = new_game();
        play(&mut game, 1, 1, Seat::First).unwrap();
        assert!(!is_draw(&game));
    }

    #[test]
    fn test_winning_last_square_is_not_draw() {
        // 0 1 0
        // 1 0 1
        // 1 0 0  <- last move at (2,2) completes the main diagonal
        let mut game = new_game();
        let sequence = [
            (0, 0, Seat::First),
            (0, 1, Seat::Second),
            (0, 2, Seat::First),
            (1, 0, Seat::Second),
            (1, 1, Seat::First),
            (1, 2, Seat::Second),
            (2, 1, Seat::First),
            (2, 0, Seat::Second),
        ];
        for (row, col, seat) in sequence {
            play(&mut game, row, col, seat).unwrap();
        }
        let played = play(&mut game, 2, 2, Seat::First).unwrap();
        assert_eq!(played.outcome, MoveOutcome::Won("a".into()));
    }
}
