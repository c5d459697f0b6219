use rand::Rng;

use super::strategy::MoveSelector;
use crate::game::{Board, Game, Side};

/// Picks uniformly at random among the open columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomStrategy;

/// A uniformly random open column of `board`.
///
/// # Panics
///
/// Panics if every column is full.
pub fn random_column<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> usize {
    let open = board.open_columns();
    assert!(!open.is_empty(), "No legal columns available");
    open[rng.random_range(0..open.len())]
}

impl MoveSelector for RandomStrategy {
    fn select_move(&self, game: &mut Game, _side: Side) -> usize {
        random_column(game.board(), &mut rand::rng())
    }

    fn name(&self) -> &str {
        "Easy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Player, PlayerColor, Shape};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game(height: usize, width: usize) -> Game {
        Game::new(
            Player::human("A", PlayerColor::Red),
            Player::human("B", PlayerColor::Yellow),
            height,
            width,
            Shape::Rectangle,
            4,
            Side::First,
        )
        .unwrap()
    }

    #[test]
    fn test_random_strategy_selects_legal_column() {
        let mut game = game(6, 7);
        for _ in 0..6 {
            game.make_move(2).unwrap();
        }
        let legal = game.legal_columns();

        for _ in 0..100 {
            let col = RandomStrategy.select_move(&mut game, Side::First);
            assert!(legal.contains(&col), "Column {} is not legal", col);
        }
    }

    #[test]
    fn test_random_strategy_plays_full_game() {
        let mut game = game(6, 7);
        while !game.is_over() {
            let side = game.current_player();
            let col = RandomStrategy.select_move(&mut game, side);
            game.make_move(col).unwrap();
        }
        assert!(game.outcome().is_some());
    }

    #[test]
    fn test_random_column_covers_every_open_column() {
        let board = Board::new(3, 4, Shape::Rectangle);
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[random_column(&board, &mut rng)] = true;
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    #[should_panic(expected = "No legal columns available")]
    fn test_random_column_panics_on_full_board() {
        let mut board = Board::new(1, 2, Shape::Rectangle);
        board.drop_piece(0, Side::First).unwrap();
        board.drop_piece(1, Side::Second).unwrap();
        random_column(&board, &mut rand::rng());
    }

    #[test]
    fn test_random_strategy_name() {
        assert_eq!(RandomStrategy.name(), "Easy");
    }
}
