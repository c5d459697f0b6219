use tracing::debug;

use super::center_out;
use super::evaluator::PositionEvaluator;
use super::random::random_column;
use super::strategy::MoveSelector;
use crate::config::AiConfig;
use crate::game::{Cell, Game, Side};

/// Depth-limited minimax with alpha-beta pruning.
///
/// The search plays and retracts pieces on the live board instead of copying
/// it, one branch at a time, so every sibling sees the position its parent
/// left. Not re-entrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimaxStrategy {
    config: AiConfig,
}

/// Per-call search state.
struct Search {
    ai: Side,
    order: Vec<usize>,
    evaluator: PositionEvaluator,
    win_score: i32,
    nodes: u64,
}

impl MinimaxStrategy {
    pub fn new(config: AiConfig) -> Self {
        MinimaxStrategy { config }
    }

    /// Search depth for this board, from the configured size breakpoints.
    pub fn depth_for(&self, game: &Game) -> usize {
        let board = game.board();
        self.config.search_depth(board.height() * board.width())
    }

    /// Best column for `ai` searching `depth` plies.
    pub fn best_move_at_depth(&self, game: &mut Game, ai: Side, depth: usize) -> usize {
        let depth = depth.max(1);
        let mut search = Search {
            ai,
            order: center_out(game.board().width()).collect(),
            evaluator: PositionEvaluator::new(&self.config),
            win_score: self.config.win_score,
            nodes: 0,
        };

        let mut best: Option<(usize, i32)> = None;
        for i in 0..search.order.len() {
            let col = search.order[i];
            let Some(row) = game.board().lowest_empty_row(col) else {
                continue;
            };

            place(game, row, col, ai.to_cell());
            let score = if game.would_win(row, col, ai) {
                win_value(search.win_score, depth)
            } else {
                let alpha = best.map_or(i32::MIN, |(_, s)| s);
                search.minimax(game, depth - 1, false, alpha, i32::MAX)
            };
            place(game, row, col, Cell::Empty);

            if best.is_none_or(|(_, s)| score > s) {
                best = Some((col, score));
            }
        }

        match best {
            Some((col, score)) => {
                debug!(column = col, score, depth, nodes = search.nodes, "minimax move");
                col
            }
            None => random_column(game.board(), &mut rand::rng()),
        }
    }
}

impl Search {
    fn minimax(
        &mut self,
        game: &mut Game,
        depth: usize,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if game.board().is_full() {
            return 0;
        }
        if depth == 0 {
            return self.evaluator.evaluate_game(game, self.ai);
        }

        let mover = if maximizing { self.ai } else { self.ai.other() };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for i in 0..self.order.len() {
            let col = self.order[i];
            let Some(row) = game.board().lowest_empty_row(col) else {
                continue;
            };

            place(game, row, col, mover.to_cell());
            if game.would_win(row, col, mover) {
                place(game, row, col, Cell::Empty);
                // Sooner wins score higher, sooner losses lower.
                let score = win_value(self.win_score, depth);
                return if maximizing { score } else { -score };
            }
            let score = self.minimax(game, depth - 1, !maximizing, alpha, beta);
            place(game, row, col, Cell::Empty);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        best
    }
}

/// Score of a win with `depth` plies left, clamped to `i32::MAX`.
fn win_value(win_score: i32, depth: usize) -> i32 {
    win_score.saturating_add(i32::try_from(depth).unwrap_or(i32::MAX))
}

fn place(game: &mut Game, row: usize, col: usize, cell: Cell) {
    game.board_mut().set(row as isize, col as isize, cell);
}

impl MoveSelector for MinimaxStrategy {
    fn select_move(&self, game: &mut Game, side: Side) -> usize {
        let depth = self.depth_for(game);
        self.best_move_at_depth(game, side, depth)
    }

    fn name(&self) -> &str {
        "Hard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RandomStrategy;
    use crate::game::{GameOutcome, Player, PlayerColor, Shape};

    fn game(height: usize, width: usize, winning_length: usize) -> Game {
        Game::new(
            Player::human("Red", PlayerColor::Red),
            Player::human("Yellow", PlayerColor::Yellow),
            height,
            width,
            Shape::Rectangle,
            winning_length,
            Side::First,
        )
        .unwrap()
    }

    fn hard() -> MinimaxStrategy {
        MinimaxStrategy::new(AiConfig::default())
    }

    #[test]
    fn selects_legal_action() {
        let mut game = game(6, 7, 4);
        let legal = game.legal_columns();
        let col = hard().best_move_at_depth(&mut game, Side::First, 4);
        assert!(legal.contains(&col), "Column {col} is not legal");
    }

    #[test]
    fn search_leaves_game_untouched() {
        let mut game = game(6, 7, 4);
        for col in [3, 3, 2, 4] {
            game.make_move(col).unwrap();
        }
        let before = game.clone();
        hard().best_move_at_depth(&mut game, Side::First, 5);
        assert_eq!(game, before);
    }

    #[test]
    fn takes_winning_move() {
        let mut game = game(6, 7, 4);
        // Red col0, Yellow col0, Red col1, Yellow col1, Red col2, Yellow col2
        for col in 0..3 {
            game.make_move(col).unwrap(); // Red
            game.make_move(col).unwrap(); // Yellow
        }
        // Now Red to move, col 3 completes horizontal win
        let col = hard().best_move_at_depth(&mut game, Side::First, 4);
        assert_eq!(col, 3, "Should take winning move at col 3");
    }

    #[test]
    fn blocks_opponent_win() {
        let mut game = game(6, 7, 4);
        game.make_move(6).unwrap(); // Red
        game.make_move(0).unwrap(); // Yellow
        game.make_move(6).unwrap(); // Red
        game.make_move(1).unwrap(); // Yellow
        game.make_move(5).unwrap(); // Red
        game.make_move(2).unwrap(); // Yellow
        // Yellow has [0,1,2] at bottom row. Red must play col 3 to block.
        let col = hard().best_move_at_depth(&mut game, Side::First, 4);
        assert_eq!(col, 3, "Should block opponent's winning move at col 3");
    }

    #[test]
    fn blocks_with_default_depth() {
        let mut game = game(6, 7, 4);
        game.make_move(0).unwrap(); // Red
        game.make_move(6).unwrap(); // Yellow
        game.make_move(1).unwrap(); // Red
        game.make_move(6).unwrap(); // Yellow
        game.make_move(2).unwrap(); // Red
        assert_eq!(hard().select_move(&mut game, Side::Second), 3);
    }

    #[test]
    fn full_board_scores_zero() {
        let mut game = game(2, 2, 3);
        for col in [0, 1, 0, 1] {
            game.make_move(col).unwrap();
        }
        let mut search = Search {
            ai: Side::First,
            order: center_out(2).collect(),
            evaluator: PositionEvaluator::new(&AiConfig::default()),
            win_score: AiConfig::default().win_score,
            nodes: 0,
        };
        assert_eq!(search.minimax(&mut game, 3, true, i32::MIN, i32::MAX), 0);
        assert_eq!(search.minimax(&mut game, 0, false, i32::MIN, i32::MAX), 0);
    }

    #[test]
    fn huge_win_score_does_not_overflow() {
        let config = AiConfig {
            win_score: i32::MAX,
            ..AiConfig::default()
        };
        let mut game = game(4, 4, 3);
        // X owns the bottom of columns 0 and 1, O sits on top of them.
        for col in [0, 0, 1, 1] {
            game.make_move(col).unwrap();
        }
        let col = MinimaxStrategy::new(config).select_move(&mut game, Side::First);
        assert_eq!(col, 2);
        assert_eq!(win_value(i32::MAX, 6), i32::MAX);
        assert_eq!(win_value(1_000_000, 6), 1_000_006);
    }

    #[test]
    fn depth_follows_board_size() {
        let hard = hard();
        assert_eq!(hard.depth_for(&game(4, 4, 3)), 6);
        assert_eq!(hard.depth_for(&game(8, 8, 4)), 4);
        assert_eq!(hard.depth_for(&game(12, 12, 5)), 3);
    }

    #[test]
    fn full_game_vs_self_completes() {
        let hard = hard();
        let mut game = game(6, 7, 4);
        let mut turn = 0;

        while !game.is_over() && turn < 42 {
            let side = game.current_player();
            let col = hard.best_move_at_depth(&mut game, side, 3);
            game.make_move(col).unwrap();
            turn += 1;
        }

        assert!(game.is_over(), "Game should complete");
    }

    #[test]
    fn beats_random_strategy() {
        let games_per_side = 10;
        let mut minimax_wins = 0;
        let total = games_per_side * 2;

        for minimax_side in [Side::First, Side::Second] {
            for _ in 0..games_per_side {
                let mut game = game(6, 7, 4);
                while !game.is_over() {
                    let side = game.current_player();
                    let col = if side == minimax_side {
                        hard().best_move_at_depth(&mut game, side, 4)
                    } else {
                        RandomStrategy.select_move(&mut game, side)
                    };
                    game.make_move(col).unwrap();
                }
                if game.outcome() == Some(GameOutcome::Winner(minimax_side)) {
                    minimax_wins += 1;
                }
            }
        }

        let win_rate = minimax_wins as f64 / total as f64;
        assert!(
            win_rate > 0.80,
            "Minimax should beat random >80% of the time, got {:.0}% ({minimax_wins}/{total})",
            win_rate * 100.0
        );
    }

    #[test]
    fn name_is_hard() {
        assert_eq!(hard().name(), "Hard");
    }
}
