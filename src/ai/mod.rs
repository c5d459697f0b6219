//! Computer opponents: a static position evaluator and three strategies of
//! increasing strength behind one [`MoveSelector`] interface.

mod evaluator;
pub mod greedy;
mod minimax;
mod random;
mod strategy;

pub use evaluator::PositionEvaluator;
pub use greedy::GreedyStrategy;
pub use minimax::MinimaxStrategy;
pub use random::{random_column, RandomStrategy};
pub use strategy::{Difficulty, MoveSelector, Strategy};

/// Columns ordered from the center outwards, left neighbour first:
/// `3, 2, 4, 1, 5, 0, 6` for a width of 7.
pub(crate) fn center_out(width: usize) -> impl Iterator<Item = usize> {
    let center = width / 2;
    (0..width).filter_map(move |i| {
        let offset = (i + 1) / 2;
        if i % 2 == 1 {
            center.checked_sub(offset)
        } else {
            Some(center + offset).filter(|&c| c < width)
        }
    })
}
