//! Heuristic evaluation of Othello positions.
//!
//! An [`Evaluator`] scores a position from the point of view of the
//! maximizing side it was configured with; higher is better for that side.
//! Evaluators hold no board state, so one instance can score any number of
//! positions.
//!
//! Two strategies are provided:
//! - [`PieceCounter`]: plain difference in piece counts
//! - [`Utility`]: weighted sum of mobility, coin parity, corners and static
//!   cell weights
//!
//! All arithmetic is integer arithmetic truncating toward zero, so scores are
//! reproducible bit for bit.

use std::fmt;

use crate::board::{Board, Color, Field, Position};
use crate::constants::{
    CORNER_VALUE, CORNER_WEIGHT, MOBILITY_WEIGHT, PARITY_WEIGHT, POSITION_WEIGHT, POSITION_WEIGHTS,
};
use crate::game::{GameState, count_legal_moves};

/// Which side a heuristic is scoring for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicConfig {
    pub maximizing: Color,
    pub minimizing: Color,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            maximizing: Color::White,
            minimizing: Color::Black,
        }
    }
}

/// A position scoring strategy.
pub trait Evaluator {
    /// Bind the sides before scoring.
    fn configure(&mut self, maximizing: Color, minimizing: Color);

    /// Score `state`; larger favors the maximizing side.
    fn evaluate(&self, state: &GameState) -> i32;

    fn name(&self) -> &'static str;
}

/// Named strategies, for selecting an evaluator from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Strategy {
    /// Difference in piece counts
    #[default]
    #[value(name = "piece")]
    PieceCounter,
    /// Mobility, parity, corners and cell weights combined
    Utility,
}

impl Strategy {
    pub fn evaluator(self) -> Box<dyn Evaluator> {
        match self {
            Strategy::PieceCounter => Box::new(PieceCounter::new()),
            Strategy::Utility => Box::new(Utility::new()),
        }
    }

    pub fn parse(s: &str) -> Option<Strategy> {
        match s.to_ascii_lowercase().as_str() {
            "piece" | "piececounter" | "piece-counter" => Some(Strategy::PieceCounter),
            "utility" => Some(Strategy::Utility),
            _ => None,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::PieceCounter => f.pad("piece"),
            Strategy::Utility => f.pad("utility"),
        }
    }
}

// =============================================================================
// Piece counter
// =============================================================================

/// `count(maximizing) - count(minimizing)`.
#[derive(Debug, Clone, Default)]
pub struct PieceCounter {
    config: HeuristicConfig,
}

impl PieceCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Evaluator for PieceCounter {
    fn configure(&mut self, maximizing: Color, minimizing: Color) {
        self.config = HeuristicConfig {
            maximizing,
            minimizing,
        };
    }

    fn evaluate(&self, state: &GameState) -> i32 {
        let board = state.board();
        pieces(board, self.config.maximizing) - pieces(board, self.config.minimizing)
    }

    fn name(&self) -> &'static str {
        "piece"
    }
}

// =============================================================================
// Composite utility
// =============================================================================

/// `80 * mobility + 10 * parity + 800 * corners + 10 * weighted positions`.
#[derive(Debug, Clone, Default)]
pub struct Utility {
    config: HeuristicConfig,
}

impl Utility {
    pub fn new() -> Self {
        Self::default()
    }

    /// `100 * (max - min) / (max + min)` over piece counts.
    pub fn parity(&self, board: &Board) -> i32 {
        let max = pieces(board, self.config.maximizing);
        let min = pieces(board, self.config.minimizing);
        if max + min == 0 {
            return 0;
        }
        100 * (max - min) / (max + min)
    }

    /// Relative number of legal moves.
    pub fn mobility(&self, board: &Board) -> i32 {
        let max = count_legal_moves(board, self.config.maximizing) as i32;
        let min = count_legal_moves(board, self.config.minimizing) as i32;
        relative(max, min)
    }

    /// `25 * (corners(max) - corners(min))`.
    pub fn captured_corners(&self, board: &Board) -> i32 {
        let owned = |color: Color| {
            board
                .corners()
                .iter()
                .filter(|&&c| board.get(c) == Some(Field::from(color)))
                .count() as i32
        };
        CORNER_VALUE * (owned(self.config.maximizing) - owned(self.config.minimizing))
    }

    /// Static cell weights of each side, compared like mobility.
    pub fn weighted_positions(&self, board: &Board) -> i32 {
        let max = weight_sum(board, self.config.maximizing);
        let min = weight_sum(board, self.config.minimizing);
        relative(max, min)
    }
}

impl Evaluator for Utility {
    fn configure(&mut self, maximizing: Color, minimizing: Color) {
        self.config = HeuristicConfig {
            maximizing,
            minimizing,
        };
    }

    fn evaluate(&self, state: &GameState) -> i32 {
        let board = state.board();
        MOBILITY_WEIGHT * self.mobility(board)
            + PARITY_WEIGHT * self.parity(board)
            + CORNER_WEIGHT * self.captured_corners(board)
            + POSITION_WEIGHT * self.weighted_positions(board)
    }

    fn name(&self) -> &'static str {
        "utility"
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn pieces(board: &Board, color: Color) -> i32 {
    board.count(Field::from(color)) as i32
}

/// `100 * max / (max + min)` when max leads, `-100 * min / (max + min)` when
/// min leads, zero on a tie or a zero sum.
fn relative(max: i32, min: i32) -> i32 {
    let sum = max + min;
    if sum == 0 {
        return 0;
    }
    if max > min {
        100 * max / sum
    } else if max < min {
        -100 * min / sum
    } else {
        0
    }
}

/// Static weight of `pos`.
///
/// Each coordinate is folded to its distance from the nearest edge, capped at
/// 3, which reproduces the 8x8 table exactly and stretches it over other
/// board sizes.
pub fn cell_weight(board: &Board, pos: Position) -> i32 {
    let fold = |v: i32, len: usize| v.min(len as i32 - 1 - v).clamp(0, 3) as usize;
    POSITION_WEIGHTS[fold(pos.y, board.height())][fold(pos.x, board.width())]
}

fn weight_sum(board: &Board, color: Color) -> i32 {
    let field = Field::from(color);
    board
        .positions()
        .filter(|&pos| board.get(pos) == Some(field))
        .map(|pos| cell_weight(board, pos))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn configured<E: Evaluator>(mut e: E, max: Color) -> E {
        e.configure(max, max.opponent());
        e
    }

    #[test]
    fn test_relative_truncates_toward_zero() {
        assert_eq!(relative(0, 0), 0);
        assert_eq!(relative(2, 2), 0);
        assert_eq!(relative(2, 1), 66);
        assert_eq!(relative(1, 2), -66);
        // Negative weight sums keep the formula as written
        assert_eq!(relative(-7, -3), -30);
        assert_eq!(relative(3, -3), 0);
    }

    #[test]
    fn test_cell_weight_matches_table_on_8x8() {
        let board = Board::new(8, 8);
        for pos in board.positions() {
            assert_eq!(
                cell_weight(&board, pos),
                POSITION_WEIGHTS[pos.y as usize][pos.x as usize],
                "weight mismatch at {pos}"
            );
        }
    }

    #[test]
    fn test_cell_weight_small_board() {
        let board = Board::new(4, 4);
        assert_eq!(cell_weight(&board, p(0, 0)), 20);
        assert_eq!(cell_weight(&board, p(3, 3)), 20);
        assert_eq!(cell_weight(&board, p(1, 1)), -7);
        assert_eq!(cell_weight(&board, p(1, 0)), -3);
    }

    #[test]
    fn test_opening_is_balanced() {
        let state = GameState::new();
        for max in [Color::Black, Color::White] {
            assert_eq!(configured(PieceCounter::new(), max).evaluate(&state), 0);
            assert_eq!(configured(Utility::new(), max).evaluate(&state), 0);
        }
    }

    #[test]
    fn test_utility_components_after_first_move() {
        let state = GameState::new()
            .apply_move(Color::Black, p(3, 2))
            .unwrap();
        let u = configured(Utility::new(), Color::Black);
        let board = state.board();
        assert_eq!(u.parity(board), 60);
        assert_eq!(u.mobility(board), 0);
        assert_eq!(u.captured_corners(board), 0);
        assert_eq!(u.weighted_positions(board), -30);
        assert_eq!(u.evaluate(&state), 300);

        let u = configured(Utility::new(), Color::White);
        assert_eq!(u.evaluate(&state), -300);
    }

    #[test]
    fn test_corners() {
        let mut board = Board::new(8, 8);
        board.set(p(0, 0), Field::Black);
        board.set(p(7, 7), Field::Black);
        board.set(p(7, 0), Field::White);
        let u = configured(Utility::new(), Color::Black);
        assert_eq!(u.captured_corners(&board), 25);
        let u = configured(Utility::new(), Color::White);
        assert_eq!(u.captured_corners(&board), -25);
    }

    #[test]
    fn test_empty_board_scores_zero() {
        let state = GameState::from_board(Board::new(8, 8), Color::Black);
        assert_eq!(configured(Utility::new(), Color::Black).evaluate(&state), 0);
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!(Strategy::parse("piece"), Some(Strategy::PieceCounter));
        assert_eq!(Strategy::parse("Utility"), Some(Strategy::Utility));
        assert_eq!(Strategy::parse("random"), None);
        assert_eq!(Strategy::Utility.evaluator().name(), "utility");
    }
}
