//! Depth-limited game-tree search.
//!
//! This module implements two variants over the same tree:
//! - Plain Minimax, which visits every node down to the depth limit
//! - Minimax with alpha-beta pruning, which skips siblings once a node can no
//!   longer influence the result
//!
//! Both variants explore legal moves in board scan order and only replace the
//! incumbent best move on a strict improvement, so the first move found wins
//! ties. Every branch works on its own copy of the game state.
//!
//! For any position the two variants return the same score; they may return
//! different moves only when several moves share the optimal score.

use std::fmt;

use tracing::trace;

use crate::board::{Color, Position};
use crate::game::GameState;
use crate::heuristic::Evaluator;

/// Score of a searched node and the move that achieves it.
///
/// `best_move` is `None` at leaves and at nodes where no child improved on
/// the incoming bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    pub best_move: Option<Position>,
}

impl SearchResult {
    #[inline]
    fn leaf(score: i32) -> Self {
        Self {
            score,
            best_move: None,
        }
    }
}

/// Which search variant to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Algorithm {
    Minimax,
    #[default]
    #[value(name = "alphabeta")]
    AlphaBeta,
}

impl Algorithm {
    pub fn parse(s: &str) -> Option<Algorithm> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Some(Algorithm::Minimax),
            "alphabeta" | "alpha-beta" => Some(Algorithm::AlphaBeta),
            _ => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Minimax => f.pad("minimax"),
            Algorithm::AlphaBeta => f.pad("alphabeta"),
        }
    }
}

/// State of one search: the evaluator, the side being maximized and the
/// trace of simulated moves.
pub struct Searcher<'a> {
    evaluator: &'a dyn Evaluator,
    maximizing: Color,
    /// Every simulated child move, in the order it was tried
    visited: Vec<Position>,
    /// Number of alpha-beta cutoffs
    cutoffs: u64,
}

impl<'a> Searcher<'a> {
    /// `evaluator` must already be configured with `maximizing` as its
    /// maximizing side.
    pub fn new(evaluator: &'a dyn Evaluator, maximizing: Color) -> Self {
        Self {
            evaluator,
            maximizing,
            visited: Vec::new(),
            cutoffs: 0,
        }
    }

    /// Search `state` with `algorithm` for the side to move.
    pub fn run(&mut self, algorithm: Algorithm, state: &GameState, depth: u32) -> SearchResult {
        let player = state.current_player();
        match algorithm {
            Algorithm::Minimax => self.minimax(state, depth, player),
            Algorithm::AlphaBeta => self.alpha_beta(state, depth, player, i32::MIN, i32::MAX),
        }
    }

    /// Number of child moves simulated so far.
    #[inline]
    pub fn nodes(&self) -> usize {
        self.visited.len()
    }

    #[inline]
    pub fn cutoffs(&self) -> u64 {
        self.cutoffs
    }

    pub fn visited(&self) -> &[Position] {
        &self.visited
    }

    pub fn into_visited(self) -> Vec<Position> {
        self.visited
    }

    /// Plain Minimax to `depth` plies with `player` to move at this node.
    pub fn minimax(&mut self, state: &GameState, depth: u32, player: Color) -> SearchResult {
        let moves = state.legal_moves(player);
        if !state.is_running() || depth == 0 || moves.is_empty() {
            return SearchResult::leaf(self.evaluator.evaluate(state));
        }

        let maximizing = player == self.maximizing;
        let mut best = SearchResult {
            score: if maximizing { i32::MIN } else { i32::MAX },
            best_move: None,
        };

        for pos in moves {
            self.visited.push(pos);
            let child = state.after_move(player, pos);
            let score = self.minimax(&child, depth - 1, player.opponent()).score;

            let improves = if maximizing {
                score > best.score
            } else {
                score < best.score
            };
            if improves {
                best = SearchResult {
                    score,
                    best_move: Some(pos),
                };
            }
        }

        best
    }

    /// Minimax with alpha-beta pruning.
    ///
    /// `alpha` is the score the maximizing side is already assured of on the
    /// path to this node, `beta` the score the minimizing side is assured of.
    /// Returns `alpha` at maximizing nodes and `beta` at minimizing nodes.
    pub fn alpha_beta(
        &mut self,
        state: &GameState,
        depth: u32,
        player: Color,
        mut alpha: i32,
        mut beta: i32,
    ) -> SearchResult {
        let moves = state.legal_moves(player);
        if !state.is_running() || depth == 0 || moves.is_empty() {
            return SearchResult::leaf(self.evaluator.evaluate(state));
        }

        let maximizing = player == self.maximizing;
        let mut best_move = None;
        let total = moves.len();

        for (i, pos) in moves.into_iter().enumerate() {
            self.visited.push(pos);
            let child = state.after_move(player, pos);
            let score = self
                .alpha_beta(&child, depth - 1, player.opponent(), alpha, beta)
                .score;

            if maximizing {
                if score > alpha {
                    alpha = score;
                    best_move = Some(pos);
                }
            } else if score < beta {
                beta = score;
                best_move = Some(pos);
            }

            if alpha >= beta {
                self.cutoffs += 1;
                trace!(depth, %pos, alpha, beta, skipped = total - i - 1, "cutoff");
                break;
            }
        }

        SearchResult {
            score: if maximizing { alpha } else { beta },
            best_move,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::{PieceCounter, Utility};

    fn piece_counter_for(color: Color) -> PieceCounter {
        let mut e = PieceCounter::new();
        e.configure(color, color.opponent());
        e
    }

    #[test]
    fn test_depth_zero_is_leaf() {
        let state = GameState::new();
        let eval = piece_counter_for(Color::Black);
        let mut s = Searcher::new(&eval, Color::Black);
        let r = s.minimax(&state, 0, Color::Black);
        assert_eq!(r, SearchResult::leaf(0));
        assert_eq!(s.nodes(), 0);
    }

    #[test]
    fn test_depth_one_picks_first_best() {
        // All four opening moves flip one piece; the first in scan order wins
        let state = GameState::new();
        let eval = piece_counter_for(Color::Black);
        let mut s = Searcher::new(&eval, Color::Black);
        let r = s.minimax(&state, 1, Color::Black);
        assert_eq!(r.score, 3);
        assert_eq!(r.best_move, Some(Position::new(2, 3)));
        assert_eq!(s.nodes(), 4);
        assert_eq!(
            s.visited(),
            &[
                Position::new(2, 3),
                Position::new(3, 2),
                Position::new(4, 5),
                Position::new(5, 4)
            ]
        );
    }

    #[test]
    fn test_opening_node_counts() {
        let state = GameState::new();
        let eval = piece_counter_for(Color::Black);

        let mut mm = Searcher::new(&eval, Color::Black);
        let mut ab = Searcher::new(&eval, Color::Black);
        assert_eq!(mm.run(Algorithm::Minimax, &state, 2).score, 0);
        assert_eq!(ab.run(Algorithm::AlphaBeta, &state, 2).score, 0);
        assert_eq!(mm.nodes(), 16);
        assert_eq!(ab.nodes(), 10);
        assert!(ab.cutoffs() > 0);
    }

    #[test]
    fn test_depth_three_matches_between_variants() {
        let state = GameState::new();
        let mut eval = Utility::new();
        eval.configure(Color::Black, Color::White);

        let mut mm = Searcher::new(&eval, Color::Black);
        let mut ab = Searcher::new(&eval, Color::Black);
        let a = mm.run(Algorithm::Minimax, &state, 3);
        let b = ab.run(Algorithm::AlphaBeta, &state, 3);
        assert_eq!(a.score, 5540);
        assert_eq!(b.score, 5540);
        assert_eq!(mm.nodes(), 72);
        assert_eq!(ab.nodes(), 41);
    }

    #[test]
    fn test_algorithm_parse() {
        assert_eq!(Algorithm::parse("minimax"), Some(Algorithm::Minimax));
        assert_eq!(Algorithm::parse("Alpha-Beta"), Some(Algorithm::AlphaBeta));
        assert_eq!(Algorithm::parse("negamax"), None);
        assert_eq!(Algorithm::AlphaBeta.to_string(), "alphabeta");
        assert_eq!(format!("{:<9}|", Algorithm::Minimax), "minimax  |");
    }
}
