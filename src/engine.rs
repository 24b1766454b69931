//! Move selection for the computer player.
//!
//! The [`Engine`] ties a search [`Algorithm`], an [`Evaluator`] and a search
//! depth together. Each call to [`Engine::select_move`] works on a private
//! snapshot of the caller's game, so the live game is never touched.
//!
//! # Example
//!
//! ```
//! use othello_ai::engine::Engine;
//! use othello_ai::game::GameState;
//! use othello_ai::search::Algorithm;
//!
//! let mut game = GameState::new();
//! let mut engine = Engine::new(Algorithm::AlphaBeta);
//!
//! let pos = engine.select_move(&game).unwrap();
//! game.play(pos).unwrap();
//! println!("nodes visited: {}", engine.positions_visited_last_move());
//! ```

use tracing::debug;

use crate::board::Position;
use crate::constants::DEFAULT_DEPTH;
use crate::game::{GameError, GameState};
use crate::heuristic::{Evaluator, PieceCounter};
use crate::search::{Algorithm, SearchResult, Searcher};

/// A computer player.
pub struct Engine {
    algorithm: Algorithm,
    evaluator: Box<dyn Evaluator>,
    depth: u32,
    /// Moves simulated during the last search
    visited: Vec<Position>,
    last_result: Option<SearchResult>,
}

impl Engine {
    /// Engine with the piece counter heuristic at the default depth.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            evaluator: Box::new(PieceCounter::new()),
            depth: DEFAULT_DEPTH,
            visited: Vec::new(),
            last_result: None,
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_strategy(mut self, evaluator: Box<dyn Evaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Swap the heuristic used by subsequent searches.
    pub fn set_strategy(&mut self, evaluator: Box<dyn Evaluator>) {
        self.evaluator = evaluator;
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    pub fn set_depth(&mut self, depth: u32) {
        self.depth = depth;
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn strategy_name(&self) -> &'static str {
        self.evaluator.name()
    }

    /// Choose a move for the side to move in `game`.
    ///
    /// # Errors
    /// - `InvalidDepth` if the engine was configured with depth 0
    /// - `NoActiveGame` if the game is over or the side to move cannot play
    /// - `CloneFailure` if the game could not be copied
    pub fn select_move(&mut self, game: &GameState) -> Result<Position, GameError> {
        self.visited.clear();
        self.last_result = None;

        if self.depth == 0 {
            return Err(GameError::InvalidDepth(self.depth));
        }
        if !game.is_running() {
            return Err(GameError::NoActiveGame);
        }
        let root = game.snapshot()?;

        let computer = root.current_player();
        let opponent = root.opponent_player();
        self.evaluator.configure(computer, opponent);

        let mut searcher = Searcher::new(self.evaluator.as_ref(), computer);
        let result = searcher.run(self.algorithm, &root, self.depth);
        let cutoffs = searcher.cutoffs();
        self.visited = searcher.into_visited();
        self.last_result = Some(result);

        debug!(
            algorithm = %self.algorithm,
            strategy = self.evaluator.name(),
            depth = self.depth,
            player = %computer,
            nodes = self.visited.len(),
            cutoffs,
            score = result.score,
            "search finished"
        );

        result.best_move.ok_or(GameError::NoActiveGame)
    }

    /// Number of moves simulated by the last [`select_move`](Self::select_move).
    pub fn positions_visited_last_move(&self) -> usize {
        self.visited.len()
    }

    /// The moves simulated by the last search, in the order they were tried.
    pub fn visited_positions(&self) -> &[Position] {
        &self.visited
    }

    /// Score and move of the last search, if one completed.
    pub fn last_result(&self) -> Option<SearchResult> {
        self.last_result
    }
}
