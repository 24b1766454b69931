//! Othello-AI: a Minimax / alpha-beta Othello engine.
//!
//! This crate provides the rules of Othello (Reversi) on rectangular boards
//! with optional holes, pluggable position heuristics and a fixed-depth
//! game-tree search that picks the computer's moves.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, search depth and heuristic weights
//! - [`board`] - Cells, coordinates and the board grid
//! - [`game`] - Game state and rule engine (legal moves, flips, passes)
//! - [`heuristic`] - Position evaluators (piece counter, composite utility)
//! - [`search`] - Minimax and alpha-beta search
//! - [`engine`] - Move selection for the computer player
//! - [`playout`] - Whole-game drivers and a random player
//! - [`session`] - Line-oriented text session
//!
//! ## Example
//!
//! ```
//! use othello_ai::engine::Engine;
//! use othello_ai::game::GameState;
//! use othello_ai::heuristic::Utility;
//! use othello_ai::search::Algorithm;
//!
//! let mut game = GameState::new();
//! let mut engine = Engine::new(Algorithm::AlphaBeta).with_strategy(Box::new(Utility::new()));
//!
//! while game.is_running() {
//!     let pos = engine.select_move(&game).unwrap();
//!     game.play(pos).unwrap();
//! }
//! println!("Final score: {}", game.score());
//! ```

pub mod board;
pub mod constants;
pub mod engine;
pub mod game;
pub mod heuristic;
pub mod playout;
pub mod search;
pub mod session;
