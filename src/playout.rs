//! Whole-game drivers.
//!
//! A game is played by asking the [`Player`] for the side to move to pick a
//! move and applying it to the live [`GameState`] until neither side can
//! move. Every move fills one empty cell, so a game ends after at most
//! `width * height` moves.
//!
//! [`RandomPlayer`] picks uniformly among the legal moves with a seeded
//! generator, which makes it a cheap, reproducible opponent for the engines.

use tracing::{debug, info};

use crate::board::{Color, Position};
use crate::engine::Engine;
use crate::game::{GameError, GameState, MoveOutcome, Score};

/// Anything that can choose a move for the side to move.
pub trait Player {
    fn choose_move(&mut self, game: &GameState) -> Result<Position, GameError>;

    fn name(&self) -> String;

    /// Moves simulated for the last choice; zero for players that do not search.
    fn last_nodes(&self) -> usize {
        0
    }
}

impl Player for Engine {
    fn choose_move(&mut self, game: &GameState) -> Result<Position, GameError> {
        self.select_move(game)
    }

    fn name(&self) -> String {
        format!("{}/{}/d{}", self.algorithm(), self.strategy_name(), self.depth())
    }

    fn last_nodes(&self) -> usize {
        self.positions_visited_last_move()
    }
}

/// Plays a uniformly random legal move.
pub struct RandomPlayer {
    rng: fastrand::Rng,
}

impl RandomPlayer {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn choose_move(&mut self, game: &GameState) -> Result<Position, GameError> {
        let moves = game.possible_moves();
        if moves.is_empty() {
            return Err(GameError::NoActiveGame);
        }
        Ok(moves[self.rng.usize(..moves.len())])
    }

    fn name(&self) -> String {
        "random".to_string()
    }
}

/// One move of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayedMove {
    pub player: Color,
    pub pos: Position,
    /// Simulated moves the player reported, zero for non-searching players
    pub nodes: usize,
}

/// Summary of a finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub moves: Vec<PlayedMove>,
    /// Turns skipped because the side to move had no legal move
    pub passes: usize,
    pub score: Score,
    pub final_state: GameState,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Color> {
        self.score.winner()
    }

    /// Total simulated moves of `player` over the whole game.
    pub fn nodes_for(&self, player: Color) -> usize {
        self.moves
            .iter()
            .filter(|m| m.player == player)
            .map(|m| m.nodes)
            .sum()
    }
}

/// Play `game` to the end, `black` and `white` choosing the moves.
pub fn play_game(
    mut game: GameState,
    black: &mut dyn Player,
    white: &mut dyn Player,
) -> Result<GameRecord, GameError> {
    let mut moves = Vec::new();
    let mut passes = 0;

    while game.is_running() {
        let mover = game.current_player();
        let player: &mut dyn Player = match mover {
            Color::Black => &mut *black,
            Color::White => &mut *white,
        };
        let pos = player.choose_move(&game)?;
        let nodes = player.last_nodes();
        let outcome = game.play(pos)?;
        moves.push(PlayedMove {
            player: mover,
            pos,
            nodes,
        });
        debug!(player = %mover, %pos, ?outcome, "move played");
        if let MoveOutcome::Pass { .. } = outcome {
            passes += 1;
        }
    }

    let score = game.score();
    info!(
        moves = moves.len(),
        passes,
        black = score.black,
        white = score.white,
        "game over"
    );
    Ok(GameRecord {
        moves,
        passes,
        score,
        final_state: game,
    })
}

/// Play `game` to the end between two engines.
pub fn play_engines(
    game: GameState,
    black: &mut Engine,
    white: &mut Engine,
) -> Result<GameRecord, GameError> {
    play_game(game, black, white)
}
