//! Othello game state and rule engine.
//!
//! This module provides the core game logic, including:
//! - Legal move generation along the 8 compass directions
//! - Capture ("flip") resolution
//! - Turn advancement with passes and game-end detection
//!
//! A [`GameState`] is a plain value. Applying a move produces a new state and
//! leaves the original untouched, so search branches never alias each other.

use std::fmt;

use crate::board::{Board, Color, Field, Position};
use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH, DIRECTIONS, MAX_BOARD_EDGE, MIN_BOARD_EDGE};

/// Errors raised by the rule engine and the move-selection front ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Coordinate lies outside the board
    OffBoardPosition(Position),
    /// Coordinate is on the board but captures nothing for the mover
    IllegalMove { pos: Position, player: Color },
    /// The game is over; nothing may be played or searched
    NoActiveGame,
    /// A deep copy of the game state could not be produced
    CloneFailure,
    /// Board dimensions cannot host a game
    InvalidDimensions { width: usize, height: usize },
    /// A search needs at least one ply
    InvalidDepth(u32),
}

impl GameError {
    /// Rule violations can be retried with other input; contract violations
    /// must abort the current operation.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::OffBoardPosition(_)
                | GameError::IllegalMove { .. }
                | GameError::InvalidDimensions { .. }
                | GameError::InvalidDepth(_)
        )
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::OffBoardPosition(pos) => write!(f, "position {pos} is off the board"),
            GameError::IllegalMove { pos, player } => {
                write!(f, "illegal move: {player} captures nothing at {pos}")
            }
            GameError::NoActiveGame => write!(f, "no active game: the game is over"),
            GameError::CloneFailure => write!(f, "could not copy the game state"),
            GameError::InvalidDimensions { width, height } => write!(
                f,
                "unsupported board size {width}x{height}: edges must be even and within \
                 {MIN_BOARD_EDGE}..={MAX_BOARD_EDGE}"
            ),
            GameError::InvalidDepth(depth) => {
                write!(f, "search depth must be at least 1, got {depth}")
            }
        }
    }
}

impl std::error::Error for GameError {}

/// What happened after a move was played on the live game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The opponent moves next
    NextPlayer(Color),
    /// The opponent had no move; the mover plays again
    Pass { skipped: Color },
    /// Neither side can move
    GameOver(Score),
}

/// Piece counts for both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub black: usize,
    pub white: usize,
}

impl Score {
    /// The side with more pieces, `None` on a tie.
    pub fn winner(&self) -> Option<Color> {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => Some(Color::Black),
            std::cmp::Ordering::Less => Some(Color::White),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "black {} white {}", self.black, self.white)
    }
}

/// An Othello position: board, side to move and whether play continues.
///
/// Invariant: `running` is false iff neither side has a legal move, and while
/// running `current` always has at least one legal move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current: Color,
    running: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard 8x8 game with Black to move.
    pub fn new() -> Self {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        place_opening(&mut board);
        Self {
            board,
            current: Color::Black,
            running: true,
        }
    }

    /// A game on a `width` x `height` board with the opening at its center.
    pub fn with_size(width: usize, height: usize) -> Result<Self, GameError> {
        let edge_ok = |e: usize| e % 2 == 0 && (MIN_BOARD_EDGE..=MAX_BOARD_EDGE).contains(&e);
        if !edge_ok(width) || !edge_ok(height) {
            return Err(GameError::InvalidDimensions { width, height });
        }
        let mut board = Board::new(width, height);
        place_opening(&mut board);
        Ok(Self::from_board(board, Color::Black))
    }

    /// Wrap an arbitrary board.
    ///
    /// If `to_move` cannot play but the other side can, the turn goes to the
    /// other side. If neither can, the state is terminal.
    pub fn from_board(board: Board, to_move: Color) -> Self {
        let mut state = Self {
            board,
            current: to_move,
            running: true,
        };
        if !has_legal_move(&state.board, to_move) {
            if has_legal_move(&state.board, to_move.opponent()) {
                state.current = to_move.opponent();
            } else {
                state.running = false;
            }
        }
        state
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.current
    }

    #[inline]
    pub fn opponent_player(&self) -> Color {
        self.current.opponent()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Legal moves for `player` in scan order; empty once the game is over.
    pub fn legal_moves(&self, player: Color) -> Vec<Position> {
        if !self.running {
            return Vec::new();
        }
        legal_moves(&self.board, player)
    }

    /// Legal moves for the side to move.
    pub fn possible_moves(&self) -> Vec<Position> {
        self.legal_moves(self.current)
    }

    /// Check `pos` for `player` without changing anything.
    pub fn validate_move(&self, player: Color, pos: Position) -> Result<(), GameError> {
        if !self.running {
            return Err(GameError::NoActiveGame);
        }
        if !self.board.contains(pos) {
            return Err(GameError::OffBoardPosition(pos));
        }
        if captures(&self.board, player, pos).is_empty() {
            return Err(GameError::IllegalMove { pos, player });
        }
        Ok(())
    }

    /// The state after `player` plays at `pos`.
    pub fn apply_move(&self, player: Color, pos: Position) -> Result<GameState, GameError> {
        self.validate_move(player, pos)?;
        Ok(self.after_move(player, pos))
    }

    /// The state after `player` plays at `pos`, which must already be known
    /// to be legal (e.g. taken from [`legal_moves`](Self::legal_moves)).
    pub(crate) fn after_move(&self, player: Color, pos: Position) -> GameState {
        let mut next = self.clone();
        for flipped in captures(&next.board, player, pos) {
            next.board.set(flipped, player.into());
        }
        next.board.set(pos, player.into());
        next.advance_turn(player);
        next
    }

    /// Opponent moves if it can, otherwise the mover goes again, otherwise
    /// the game ends.
    fn advance_turn(&mut self, mover: Color) {
        let opponent = mover.opponent();
        if has_legal_move(&self.board, opponent) {
            self.current = opponent;
        } else if has_legal_move(&self.board, mover) {
            self.current = mover;
        } else {
            self.current = opponent;
            self.running = false;
        }
    }

    /// Play `pos` for the side to move on this (live) game.
    pub fn play(&mut self, pos: Position) -> Result<MoveOutcome, GameError> {
        let mover = self.current;
        *self = self.apply_move(mover, pos)?;
        Ok(if !self.running {
            MoveOutcome::GameOver(self.score())
        } else if self.current == mover {
            MoveOutcome::Pass {
                skipped: mover.opponent(),
            }
        } else {
            MoveOutcome::NextPlayer(self.current)
        })
    }

    /// Deep copy that reports failure instead of aborting the process.
    pub fn snapshot(&self) -> Result<GameState, GameError> {
        let board = self.board.try_clone().ok_or(GameError::CloneFailure)?;
        Ok(Self {
            board,
            current: self.current,
            running: self.running,
        })
    }

    pub fn score(&self) -> Score {
        Score {
            black: self.board.count(Field::Black),
            white: self.board.count(Field::White),
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        if self.running {
            writeln!(f, "{} to move, {}", self.current, self.score())
        } else {
            writeln!(f, "game over, {}", self.score())
        }
    }
}

/// Put the four opening pieces at the center of `board`.
fn place_opening(board: &mut Board) {
    let cx = (board.width() / 2) as i32;
    let cy = (board.height() / 2) as i32;
    board.set(Position::new(cx - 1, cy - 1), Field::White);
    board.set(Position::new(cx, cy), Field::White);
    board.set(Position::new(cx - 1, cy), Field::Black);
    board.set(Position::new(cx, cy - 1), Field::Black);
}

/// Opponent pieces captured when `player` plays at `pos`, over all directions.
///
/// Empty when `pos` is off the board, not empty, or captures nothing.
pub fn captures(board: &Board, player: Color, pos: Position) -> Vec<Position> {
    let mut flipped = Vec::new();
    if board.get(pos) != Some(Field::Empty) {
        return flipped;
    }
    for dir in DIRECTIONS {
        flipped.extend(capturing_line(board, player, pos, dir));
    }
    flipped
}

/// The run of opponent pieces from `pos` in direction `dir`, if it is closed
/// by a piece of `player`.
fn capturing_line(board: &Board, player: Color, pos: Position, dir: (isize, isize)) -> Vec<Position> {
    let own = Field::from(player);
    let theirs = Field::from(player.opponent());
    let mut run = Vec::new();
    let mut cur = pos.step(dir);
    loop {
        match board.get(cur) {
            Some(f) if f == theirs => run.push(cur),
            Some(f) if f == own && !run.is_empty() => return run,
            // Empty, hole, own piece right next to pos, or the edge
            _ => return Vec::new(),
        }
        cur = cur.step(dir);
    }
}

fn is_legal(board: &Board, player: Color, pos: Position) -> bool {
    board.get(pos) == Some(Field::Empty)
        && DIRECTIONS
            .iter()
            .any(|&dir| !capturing_line(board, player, pos, dir).is_empty())
}

/// Legal moves for `player` on `board`, in [`Board::positions`] order.
pub fn legal_moves(board: &Board, player: Color) -> Vec<Position> {
    board
        .positions()
        .filter(|&pos| is_legal(board, player, pos))
        .collect()
}

/// Number of legal moves for `player` on `board`.
pub fn count_legal_moves(board: &Board, player: Color) -> usize {
    board
        .positions()
        .filter(|&pos| is_legal(board, player, pos))
        .count()
}

fn has_legal_move(board: &Board, player: Color) -> bool {
    board.positions().any(|pos| is_legal(board, player, pos))
}

/// Parse a coordinate pair such as `"3 2"` or `"3,2"`.
pub fn parse_position(s: &str) -> Option<Position> {
    let mut parts = s
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty());
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Position::new(x, y))
}
