//! Line-oriented text session for playing against the engine.
//!
//! The protocol follows the shape of the Go Text Protocol: one command per
//! line, an optional numeric id in front, and a response that starts with
//! `=` on success or `?` on failure, terminated by an empty line.
//!
//! ## Supported Commands
//!
//! - `name` / `version` - Engine identification
//! - `list_commands` / `known_command <cmd>` - Command discovery
//! - `quit` - End the session
//! - `newgame [width height]` - Start a new game (8x8 by default)
//! - `play <x> <y>` - Play a move for the side to move
//! - `genmove` - Let the engine choose and play a move for the side to move
//! - `moves` - List the legal moves of the side to move
//! - `showboard` - Print the board
//! - `score` - Print the piece counts
//! - `strategy <piece|utility>` - Set the engine heuristic
//! - `algorithm <minimax|alphabeta>` - Set the search variant
//! - `depth <n>` - Set the search depth
//!
//! ## Example
//!
//! ```ignore
//! use othello_ai::session::Session;
//! let mut session = Session::new();
//! session.run(std::io::stdin().lock(), std::io::stdout())?;
//! ```

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::constants::MAX_DEPTH;
use crate::engine::Engine;
use crate::game::{GameError, GameState, MoveOutcome, parse_position};
use crate::heuristic::Strategy;
use crate::search::Algorithm;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "algorithm",
    "depth",
    "genmove",
    "known_command",
    "list_commands",
    "moves",
    "name",
    "newgame",
    "play",
    "quit",
    "score",
    "showboard",
    "strategy",
    "version",
];

/// Session state.
pub struct Session {
    /// Current game
    game: GameState,
    /// Computer player
    engine: Engine,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_engine(Engine::new(Algorithm::AlphaBeta))
    }

    pub fn with_engine(engine: Engine) -> Self {
        Self {
            game: GameState::new(),
            engine,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    ///
    /// Blank lines and lines starting with `#` produce no response.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }

            let (id, rest) = Self::parse_id(line);
            let mut words = rest.split_whitespace();
            let Some(command) = words.next().map(str::to_lowercase) else {
                continue;
            };
            let args: Vec<&str> = words.collect();

            let (ok, message) = self.execute(&command, &args);
            let status = if ok { '=' } else { '?' };
            match id {
                Some(id) => writeln!(output, "{status}{id} {message}\n")?,
                None => writeln!(output, "{status} {message}\n")?,
            }
            output.flush()?;

            if command == "quit" {
                return Ok(());
            }
        }
        Ok(())
    }

    /// Split a leading numeric command id off `line`.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let line = line.trim();
        let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        match line[..digits].parse() {
            Ok(id) => (Some(id), line[digits..].trim_start()),
            Err(_) => (None, line),
        }
    }

    /// Execute a command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "newgame" => {
                let game = match args {
                    [] => Ok(GameState::new()),
                    [w, h] => match (w.parse(), h.parse()) {
                        (Ok(w), Ok(h)) => GameState::with_size(w, h),
                        _ => return (false, "invalid size".to_string()),
                    },
                    _ => return (false, "expected: newgame [width height]".to_string()),
                };
                match game {
                    Ok(game) => {
                        self.game = game;
                        (true, String::new())
                    }
                    Err(err) => (false, err.to_string()),
                }
            }

            "play" => {
                let Some(pos) = parse_position(&args.join(" ")) else {
                    return (false, "expected: play <x> <y>".to_string());
                };
                match self.game.play(pos) {
                    Ok(outcome) => (true, describe(outcome)),
                    Err(err) => self.reject(err),
                }
            }

            "genmove" => {
                let pos = match self.engine.select_move(&self.game) {
                    Ok(pos) => pos,
                    Err(err) => return self.reject(err),
                };
                match self.game.play(pos) {
                    Ok(outcome) => {
                        let nodes = self.engine.positions_visited_last_move();
                        (true, format!("{} {} nodes {nodes} {}", pos.x, pos.y, describe(outcome)))
                    }
                    Err(err) => self.reject(err),
                }
            }

            "moves" => {
                let moves: Vec<String> = self
                    .game
                    .possible_moves()
                    .iter()
                    .map(|p| format!("{} {}", p.x, p.y))
                    .collect();
                (true, moves.join(", "))
            }

            "showboard" => (true, format!("\n{}", self.game)),

            "score" => (true, self.game.score().to_string()),

            "strategy" => match args.first().and_then(|s| Strategy::parse(s)) {
                Some(strategy) => {
                    self.engine.set_strategy(strategy.evaluator());
                    (true, String::new())
                }
                None => (false, "expected: strategy <piece|utility>".to_string()),
            },

            "algorithm" => match args.first().and_then(|s| Algorithm::parse(s)) {
                Some(algorithm) => {
                    self.engine.set_algorithm(algorithm);
                    (true, String::new())
                }
                None => (false, "expected: algorithm <minimax|alphabeta>".to_string()),
            },

            "depth" => match args.first().map(|s| s.parse::<u32>()) {
                Some(Ok(depth)) if (1..=MAX_DEPTH).contains(&depth) => {
                    self.engine.set_depth(depth);
                    (true, String::new())
                }
                _ => (false, format!("expected: depth <1..={MAX_DEPTH}>")),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// Turn a rule error into a failure response. Contract violations are
    /// logged since they mean the client ignored the game state.
    fn reject(&self, err: GameError) -> (bool, String) {
        if !err.is_recoverable() {
            warn!(%err, "command rejected");
        }
        (false, err.to_string())
    }
}

fn describe(outcome: MoveOutcome) -> String {
    match outcome {
        MoveOutcome::NextPlayer(color) => format!("{color} to move"),
        MoveOutcome::Pass { skipped } => format!("{skipped} passes"),
        MoveOutcome::GameOver(score) => match score.winner() {
            Some(winner) => format!("game over, {winner} wins, {score}"),
            None => format!("game over, tie, {score}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = Session::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = Session::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_run_skips_bare_ids_and_lowercases() {
        let mut session = Session::new();
        let mut output = Vec::new();
        session.run(&b"  42\n3 NAME\n"[..], &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "=3 othello-ai\n\n");
    }

    #[test]
    fn test_name_command() {
        let mut session = Session::new();
        let (success, response) = session.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "othello-ai");
    }

    #[test]
    fn test_known_command() {
        let mut session = Session::new();
        assert_eq!(session.execute("known_command", &["genmove"]), (true, "true".to_string()));
        assert_eq!(session.execute("known_command", &["undo"]), (true, "false".to_string()));
        assert!(!session.execute("known_command", &[]).0);
    }

    #[test]
    fn test_play_and_errors() {
        let mut session = Session::new();
        assert_eq!(
            session.execute("play", &["3", "2"]),
            (true, "white to move".to_string())
        );
        let (success, response) = session.execute("play", &["9", "9"]);
        assert!(!success);
        assert!(response.contains("off the board"), "{response}");
        let (success, response) = session.execute("play", &["0", "0"]);
        assert!(!success);
        assert!(response.contains("illegal move"), "{response}");
        assert!(!session.execute("play", &["x"]).0);
    }

    #[test]
    fn test_genmove_plays_for_side_to_move() {
        let mut session = Session::new();
        let (success, response) = session.execute("genmove", &[]);
        assert!(success);
        assert!(response.starts_with("2 3 nodes 36"), "{response}");
        assert_eq!(session.game().current_player(), crate::board::Color::White);
    }

    #[test]
    fn test_settings() {
        let mut session = Session::new();
        assert!(session.execute("strategy", &["utility"]).0);
        assert!(!session.execute("strategy", &["magic"]).0);
        assert!(session.execute("algorithm", &["minimax"]).0);
        assert!(session.execute("depth", &["2"]).0);
        assert!(!session.execute("depth", &["0"]).0);
        assert!(!session.execute("depth", &["99"]).0);
        let (_, response) = session.execute("genmove", &[]);
        assert!(response.contains("nodes 16"), "{response}");
    }

    #[test]
    fn test_newgame_sizes() {
        let mut session = Session::new();
        assert!(session.execute("newgame", &["6", "6"]).0);
        assert_eq!(session.game().board().width(), 6);
        assert!(!session.execute("newgame", &["5", "6"]).0);
        assert!(!session.execute("newgame", &["6"]).0);
        assert!(session.execute("newgame", &[]).0);
        assert_eq!(session.game().board().width(), 8);
    }

    #[test]
    fn test_run_loop() {
        let mut session = Session::new();
        let input = b"1 name\n# comment\n\nmoves\nquit\nname\n";
        let mut output = Vec::new();
        session.run(&input[..], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "=1 othello-ai\n\n= 2 3, 3 2, 4 5, 5 4\n\n= \n\n"
        );
    }
}
