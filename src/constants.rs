//! Constants for board geometry, search parameters and heuristic weights.

// =============================================================================
// Board Geometry
// =============================================================================

/// Width of the standard Othello board.
pub const BOARD_WIDTH: usize = 8;

/// Height of the standard Othello board.
pub const BOARD_HEIGHT: usize = 8;

/// Smallest board edge that still fits the four-piece opening plus a ring of
/// empty cells around it.
pub const MIN_BOARD_EDGE: usize = 4;

/// Largest board edge accepted by [`GameState::with_size`](crate::game::GameState::with_size).
pub const MAX_BOARD_EDGE: usize = 26;

/// Unit steps towards the 8 compass neighbors, as `(dx, dy)`.
/// Order: NW, N, NE, W, E, SW, S, SE
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1), // NW
    (0, -1),  // N
    (1, -1),  // NE
    (-1, 0),  // W
    (1, 0),   // E
    (-1, 1),  // SW
    (0, 1),   // S
    (1, 1),   // SE
];

// =============================================================================
// Search Parameters
// =============================================================================

/// Default search depth in plies.
pub const DEFAULT_DEPTH: u32 = 3;

/// Deepest search the command-line front ends accept.
pub const MAX_DEPTH: u32 = 8;

// =============================================================================
// Utility Heuristic Weights
// =============================================================================

/// Weight of the mobility component.
pub const MOBILITY_WEIGHT: i32 = 80;

/// Weight of the coin parity component.
pub const PARITY_WEIGHT: i32 = 10;

/// Weight of the captured corners component.
pub const CORNER_WEIGHT: i32 = 800;

/// Weight of the weighted positions component.
pub const POSITION_WEIGHT: i32 = 10;

/// Value of a single corner in the captured corners component.
pub const CORNER_VALUE: i32 = 25;

/// Static value of every cell on an 8x8 board.
///
/// Corners score highest; the cells next to a corner score lowest.
pub const POSITION_WEIGHTS: [[i32; 8]; 8] = [
    [20, -3, 11, 8, 8, 11, -3, 20],
    [-3, -7, -4, 1, 1, -4, -7, -3],
    [11, -4, 2, 2, 2, 2, -4, 11],
    [8, 1, 2, -3, -3, 2, 1, 8],
    [8, 1, 2, -3, -3, 2, 1, 8],
    [11, -4, 2, 2, 2, 2, -4, 11],
    [-3, -7, -4, 1, 1, -4, -7, -3],
    [20, -3, 11, 8, 8, 11, -3, 20],
];
