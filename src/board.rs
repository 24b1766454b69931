use std::fmt;

/// Side to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.pad("black"),
            Color::White => f.pad("white"),
        }
    }
}

/// State of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Black,
    White,
    Empty,
    /// Permanently unplayable. Captures cannot cross it.
    Hole,
}

impl Field {
    pub fn color(self) -> Option<Color> {
        match self {
            Field::Black => Some(Color::Black),
            Field::White => Some(Color::White),
            Field::Empty | Field::Hole => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            Field::Black => 'X',
            Field::White => 'O',
            Field::Empty => '.',
            Field::Hole => '#',
        }
    }
}

impl From<Color> for Field {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Field::Black,
            Color::White => Field::White,
        }
    }
}

/// A board coordinate: `x` is the column, `y` the row.
///
/// Moves are enumerated column by column: `x` is the outer loop and `y` the
/// inner one, so `(2, 3)` comes before `(3, 2)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position one step away in direction `(dx, dy)`.
    #[inline]
    pub fn step(self, (dx, dy): (isize, isize)) -> Self {
        Self {
            x: self.x + dx as i32,
            y: self.y + dy as i32,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rectangular grid of fields.
///
/// Dimensions are fixed at construction. Cloning a board copies every cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Field>,
}

impl Board {
    /// An all-empty board.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Field::Empty; width * height],
        }
    }

    /// An empty board with the given cells knocked out as holes.
    /// Positions off the board are ignored.
    pub fn with_holes(width: usize, height: usize, holes: &[Position]) -> Self {
        let mut board = Self::new(width, height);
        for &pos in holes {
            board.set(pos, Field::Hole);
        }
        board
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    fn idx(&self, pos: Position) -> usize {
        pos.y as usize * self.width + pos.x as usize
    }

    /// Field at `pos`, or `None` when `pos` lies off the board.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Field> {
        if !self.contains(pos) {
            return None;
        }
        Some(self.cells[self.idx(pos)])
    }

    /// Overwrite the field at `pos`. Returns false (and changes nothing) when
    /// `pos` lies off the board.
    pub fn set(&mut self, pos: Position, field: Field) -> bool {
        if !self.contains(pos) {
            return false;
        }
        let i = self.idx(pos);
        self.cells[i] = field;
        true
    }

    /// Every position, `x` outer and `y` inner.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let h = self.height as i32;
        (0..self.width as i32).flat_map(move |x| (0..h).map(move |y| Position::new(x, y)))
    }

    /// The four extreme cells.
    pub fn corners(&self) -> [Position; 4] {
        let (r, b) = (self.width as i32 - 1, self.height as i32 - 1);
        [
            Position::new(0, 0),
            Position::new(r, 0),
            Position::new(0, b),
            Position::new(r, b),
        ]
    }

    pub fn count(&self, field: Field) -> usize {
        self.cells.iter().filter(|&&f| f == field).count()
    }

    /// Copy this board, reporting allocation failure instead of aborting.
    pub(crate) fn try_clone(&self) -> Option<Self> {
        let mut cells = Vec::new();
        cells.try_reserve_exact(self.cells.len()).ok()?;
        cells.extend_from_slice(&self.cells);
        Some(Self {
            width: self.width,
            height: self.height,
            cells,
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for x in 0..self.width {
            write!(f, "{x:>2}")?;
        }
        writeln!(f)?;
        for y in 0..self.height {
            write!(f, "{y:>2}")?;
            for x in 0..self.width {
                let ch = self.cells[y * self.width + x].symbol();
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(8, 6);
        assert_eq!(board.width(), 8);
        assert_eq!(board.height(), 6);
        assert_eq!(board.count(Field::Empty), 48);
    }

    #[test]
    fn test_get_off_board() {
        let board = Board::new(8, 8);
        assert_eq!(board.get(Position::new(-1, 0)), None);
        assert_eq!(board.get(Position::new(0, 8)), None);
        assert_eq!(board.get(Position::new(7, 7)), Some(Field::Empty));
    }

    #[test]
    fn test_set_off_board_is_rejected() {
        let mut board = Board::new(4, 4);
        assert!(!board.set(Position::new(4, 0), Field::Black));
        assert!(board.set(Position::new(3, 0), Field::Black));
        assert_eq!(board.count(Field::Black), 1);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut a = Board::new(4, 4);
        let b = a.clone();
        a.set(Position::new(1, 1), Field::White);
        assert_eq!(b.get(Position::new(1, 1)), Some(Field::Empty));
    }

    #[test]
    fn test_positions_scan_x_first() {
        let board = Board::new(3, 2);
        let order: Vec<_> = board.positions().map(|p| (p.x, p.y)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_with_holes() {
        let board = Board::with_holes(4, 4, &[Position::new(0, 0), Position::new(9, 9)]);
        assert_eq!(board.get(Position::new(0, 0)), Some(Field::Hole));
        assert_eq!(board.count(Field::Hole), 1);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(3, 2);
        board.set(Position::new(0, 0), Field::Black);
        board.set(Position::new(1, 1), Field::White);
        board.set(Position::new(2, 1), Field::Hole);
        assert_eq!(board.to_string(), "   0 1 2\n 0 X . .\n 1 . O #\n");
    }
}
