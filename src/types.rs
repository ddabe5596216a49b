use serde::Serialize;

/// A token color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
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

    /// Returns the matching cell value.
    #[inline]
    pub fn cell(self) -> Cell {
        match self {
            Color::Black => Cell::Black,
            Color::White => Cell::White,
        }
    }
}

/// Content of one board cell.
///
/// `OutOfBounds` is never stored. It is what a board query returns for
/// coordinates off the board, so ray walks stop without separate bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cell {
    Empty,
    Black,
    White,
    OutOfBounds,
}

impl Cell {
    /// Returns the color occupying the cell, if any.
    #[inline]
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Black => Some(Color::Black),
            Cell::White => Some(Color::White),
            Cell::Empty | Cell::OutOfBounds => None,
        }
    }

    /// Character used by the flat and matrix formats.
    /// `OutOfBounds` has no character of its own and maps to `'x'`.
    pub fn to_char(self) -> char {
        match self {
            Cell::Black => 'b',
            Cell::White => 'w',
            Cell::Empty | Cell::OutOfBounds => 'x',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            'x' => Some(Cell::Empty),
            'b' => Some(Cell::Black),
            'w' => Some(Cell::White),
            _ => None,
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        color.cell()
    }
}

/// An immutable `(x, y, cell)` triple. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub x: i32,
    pub y: i32,
    pub cell: Cell,
}

impl Token {
    /// Sentinel for a position off the board.
    pub const OFF_BOARD: Token = Token {
        x: -1,
        y: -1,
        cell: Cell::OutOfBounds,
    };

    pub const fn new(x: i32, y: i32, cell: Cell) -> Self {
        Self { x, y, cell }
    }

    #[inline]
    pub fn is_off_board(&self) -> bool {
        self.cell == Cell::OutOfBounds
    }

    #[inline]
    pub fn color(&self) -> Option<Color> {
        self.cell.color()
    }
}

/// A participant: the color it plays plus a display name.
/// It carries no game progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    color: Color,
    name: String,
}

impl Player {
    pub fn new(color: Color, name: impl Into<String>) -> Self {
        Self {
            color,
            name: name.into(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The eight compass directions, 45° apart, starting east and going
/// counter-clockwise as drawn on screen (rows grow downwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// Returns `(dx, dy)`.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::NorthEast => (1, -1),
            Direction::North => (0, -1),
            Direction::NorthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::SouthWest => (-1, 1),
            Direction::South => (0, 1),
            Direction::SouthEast => (1, 1),
        }
    }

    /// Angle in degrees, counter-clockwise from east.
    pub const fn degrees(self) -> u16 {
        match self {
            Direction::East => 0,
            Direction::NorthEast => 45,
            Direction::North => 90,
            Direction::NorthWest => 135,
            Direction::West => 180,
            Direction::SouthWest => 225,
            Direction::South => 270,
            Direction::SouthEast => 315,
        }
    }
}

/// Plain snapshot of a game for front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    /// 64 characters, row-major, `x`/`b`/`w`.
    pub board: String,
    pub turn: u32,
    pub current_player: Color,
    pub black_count: u32,
    pub white_count: u32,
    pub is_game_over: bool,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// `None` on a draw.
    pub winner: Option<Color>,
    pub black_count: u32,
    pub white_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_are_spaced_45_degrees_counter_clockwise_from_east() {
        for (i, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(dir.degrees() as usize, i * 45);
        }
        assert_eq!(Direction::ALL[0].delta(), (1, 0));
        assert_eq!(Direction::ALL[2].delta(), (0, -1));
    }

    #[test]
    fn cell_chars_round_trip() {
        for cell in [Cell::Empty, Cell::Black, Cell::White] {
            assert_eq!(Cell::from_char(cell.to_char()), Some(cell));
        }
        assert_eq!(Cell::from_char('?'), None);
    }

    #[test]
    fn off_board_sentinel_has_no_color() {
        assert!(Token::OFF_BOARD.is_off_board());
        assert_eq!(Token::OFF_BOARD.color(), None);
        assert_eq!(Color::Black.opponent(), Color::White);
    }
}
