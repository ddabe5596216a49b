use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::error::BoardError;
use crate::iter::BoardIter;
use crate::types::{Cell, Direction, Token};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const CELLS_PER_BYTE: usize = 4;
const BITS_PER_CELL: usize = 2;
pub const PACKED_LEN: usize = NUM_SQUARES / CELLS_PER_BYTE;
const CELL_MASK: u8 = 0b11;

const EMPTY_BITS: u8 = 0b00;
const BLACK_BITS: u8 = 0b01;
const WHITE_BITS: u8 = 0b10;

/// Byte holding each square, indexed by `y * 8 + x`.
static BYTE_INDEX: Lazy<[usize; NUM_SQUARES]> = Lazy::new(|| {
    let mut table = [0usize; NUM_SQUARES];
    for (pos, entry) in table.iter_mut().enumerate() {
        *entry = pos / CELLS_PER_BYTE;
    }
    table
});

/// Bit offset of each square inside its byte.
static BIT_SHIFT: Lazy<[u8; NUM_SQUARES]> = Lazy::new(|| {
    let mut table = [0u8; NUM_SQUARES];
    for (pos, entry) in table.iter_mut().enumerate() {
        *entry = ((pos % CELLS_PER_BYTE) * BITS_PER_CELL) as u8;
    }
    table
});

/// 8x8 board packed at 2 bits per cell, 4 cells per byte.
///
/// Only the three on-board cell values are ever stored; the fourth bit
/// pattern is rejected by [`Board::from_packed`] and never produced by
/// [`Board::set`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [u8; PACKED_LEN],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [0u8; PACKED_LEN],
        }
    }

    /// Returns the token at `(x, y)`, or [`Token::OFF_BOARD`] when the
    /// coordinates are outside the board.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Token {
        match square(x, y) {
            Some(pos) => Token::new(x, y, self.cell_at(pos)),
            None => Token::OFF_BOARD,
        }
    }

    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        square(x, y).map_or(Cell::OutOfBounds, |pos| self.cell_at(pos))
    }

    /// Writes one cell.
    pub fn set(&mut self, cell: Cell, x: i32, y: i32) -> Result<(), BoardError> {
        let pos = square(x, y).ok_or(BoardError::OutOfRange { x, y })?;
        let bits = match cell {
            Cell::Empty => EMPTY_BITS,
            Cell::Black => BLACK_BITS,
            Cell::White => WHITE_BITS,
            Cell::OutOfBounds => return Err(BoardError::Unstorable(cell)),
        };
        let idx = BYTE_INDEX[pos];
        let shift = BIT_SHIFT[pos];
        self.cells[idx] = (self.cells[idx] & !(CELL_MASK << shift)) | (bits << shift);
        Ok(())
    }

    /// Counts cells holding `cell` by scanning the packed bytes.
    pub fn count_of(&self, cell: Cell) -> u32 {
        let target = match cell {
            Cell::Empty => EMPTY_BITS,
            Cell::Black => BLACK_BITS,
            Cell::White => WHITE_BITS,
            Cell::OutOfBounds => return 0,
        };
        self.cells
            .iter()
            .map(|&byte| {
                (0..CELLS_PER_BYTE)
                    .filter(|i| (byte >> (i * BITS_PER_CELL)) & CELL_MASK == target)
                    .count() as u32
            })
            .sum()
    }

    /// Neighbor of `(x, y)` one step along `direction`.
    #[inline]
    pub fn adjacent(&self, x: i32, y: i32, direction: Direction) -> Token {
        let (dx, dy) = direction.delta();
        self.get(x + dx, y + dy)
    }

    /// All 64 tokens in row-major order.
    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        BoardIter::new().map(move |(x, y)| self.get(x, y))
    }

    /// Raw packed bytes.
    pub fn packed(&self) -> [u8; PACKED_LEN] {
        self.cells
    }

    /// Rebuilds a board from packed bytes, rejecting the unused bit pattern.
    pub fn from_packed(cells: [u8; PACKED_LEN]) -> Result<Self, BoardError> {
        for pos in 0..NUM_SQUARES {
            let bits = (cells[BYTE_INDEX[pos]] >> BIT_SHIFT[pos]) & CELL_MASK;
            if bits == CELL_MASK {
                return Err(BoardError::Corrupt { index: pos, bits });
            }
        }
        Ok(Self { cells })
    }

    /// 64 characters, row-major, no separators.
    pub fn to_flat_string(&self) -> String {
        self.tokens().map(|t| t.cell.to_char()).collect()
    }

    pub fn from_flat_string(flat: &str) -> Result<Self, BoardError> {
        let chars: Vec<char> = flat.chars().collect();
        if chars.len() != NUM_SQUARES {
            return Err(BoardError::InvalidLength {
                expected: NUM_SQUARES,
                found: chars.len(),
            });
        }

        let mut board = Self::new();
        for (pos, (c, (x, y))) in chars.into_iter().zip(BoardIter::new()).enumerate() {
            let cell = Cell::from_char(c).ok_or(BoardError::InvalidChar {
                index: pos,
                found: c,
            })?;
            board.set(cell, x, y)?;
        }
        Ok(board)
    }

    /// Rows of characters, indexed `[y][x]`.
    pub fn to_char_matrix(&self) -> [[char; BOARD_SIZE]; BOARD_SIZE] {
        let mut matrix = [['x'; BOARD_SIZE]; BOARD_SIZE];
        for token in self.tokens() {
            matrix[token.y as usize][token.x as usize] = token.cell.to_char();
        }
        matrix
    }

    pub fn from_char_matrix(matrix: &[[char; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self, BoardError> {
        let mut board = Self::new();
        for (x, y) in BoardIter::new() {
            let c = matrix[y as usize][x as usize];
            let cell = Cell::from_char(c).ok_or(BoardError::InvalidChar {
                index: y as usize * BOARD_SIZE + x as usize,
                found: c,
            })?;
            board.set(cell, x, y)?;
        }
        Ok(board)
    }

    /// Rows of tokens, indexed `[y][x]`.
    pub fn to_token_matrix(&self) -> [[Token; BOARD_SIZE]; BOARD_SIZE] {
        let mut matrix = [[Token::OFF_BOARD; BOARD_SIZE]; BOARD_SIZE];
        for token in self.tokens() {
            matrix[token.y as usize][token.x as usize] = token;
        }
        matrix
    }

    #[inline]
    fn cell_at(&self, pos: usize) -> Cell {
        decode((self.cells[BYTE_INDEX[pos]] >> BIT_SHIFT[pos]) & CELL_MASK)
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_flat_string(s)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board").field(&self.to_flat_string()).finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_char_matrix() {
            let line: String = row.iter().collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[inline]
fn square(x: i32, y: i32) -> Option<usize> {
    let size = BOARD_SIZE as i32;
    if (0..size).contains(&x) && (0..size).contains(&y) {
        Some(y as usize * BOARD_SIZE + x as usize)
    } else {
        None
    }
}

#[inline]
fn decode(bits: u8) -> Cell {
    match bits {
        EMPTY_BITS => Cell::Empty,
        BLACK_BITS => Cell::Black,
        WHITE_BITS => Cell::White,
        _ => unreachable!("corrupt packed cell bits: {bits:#04b}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = concat!(
        "bxxxxxxx", "xwxxxxxx", "xxwwbxxx", "xxxwwxxx", "xxxbbbxx", "xxxxxwwx", "xxxxxbwx",
        "xxxxxbwb",
    );

    #[test]
    fn t01_packs_into_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<Board>(), 16);
    }

    #[test]
    fn t02_set_then_get_returns_written_cell() {
        let mut board = Board::new();
        board.set(Cell::White, 5, 2).unwrap();
        board.set(Cell::Black, 6, 2).unwrap();

        assert_eq!(board.get(5, 2), Token::new(5, 2, Cell::White));
        assert_eq!(board.get(6, 2).cell, Cell::Black);
        assert_eq!(board.get(4, 2).cell, Cell::Empty);

        board.set(Cell::Empty, 5, 2).unwrap();
        assert_eq!(board.cell(5, 2), Cell::Empty);
        assert_eq!(board.cell(6, 2), Cell::Black);
    }

    #[test]
    fn t03_get_off_board_returns_sentinel() {
        let board = Board::new();

        assert_eq!(board.get(-1, 0), Token::OFF_BOARD);
        assert_eq!(board.get(0, 8), Token::OFF_BOARD);
        assert_eq!(board.cell(8, 8), Cell::OutOfBounds);
    }

    #[test]
    fn t04_set_off_board_is_an_error() {
        let mut board = Board::new();

        assert_eq!(
            board.set(Cell::Black, 8, 0),
            Err(BoardError::OutOfRange { x: 8, y: 0 })
        );
        assert_eq!(
            board.set(Cell::OutOfBounds, 0, 0),
            Err(BoardError::Unstorable(Cell::OutOfBounds))
        );
    }

    #[test]
    fn t05_count_of_scans_every_cell() {
        let board: Board = SAMPLE.parse().unwrap();

        assert_eq!(board.count_of(Cell::Black), 8);
        assert_eq!(board.count_of(Cell::White), 9);
        assert_eq!(board.count_of(Cell::Empty), 47);
        assert_eq!(board.count_of(Cell::OutOfBounds), 0);
    }

    #[test]
    fn t06_adjacent_follows_compass_directions() {
        let board: Board = SAMPLE.parse().unwrap();

        assert_eq!(board.adjacent(0, 0, Direction::SouthEast).cell, Cell::White);
        assert_eq!(board.adjacent(0, 0, Direction::North), Token::OFF_BOARD);
        assert_eq!(board.adjacent(3, 2, Direction::East), Token::new(4, 2, Cell::Black));
        assert_eq!(board.adjacent(4, 3, Direction::NorthWest), Token::new(3, 2, Cell::White));
    }

    #[test]
    fn t07_flat_and_matrix_forms_round_trip() {
        let board: Board = SAMPLE.parse().unwrap();

        assert_eq!(board.to_flat_string(), SAMPLE);
        assert_eq!(Board::from_char_matrix(&board.to_char_matrix()).unwrap(), board);
        assert_eq!(Board::from_packed(board.packed()).unwrap(), board);

        let tokens = board.to_token_matrix();
        assert_eq!(tokens[7][7], Token::new(7, 7, Cell::Black));
        assert_eq!(tokens[1][1].cell, Cell::White);
    }

    #[test]
    fn t08_from_flat_string_rejects_bad_input() {
        assert_eq!(
            Board::from_flat_string("bw"),
            Err(BoardError::InvalidLength {
                expected: 64,
                found: 2
            })
        );

        let bad = format!("{}q", &SAMPLE[..63]);
        assert_eq!(
            Board::from_flat_string(&bad),
            Err(BoardError::InvalidChar {
                index: 63,
                found: 'q'
            })
        );
    }

    #[test]
    fn t09_from_packed_rejects_unused_bit_pattern() {
        let mut cells = [0u8; PACKED_LEN];
        cells[2] = 0b0011_0000;

        assert_eq!(
            Board::from_packed(cells),
            Err(BoardError::Corrupt { index: 10, bits: 0b11 })
        );
    }

    #[test]
    fn t10_display_prints_one_row_per_line() {
        let board: Board = SAMPLE.parse().unwrap();
        let text = board.to_string();

        assert_eq!(text.lines().count(), 8);
        assert_eq!(text.lines().next(), Some("bxxxxxxx"));
    }
}
