use crate::board::{Board, NUM_SQUARES};
use crate::iter::BoardIter;
use crate::types::{Cell, Color, Direction, GameResult, GameView, Token};

/// Turn at which the board is full: 64 tokens minus the 3 that precede turn 1.
pub const MAX_TURN: u32 = (NUM_SQUARES - 3) as u32;

/// Tokens whose color changes as the consequence of one placement.
pub type FlipList = Vec<Token>;

/// The two mirror-symmetric four-token openings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Opening {
    /// Black on (3,3) and (4,4), White on (4,3) and (3,4).
    #[default]
    Standard,
    /// Colors swapped.
    Mirrored,
}

impl Opening {
    fn seeds(self) -> [(i32, i32, Color); 4] {
        let (diag, anti) = match self {
            Opening::Standard => (Color::Black, Color::White),
            Opening::Mirrored => (Color::White, Color::Black),
        };
        [(3, 3, diag), (4, 4, diag), (4, 3, anti), (3, 4, anti)]
    }
}

/// Board plus turn bookkeeping.
///
/// States are never mutated by a move: [`GameState::apply_move`] returns a
/// successor so the search can explore divergent futures from one ancestor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: u32,
    score_black: u32,
    score_white: u32,
    current_player: Color,
}

impl GameState {
    /// Seeds a new game with Black to move.
    pub fn new(opening: Opening) -> Self {
        Self::with_first_player(opening, Color::Black)
    }

    pub fn with_first_player(opening: Opening, first: Color) -> Self {
        let mut board = Board::new();
        for (x, y, color) in opening.seeds() {
            paint(&mut board, color.cell(), x, y);
        }
        Self::from_board(board, first)
    }

    /// Rebuilds turn and scores from an arbitrary board.
    pub fn from_board(board: Board, to_move: Color) -> Self {
        let mut state = Self {
            board,
            turn: 0,
            score_black: 0,
            score_white: 0,
            current_player: to_move,
        };
        state.recount();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn score(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.score_black,
            Color::White => self.score_white,
        }
    }

    /// Returns whether `color` may place a token at `(x, y)`.
    /// Off-board coordinates are never valid.
    pub fn is_valid_move(&self, x: i32, y: i32, color: Color) -> bool {
        if self.board.cell(x, y) != Cell::Empty {
            return false;
        }
        let origin = Token::new(x, y, color.cell());
        Direction::ALL
            .iter()
            .any(|&dir| !flips_from_path(&self.ray(origin, dir)).is_empty())
    }

    /// Every token flipped by `color` placing at `(x, y)`, grouped by direction
    /// in [`Direction::ALL`] order. Empty when the move is illegal.
    pub fn flip_tokens(&self, x: i32, y: i32, color: Color) -> FlipList {
        if self.board.cell(x, y) != Cell::Empty {
            return Vec::new();
        }
        let origin = Token::new(x, y, color.cell());
        let mut flips = Vec::new();
        for dir in Direction::ALL {
            flips.extend_from_slice(flips_from_path(&self.ray(origin, dir)));
        }
        flips
    }

    /// Places a token for `color` and returns the successor with its flip list.
    ///
    /// An illegal move yields an unchanged copy and an empty list; callers
    /// check the list rather than expecting an error.
    pub fn apply_move(&self, x: i32, y: i32, color: Color) -> (GameState, FlipList) {
        let flips = self.flip_tokens(x, y, color);
        if flips.is_empty() {
            return (self.clone(), flips);
        }

        let mut next = self.clone();
        paint(&mut next.board, color.cell(), x, y);
        for token in &flips {
            paint(&mut next.board, color.cell(), token.x, token.y);
        }
        next.turn += 1;
        next.recount();
        next.current_player = next.next_to_move(color);

        (next, flips)
    }

    /// Hands the move to the opponent without placing a token.
    pub fn pass(&self) -> GameState {
        let mut next = self.clone();
        next.current_player = self.current_player.opponent();
        next
    }

    /// Every legal placement for `color`, row-major.
    pub fn allowed_moves(&self, color: Color) -> Vec<Token> {
        BoardIter::new()
            .filter(|&(x, y)| self.is_valid_move(x, y, color))
            .map(|(x, y)| Token::new(x, y, color.cell()))
            .collect()
    }

    /// Returns whether `color` has at least one legal move.
    pub fn is_valid_player(&self, color: Color) -> bool {
        BoardIter::new().any(|(x, y)| self.is_valid_move(x, y, color))
    }

    /// The board is full, or neither color can move.
    pub fn is_end_game(&self) -> bool {
        self.turn >= MAX_TURN
            || (!self.is_valid_player(Color::Black) && !self.is_valid_player(Color::White))
    }

    /// Leading color, `None` on a tie.
    pub fn winner(&self) -> Option<Color> {
        match self.score_black.cmp(&self.score_white) {
            std::cmp::Ordering::Greater => Some(Color::Black),
            std::cmp::Ordering::Less => Some(Color::White),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn result(&self) -> GameResult {
        GameResult {
            winner: self.winner(),
            black_count: self.score_black,
            white_count: self.score_white,
        }
    }

    pub fn view(&self) -> GameView {
        GameView {
            board: self.board.to_flat_string(),
            turn: self.turn,
            current_player: self.current_player,
            black_count: self.score_black,
            white_count: self.score_white,
            is_game_over: self.is_end_game(),
        }
    }

    /// The opponent moves next unless it has to pass.
    fn next_to_move(&self, mover: Color) -> Color {
        let opponent = mover.opponent();
        if !self.is_valid_player(opponent) && self.is_valid_player(mover) {
            mover
        } else {
            opponent
        }
    }

    fn recount(&mut self) {
        self.score_black = self.board.count_of(Cell::Black);
        self.score_white = self.board.count_of(Cell::White);
        self.turn = (self.score_black + self.score_white).saturating_sub(3);
    }

    /// Contiguous tokens from `origin` outwards. Stops before the board edge
    /// and right after the first empty cell.
    fn ray(&self, origin: Token, dir: Direction) -> Vec<Token> {
        let mut path = vec![origin];
        let (mut x, mut y) = (origin.x, origin.y);
        loop {
            let next = self.board.adjacent(x, y, dir);
            if next.is_off_board() {
                break;
            }
            path.push(next);
            if next.cell == Cell::Empty {
                break;
            }
            x = next.x;
            y = next.y;
        }
        path
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Opening::Standard)
    }
}

/// Tokens captured along one ray.
///
/// `path[0]` is the placement. The run of opposing tokens starting at index 1
/// is captured when it is closed by a token of the placing color; the first
/// closing token wins and anything past it is ignored.
pub fn flips_from_path(path: &[Token]) -> &[Token] {
    let Some(mine) = path.first().and_then(Token::color) else {
        return &[];
    };
    for (end, token) in path.iter().enumerate().skip(1) {
        match token.color() {
            Some(color) if color == mine => {
                return if end > 1 { &path[1..end] } else { &[] };
            }
            Some(_) => continue,
            None => return &[],
        }
    }
    &[]
}

fn paint(board: &mut Board, cell: Cell, x: i32, y: i32) {
    if let Err(err) = board.set(cell, x, y) {
        unreachable!("validated placement rejected by board: {err}");
    }
}
