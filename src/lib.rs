//! Othello board engine and search AI.
//!
//! - [`board`]: 2-bit packed 8x8 board with flat-string and matrix formats
//! - [`game`]: move legality, flips and turn bookkeeping on immutable states
//! - [`ai`]: parallel time-bounded alpha-beta search and its tuning table

pub mod ai;
pub mod board;
pub mod error;
pub mod game;
pub mod iter;
pub mod logging;
pub mod types;
pub mod wasm;

pub use ai::{SearchEngine, SearchParams, SearchReport, TuningTable};
pub use board::Board;
pub use error::{BoardError, TuningError};
pub use game::{FlipList, GameState, MAX_TURN, Opening, flips_from_path};
pub use iter::BoardIter;
pub use logging::Logger;
pub use types::{Cell, Color, Direction, GameResult, GameView, Player, Token};
