pub mod eval;
pub mod search;
pub mod tuning;

pub use search::{NodeStatus, SearchEngine, SearchParams, SearchReport};
pub use tuning::{TuningRow, TuningTable, TurnRange};
