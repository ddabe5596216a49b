//! Per-turn search parameters.
//!
//! A table is an ordered list of rows `depth,alpha,beta,range,difficulty`.
//! The first row whose difficulty matches and whose turn range contains the
//! current turn drives the search for that turn.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::TuningError;
use crate::game::MAX_TURN;

const FIELDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bound {
    value: u32,
    inclusive: bool,
}

/// Interval of turns written as `[lo:hi)`, `(lo:hi]`, and so on.
/// `[`/`]` include the bound, `(`/`)` exclude it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnRange {
    lower: Bound,
    upper: Bound,
}

impl TurnRange {
    pub fn new(lower: u32, lower_inclusive: bool, upper: u32, upper_inclusive: bool) -> Self {
        Self {
            lower: Bound {
                value: lower,
                inclusive: lower_inclusive,
            },
            upper: Bound {
                value: upper,
                inclusive: upper_inclusive,
            },
        }
    }

    pub fn parse(expr: &str) -> Result<Self, TuningError> {
        let invalid = || TuningError::InvalidRange(expr.to_string());
        let trimmed = expr.trim();

        let lower_inclusive = match trimmed.chars().next() {
            Some('[') => true,
            Some('(') => false,
            _ => return Err(invalid()),
        };
        let upper_inclusive = match trimmed.chars().last() {
            Some(']') => true,
            Some(')') => false,
            _ => return Err(invalid()),
        };
        let inner = &trimmed[1..trimmed.len() - 1];
        let (lo, hi) = inner.split_once(':').ok_or_else(invalid)?;
        let lower = lo.trim().parse::<u32>().map_err(|_| invalid())?;
        let upper = hi.trim().parse::<u32>().map_err(|_| invalid())?;

        Ok(Self::new(lower, lower_inclusive, upper, upper_inclusive))
    }

    pub fn contains(&self, turn: u32) -> bool {
        let above = if self.lower.inclusive {
            turn >= self.lower.value
        } else {
            turn > self.lower.value
        };
        let below = if self.upper.inclusive {
            turn <= self.upper.value
        } else {
            turn < self.upper.value
        };
        above && below
    }
}

impl FromStr for TurnRange {
    type Err = TuningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TurnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.lower.inclusive { '[' } else { '(' };
        let close = if self.upper.inclusive { ']' } else { ')' };
        write!(f, "{open}{}:{}{close}", self.lower.value, self.upper.value)
    }
}

/// One line of the tuning table.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningRow {
    pub depth: u32,
    pub alpha: f64,
    pub beta: f64,
    pub turns: TurnRange,
    pub difficulty: u8,
}

impl TuningRow {
    fn parse(line_no: usize, line: &str) -> Result<Self, TuningError> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != FIELDS {
            return Err(TuningError::Parse {
                line: line_no,
                message: format!("expected {FIELDS} fields, got {}", fields.len()),
            });
        }

        let field_err = |name: &str, value: &str| TuningError::Parse {
            line: line_no,
            message: format!("invalid {name} '{value}'"),
        };

        Ok(Self {
            depth: fields[0].parse().map_err(|_| field_err("depth", fields[0]))?,
            alpha: fields[1].parse().map_err(|_| field_err("alpha", fields[1]))?,
            beta: fields[2].parse().map_err(|_| field_err("beta", fields[2]))?,
            turns: TurnRange::parse(fields[3])?,
            difficulty: fields[4]
                .parse()
                .map_err(|_| field_err("difficulty", fields[4]))?,
        })
    }
}

/// Validated tuning table: every difficulty it mentions has a row for every
/// turn up to [`MAX_TURN`].
#[derive(Debug, Clone, PartialEq)]
pub struct TuningTable {
    rows: Vec<TuningRow>,
}

impl TuningTable {
    pub fn new(rows: Vec<TuningRow>) -> Result<Self, TuningError> {
        let table = Self { rows };
        table.validate()?;
        Ok(table)
    }

    /// Parses comma-separated rows. Blank lines, `#` comments and a header
    /// line starting with `depth` are skipped.
    pub fn parse(text: &str) -> Result<Self, TuningError> {
        let mut rows = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with("depth") {
                continue;
            }
            rows.push(TuningRow::parse(idx + 1, line)?);
        }
        Self::new(rows)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn rows(&self) -> &[TuningRow] {
        &self.rows
    }

    pub fn difficulties(&self) -> BTreeSet<u8> {
        self.rows.iter().map(|row| row.difficulty).collect()
    }

    /// First row matching both `difficulty` and `turn`.
    pub fn lookup(&self, difficulty: u8, turn: u32) -> Option<&TuningRow> {
        self.rows
            .iter()
            .find(|row| row.difficulty == difficulty && row.turns.contains(turn))
    }

    /// Probes every `(difficulty, turn)` pair and fails on the first gap.
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.rows.is_empty() {
            return Err(TuningError::Empty);
        }
        for difficulty in self.difficulties() {
            for turn in 1..=MAX_TURN {
                if self.lookup(difficulty, turn).is_none() {
                    return Err(TuningError::MissingRow { difficulty, turn });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
depth,alpha,beta,range,difficulty
# easy
2,-inf,inf,[1:61],1
# hard: shallow opening, deep endgame
3,-inf,inf,[1:20),2
5,-inf,inf,[20:50],2
8,-1000,1000,(50:61],2
";

    #[test]
    fn range_bounds_respect_brackets() {
        let range = TurnRange::parse("(1:5]").unwrap();

        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(5));
        assert!(!range.contains(6));

        let half_open: TurnRange = "[10:20)".parse().unwrap();
        assert!(half_open.contains(10));
        assert!(!half_open.contains(20));
        assert_eq!(half_open.to_string(), "[10:20)");
    }

    #[test]
    fn malformed_ranges_are_rejected() {
        for expr in ["1:5", "[1:5", "(1-5)", "[a:5]", "[", ""] {
            assert!(
                matches!(TurnRange::parse(expr), Err(TuningError::InvalidRange(_))),
                "{expr}"
            );
        }
    }

    #[test]
    fn lookup_returns_first_matching_row() {
        let table = TuningTable::parse(TABLE).unwrap();

        assert_eq!(table.rows().len(), 4);
        assert_eq!(table.lookup(1, 30).unwrap().depth, 2);
        assert_eq!(table.lookup(2, 19).unwrap().depth, 3);
        assert_eq!(table.lookup(2, 20).unwrap().depth, 5);
        assert_eq!(table.lookup(2, 50).unwrap().depth, 5);
        assert_eq!(table.lookup(2, 51).unwrap().depth, 8);
        assert_eq!(table.lookup(2, 51).unwrap().alpha, -1000.0);
        assert!(table.lookup(3, 10).is_none());
    }

    #[test]
    fn gap_in_turns_fails_validation() {
        let text = "3,-inf,inf,[1:20),1\n5,-inf,inf,(20:61],1\n";

        let err = TuningTable::parse(text).unwrap_err();

        assert!(matches!(
            err,
            TuningError::MissingRow {
                difficulty: 1,
                turn: 20
            }
        ));
    }

    #[test]
    fn bad_rows_report_line_number() {
        let err = TuningTable::parse("depth,alpha,beta,range,difficulty\n2,x,inf,[1:61],1\n")
            .unwrap_err();
        assert!(matches!(err, TuningError::Parse { line: 2, .. }));

        let err = TuningTable::parse("2,0,1,[1:61]\n").unwrap_err();
        assert!(matches!(err, TuningError::Parse { line: 1, .. }));

        assert!(matches!(TuningTable::parse("# nothing\n"), Err(TuningError::Empty)));
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join(format!("othello-tuning-{}.csv", std::process::id()));
        std::fs::write(&path, TABLE).unwrap();

        let table = TuningTable::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(table.difficulties().into_iter().collect::<Vec<_>>(), vec![1, 2]);
        assert!(matches!(
            TuningTable::load(&path),
            Err(TuningError::Io(_))
        ));
    }
}
