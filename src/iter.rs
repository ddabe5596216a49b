use crate::board::{BOARD_SIZE, NUM_SQUARES};

/// Row-major traversal of every `(x, y)` on the board.
///
/// Finite (64 items) and restartable through [`BoardIter::reset`].
#[derive(Debug, Clone, Default)]
pub struct BoardIter {
    pos: usize,
}

impl BoardIter {
    pub fn new() -> Self {
        Self { pos: 0 }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
    }
}

impl Iterator for BoardIter {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= NUM_SQUARES {
            return None;
        }
        let pos = self.pos;
        self.pos += 1;
        Some(((pos % BOARD_SIZE) as i32, (pos / BOARD_SIZE) as i32))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = NUM_SQUARES.saturating_sub(self.pos);
        (left, Some(left))
    }
}

impl ExactSizeIterator for BoardIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visits_all_squares_in_row_major_order() {
        let coords: Vec<_> = BoardIter::new().collect();

        assert_eq!(coords.len(), 64);
        assert_eq!(coords[0], (0, 0));
        assert_eq!(coords[1], (1, 0));
        assert_eq!(coords[8], (0, 1));
        assert_eq!(coords[63], (7, 7));
    }

    #[test]
    fn reset_restarts_traversal() {
        let mut it = BoardIter::new();
        assert_eq!(it.by_ref().count(), 64);
        assert_eq!(it.next(), None);

        it.reset();
        assert_eq!(it.len(), 64);
        assert_eq!(it.next(), Some((0, 0)));
    }
}
