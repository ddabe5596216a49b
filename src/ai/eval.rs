use crate::board::Board;
use crate::game::GameState;
use crate::types::Color;

/// Added (or subtracted) once the game is over, so finished wins and losses
/// dominate every mid-game score.
pub const END_GAME_BONUS: f64 = 100.0;
/// Token share above which a finished game counts as won.
pub const WIN_THRESHOLD: f64 = 0.5;
pub const CORNER_BONUS: f64 = 1.0;
pub const CORNER_NEIGHBOR_PENALTY: f64 = 0.25;

const CORNERS: [(i32, i32); 4] = [(0, 0), (7, 0), (0, 7), (7, 7)];

/// Orthogonal and diagonal neighbors of each corner.
const CORNER_NEIGHBORS: [(i32, i32); 12] = [
    (1, 0),
    (0, 1),
    (1, 1),
    (6, 0),
    (7, 1),
    (6, 1),
    (0, 6),
    (1, 7),
    (1, 6),
    (7, 6),
    (6, 7),
    (6, 6),
];

/// Static score of `state` from `engine`'s point of view.
pub fn evaluate(state: &GameState, engine: Color) -> f64 {
    evaluate_with(state, engine, state.is_end_game())
}

/// [`evaluate`] for callers that already know whether the game is over.
pub fn evaluate_with(state: &GameState, engine: Color, game_over: bool) -> f64 {
    let own = state.score(engine) as f64;
    let mut score = own / state.turn().max(1) as f64;

    if game_over {
        let total = (state.score(Color::Black) + state.score(Color::White)).max(1) as f64;
        if own / total > WIN_THRESHOLD {
            score += END_GAME_BONUS;
        } else {
            score -= END_GAME_BONUS;
        }
    }

    score + pivot_score(state.board(), engine)
}

/// Corner bonus minus corner-neighbor penalty for `color`'s tokens.
pub fn pivot_score(board: &Board, color: Color) -> f64 {
    let own = color.cell();
    let count = |squares: &[(i32, i32)]| {
        squares
            .iter()
            .filter(|&&(x, y)| board.cell(x, y) == own)
            .count() as f64
    };

    count(&CORNERS[..]) * CORNER_BONUS - count(&CORNER_NEIGHBORS[..]) * CORNER_NEIGHBOR_PENALTY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn state(flat: &str, to_move: Color) -> GameState {
        GameState::from_board(flat.parse().unwrap(), to_move)
    }

    const DIAGONAL_INTO_CORNER: &str = concat!(
        "xxxxxxxx", "xbxxxxxx", "xxwxxxxx", "xxxxxxxx", "xxwbxxxx", "xxxxxxxx", "xxxxxxxx",
        "xxxxxxxx",
    );

    #[test]
    fn opening_score_is_token_ratio() {
        let game = GameState::default();

        assert_eq!(evaluate(&game, Color::Black), 2.0);
        assert_eq!(evaluate(&game, Color::White), 2.0);
    }

    #[test]
    fn owning_the_corner_scores_higher() {
        let game = state(DIAGONAL_INTO_CORNER, Color::White);
        let (corner, _) = game.apply_move(0, 0, Color::White);
        let (center, _) = game.apply_move(4, 4, Color::White);

        assert_eq!(corner.score(Color::White), center.score(Color::White));
        let gain = evaluate(&corner, Color::White) - evaluate(&center, Color::White);
        assert!(gain >= CORNER_BONUS - CORNER_NEIGHBOR_PENALTY, "gain {gain}");
    }

    #[test]
    fn corner_neighbors_are_penalized() {
        let mut board = Board::new();
        board.set(Cell::Black, 1, 1).unwrap();
        board.set(Cell::Black, 6, 7).unwrap();
        board.set(Cell::Black, 7, 7).unwrap();

        let expected = CORNER_BONUS - 2.0 * CORNER_NEIGHBOR_PENALTY;
        assert_eq!(pivot_score(&board, Color::Black), expected);
        assert_eq!(pivot_score(&board, Color::White), 0.0);
    }

    #[test]
    fn finished_games_separate_winner_from_loser() {
        let game = state(&"b".repeat(64), Color::White);

        assert!(evaluate(&game, Color::Black) > END_GAME_BONUS);
        assert!(evaluate(&game, Color::White) < -END_GAME_BONUS / 2.0);
    }

    #[test]
    fn known_end_flag_matches_full_evaluation() {
        let over = state(&"b".repeat(64), Color::White);
        let opening = GameState::default();

        assert_eq!(evaluate_with(&over, Color::Black, true), evaluate(&over, Color::Black));
        assert_eq!(
            evaluate_with(&opening, Color::Black, false),
            evaluate(&opening, Color::Black)
        );
        assert_eq!(
            evaluate_with(&opening, Color::Black, true),
            evaluate(&opening, Color::Black) - END_GAME_BONUS
        );
    }
}
