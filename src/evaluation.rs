//! Static evaluation of a position at the search horizon
//!
//! Every maximal run of same-coloured tokens along one of the four line
//! directions is scored once. A run of `k` tokens that can still grow is
//! worth `10^(k-1) / 10`, positive for the evaluating player and negative
//! for the opponent. A run that reaches the connect length ends the
//! evaluation, the position is a finished game.

use crate::board::{Board, Player};

/// Position desirability, higher is better for the evaluating player
pub type Score = f64;

/// A line direction as (Δrow, Δcolumn), rows counted upwards from the floor
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Direction {
    pub d_row: isize,
    pub d_column: isize,
}

pub const VERTICAL: Direction = Direction { d_row: 1, d_column: 0 };
pub const HORIZONTAL: Direction = Direction { d_row: 0, d_column: 1 };
pub const DIAGONAL_ASCENDING: Direction = Direction { d_row: 1, d_column: 1 };
pub const DIAGONAL_DESCENDING: Direction = Direction { d_row: -1, d_column: 1 };

pub const DIRECTIONS: [Direction; 4] = [
    VERTICAL,
    HORIZONTAL,
    DIAGONAL_ASCENDING,
    DIAGONAL_DESCENDING,
];

/// The score of a completed line of `connect_length` tokens
pub fn win_score(connect_length: usize) -> Score {
    run_score(connect_length)
}

/// The score of an open run of `length` tokens
pub fn run_score(length: usize) -> Score {
    10f64.powi(length as i32 - 1) / 10.0
}

/// Scores `board` from the point of view of `player`
pub fn evaluate<B: Board>(board: &B, player: Player) -> Score {
    let score = match scan(board) {
        Scan::Won(Player::One) => win_score(board.connect_length()),
        Scan::Won(Player::Two) => -win_score(board.connect_length()),
        Scan::Open(score) => score,
    };
    match player {
        Player::One => score,
        Player::Two => -score,
    }
}

/// Returns the owner of a line of at least `connect_length` tokens, if any
pub fn completed_line<B: Board>(board: &B) -> Option<Player> {
    match scan(board) {
        Scan::Won(player) => Some(player),
        Scan::Open(_) => None,
    }
}

enum Scan {
    Won(Player),
    // relative to the first player
    Open(Score),
}

fn scan<B: Board>(board: &B) -> Scan {
    let mut total = 0.0;
    for direction in DIRECTIONS.iter() {
        for row in 0..board.height() {
            for column in 0..board.width() {
                let run = match measure_run(board, row, column, *direction) {
                    Some(run) => run,
                    None => continue,
                };
                if run.length >= board.connect_length() {
                    return Scan::Won(run.owner);
                }
                if !run.extendable {
                    continue;
                }
                match run.owner {
                    Player::One => total += run_score(run.length),
                    Player::Two => total -= run_score(run.length),
                }
            }
        }
    }
    Scan::Open(total)
}

struct Run {
    owner: Player,
    length: usize,
    // an end of the run is a cell a token could be dropped into next
    extendable: bool,
}

/// Measures the run that starts at (`row`, `column`) in `direction`
///
/// Returns `None` for empty cells and for cells whose predecessor in
/// `direction` belongs to the same player, those runs are measured from
/// their leading cell instead.
fn measure_run<B: Board>(
    board: &B,
    row: usize,
    column: usize,
    direction: Direction,
) -> Option<Run> {
    let owner = board.cell(row, column).owner()?;
    if let Some((prev_row, prev_column)) = step(board, row, column, direction, -1) {
        if board.cell(prev_row, prev_column).owner() == Some(owner) {
            return None;
        }
    }

    let mut length = 1;
    let (mut end_row, mut end_column) = (row, column);
    let mut after = step(board, row, column, direction, 1);
    while let Some((next_row, next_column)) = after {
        if board.cell(next_row, next_column).owner() != Some(owner) {
            break;
        }
        length += 1;
        end_row = next_row;
        end_column = next_column;
        after = step(board, end_row, end_column, direction, 1);
    }

    let before = step(board, row, column, direction, -1);
    let extendable = [before, after]
        .iter()
        .flatten()
        .any(|&(r, c)| is_extension_point(board, r, c));

    Some(Run {
        owner,
        length,
        extendable,
    })
}

/// An empty cell that the next token dropped into its column would fill
fn is_extension_point<B: Board>(board: &B, row: usize, column: usize) -> bool {
    board.cell(row, column).is_empty() && (row == 0 || !board.cell(row - 1, column).is_empty())
}

/// Moves `steps` cells along `direction`, `None` when leaving the board
fn step<B: Board>(
    board: &B,
    row: usize,
    column: usize,
    direction: Direction,
    steps: isize,
) -> Option<(usize, usize)> {
    let row = row as isize + direction.d_row * steps;
    let column = column as isize + direction.d_column * steps;
    if row < 0
        || column < 0
        || row >= board.height() as isize
        || column >= board.width() as isize
    {
        None
    } else {
        Some((row as usize, column as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ArrayBoard;

    #[test]
    fn run_scores() {
        assert_eq!(run_score(1), 0.1);
        assert_eq!(run_score(2), 1.0);
        assert_eq!(run_score(3), 10.0);
        assert_eq!(win_score(4), 100.0);
        assert_eq!(win_score(5), 1000.0);
    }

    #[test]
    fn single_token() {
        // open above and to the side on the floor, the diagonal ends are floating
        let board = ArrayBoard::from_moves("4").unwrap();
        assert_eq!(evaluate(&board, Player::One), 2.0 * run_score(1));
        assert_eq!(evaluate(&board, Player::Two), -2.0 * run_score(1));
    }

    #[test]
    fn vertical_run_capped_by_opponent() {
        let board = ArrayBoard::from_diagram(&[".", "O", "X", "X", "X", "O"], 4).unwrap();

        let capped = measure_run(&board, 1, 0, VERTICAL).unwrap();
        assert_eq!((capped.owner, capped.length), (Player::One, 3));
        assert!(!capped.extendable);
        // the X run is a single run, not three
        assert!(measure_run(&board, 2, 0, VERTICAL).is_none());

        // only the top O can still grow
        assert_eq!(evaluate(&board, Player::One), -run_score(1));
    }

    #[test]
    fn horizontal_run_needs_support() {
        let floating = ArrayBoard::from_diagram(
            &[
                ".......", //
                ".OO....",
                ".XX....",
            ],
            4,
        )
        .unwrap();
        let run = measure_run(&floating, 1, 1, HORIZONTAL).unwrap();
        assert_eq!((run.owner, run.length), (Player::Two, 2));
        assert!(!run.extendable);

        let supported = ArrayBoard::from_diagram(
            &[
                ".......", //
                ".OO....",
                "XXX....",
            ],
            4,
        )
        .unwrap();
        assert!(measure_run(&supported, 1, 1, HORIZONTAL).unwrap().extendable);
    }

    #[test]
    fn diagonal_runs_in_both_directions() {
        let board = ArrayBoard::from_diagram(
            &[
                ".......", //
                ".......",
                "..X....",
                ".XO....",
                "XOO.X..",
            ],
            4,
        )
        .unwrap();
        let ascending = measure_run(&board, 0, 0, DIAGONAL_ASCENDING).unwrap();
        assert_eq!((ascending.owner, ascending.length), (Player::One, 3));
        // (3,3) floats above an empty column
        assert!(!ascending.extendable);

        let descending = measure_run(&board, 1, 2, DIAGONAL_DESCENDING).unwrap();
        assert_eq!((descending.owner, descending.length), (Player::Two, 1));
        // (0,3) is on the floor
        assert!(descending.extendable);
    }

    #[test]
    fn completed_line_short_circuits() {
        let board = ArrayBoard::from_diagram(
            &[
                "O......", //
                "OX.....",
                "OX.....",
                "XXXXOO.",
            ],
            4,
        )
        .unwrap();
        assert_eq!(completed_line(&board), Some(Player::One));
        assert_eq!(evaluate(&board, Player::One), 100.0);
        assert_eq!(evaluate(&board, Player::Two), -100.0);
    }
}
