use crate::board::Board;

/// Returns every board reachable from `board` in one move, paired with the
/// column that was played, in `legal_columns` order
///
/// The input board is left untouched, each successor is a fresh copy.
pub fn successors<B: Board>(board: &B) -> Vec<(B, usize)> {
    board
        .legal_columns()
        .into_iter()
        .map(|column| {
            let mut next = board.clone();
            if let Err(err) = next.drop_token(column) {
                unreachable!("board reported column {} as legal: {}", column, err);
            }
            (next, column)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{ArrayBoard, Cell, Player};

    #[test]
    fn one_successor_per_free_column() {
        let board = ArrayBoard::from_moves("111111").unwrap();
        let next = successors(&board);

        let columns: Vec<usize> = next.iter().map(|(_, column)| *column).collect();
        assert_eq!(columns, vec![1, 2, 3, 4, 5, 6]);
        for (child, column) in next.iter() {
            assert_eq!(child.cell(0, *column), Cell::PlayerOne);
            assert_eq!(child.current_player(), Player::Two);
            assert_eq!(child.num_moves(), board.num_moves() + 1);
        }
        // the parent keeps its own cells
        assert_eq!(board.cell(0, 1), Cell::Empty);
        assert_eq!(board.current_player(), Player::One);
    }

    #[test]
    fn full_board_has_no_successors() {
        let board = ArrayBoard::from_diagram(&["OX", "XO"], 2).unwrap();
        assert!(successors(&board).is_empty());
    }
}
