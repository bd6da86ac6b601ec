//! Error types shared by the board and the search

use thiserror::Error;

/// A token could not be dropped into the requested column
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("column {column} is full")]
    ColumnFull { column: usize },
    #[error("column {column} is out of range for a board {width} columns wide")]
    OutOfRange { column: usize, width: usize },
}

/// The move-selection driver was called with arguments it cannot search
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The board is full, the game loop should have detected the end of the game
    #[error("no legal moves remain on the board")]
    NoLegalMove,
    #[error("search depth must be at least 1, got {0}")]
    InvalidDepth(usize),
}

/// An `ArrayBoard` could not be built from the given description
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("invalid board dimensions {width}x{height} with connect length {connect_length}")]
    Dimensions {
        width: usize,
        height: usize,
        connect_length: usize,
    },
    #[error("could not parse '{0}' as a valid move")]
    Parse(char),
    #[error("invalid move: {0}")]
    Move(#[from] MoveError),
    #[error("invalid position, game is over")]
    GameOver,
    #[error("invalid diagram: {0}")]
    Diagram(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_error_display() {
        let err = MoveError::OutOfRange { column: 9, width: 7 };
        assert_eq!(
            err.to_string(),
            "column 9 is out of range for a board 7 columns wide"
        );
    }

    #[test]
    fn board_error_wraps_move_error() {
        let err: BoardError = MoveError::ColumnFull { column: 2 }.into();
        assert_eq!(err.to_string(), "invalid move: column 2 is full");
    }

    #[test]
    fn search_error_display() {
        assert_eq!(
            SearchError::InvalidDepth(0).to_string(),
            "search depth must be at least 1, got 0"
        );
    }
}
