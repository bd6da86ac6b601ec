//! A depth-limited game tree search agent for the board game 'Connect 4'
//!
//! The agent looks a fixed number of plies ahead with minimax and
//! alpha-beta pruning, scoring the positions at the search horizon with a
//! static evaluation of the open runs on the board.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_alphabeta::{agent::choose_move, board::ArrayBoard};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // player one has three tokens stacked in the middle column
//! let board = ArrayBoard::from_moves("414243")?;
//! let column = choose_move(&board, 3)?;
//!
//! assert_eq!(column, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod evaluation;

pub mod successors;

pub mod search;

pub mod agent;

mod test;

/// The width of the default game board in tiles
pub const WIDTH: usize = 7;

/// The height of the default game board in tiles
pub const HEIGHT: usize = 6;

/// The number of tokens in a row needed to win on the default game board
pub const CONNECT_LENGTH: usize = 4;

/// The widest board supported, columns are written as single digits in move strings
pub const MAX_WIDTH: usize = 9;

// a line must fit on the board and columns must be addressable by a single digit
const_assert!(CONNECT_LENGTH >= 2);
const_assert!(CONNECT_LENGTH <= WIDTH || CONNECT_LENGTH <= HEIGHT);
const_assert!(WIDTH <= MAX_WIDTH);
