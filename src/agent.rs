//! Move selection on top of the game tree search

use log::{debug, info};
use rayon::prelude::*;

use crate::board::Board;
use crate::error::SearchError;
use crate::evaluation::{completed_line, win_score, Score};
use crate::search::{Role, SearchConfig, Searcher};
use crate::successors::successors;

/// The outcome of a top-level search
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// The column to play, 0-indexed
    pub column: usize,
    /// The value of that move for the player to move
    pub score: Score,
    /// The number of positions visited (for diagnostics only)
    pub node_count: usize,
}

/// Picks the column to play on `board`, looking `depth` plies ahead
pub fn choose_move<B: Board>(board: &B, depth: usize) -> Result<usize, SearchError> {
    best_move(board, &SearchConfig::new(depth)).map(|result| result.column)
}

/// Performs a top-level search for the player to move on `board`
///
/// Each root move is answered by the opponent, so the moves are scored by
/// minimizing searches one ply down. A move that wins on the spot is
/// played without searching, otherwise among moves of equal value the one
/// in the lowest column is chosen.
pub fn best_move<B: Board>(board: &B, config: &SearchConfig) -> Result<SearchResult, SearchError> {
    config.validate()?;

    let moves = successors(board);
    if moves.is_empty() {
        return Err(SearchError::NoLegalMove);
    }

    let player = board.current_player();
    // check for a win for the current player on this move
    let result = if let Some(position) = moves
        .iter()
        .position(|(child, _)| completed_line(child) == Some(player))
    {
        SearchResult {
            column: moves[position].1,
            score: win_score(board.connect_length()),
            node_count: position + 1,
        }
    } else if config.parallel {
        parallel_search(board, config, moves)
    } else {
        sequential_search(board, config, moves)
    };

    info!(
        "player {} plays column {} (score {}, {} positions, depth {})",
        player.number(),
        result.column + 1,
        result.score,
        result.node_count,
        config.depth
    );
    Ok(result)
}

fn sequential_search<B: Board>(
    board: &B,
    config: &SearchConfig,
    moves: Vec<(B, usize)>,
) -> SearchResult {
    let mut searcher = Searcher::new(*config, board.current_player());
    // the best score found so far bounds the remaining root moves
    let mut alpha = Score::NEG_INFINITY;
    let mut result = SearchResult {
        column: moves[0].1,
        score: Score::NEG_INFINITY,
        node_count: 0,
    };

    for (child, column) in moves.iter() {
        let score = searcher.search(child, 1, Role::Minimizer, alpha, Score::INFINITY);
        debug!("column {}: {}", column + 1, score);

        if score > result.score {
            result.column = *column;
            result.score = score;
        }
        if score > alpha {
            alpha = score;
        }
    }

    result.node_count = searcher.node_count;
    result
}

/// Searches every root move on its own thread with a full window
///
/// The branches share no bounds, so the result is the same as that of the
/// sequential search.
fn parallel_search<B: Board>(
    board: &B,
    config: &SearchConfig,
    moves: Vec<(B, usize)>,
) -> SearchResult {
    let player = board.current_player();
    let scored: Vec<(usize, Score, usize)> = moves
        .par_iter()
        .map(|(child, column)| {
            let mut searcher = Searcher::new(*config, player);
            let score = searcher.search(
                child,
                1,
                Role::Minimizer,
                Score::NEG_INFINITY,
                Score::INFINITY,
            );
            (*column, score, searcher.node_count)
        })
        .collect();

    let mut result = SearchResult {
        column: moves[0].1,
        score: Score::NEG_INFINITY,
        node_count: 0,
    };
    for &(column, score, node_count) in scored.iter() {
        debug!("column {}: {}", column + 1, score);
        if score > result.score {
            result.column = column;
            result.score = score;
        }
        result.node_count += node_count;
    }
    result
}

/// An agent that plays by alpha-beta search to a fixed depth
#[derive(Clone, Debug)]
pub struct AlphaBetaAgent {
    name: String,
    config: SearchConfig,
}

impl AlphaBetaAgent {
    pub fn new<S: Into<String>>(name: S, max_depth: usize) -> Self {
        Self {
            name: name.into(),
            config: SearchConfig::new(max_depth),
        }
    }

    pub fn with_config<S: Into<String>>(name: S, config: SearchConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_depth(&self) -> usize {
        self.config.depth
    }

    /// Searches for the best move on `board`
    pub fn go<B: Board>(&self, board: &B) -> Result<SearchResult, SearchError> {
        debug!("{} is searching", self.name);
        best_move(board, &self.config)
    }
}
