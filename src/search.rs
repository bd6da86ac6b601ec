//! Depth-limited minimax search with alpha-beta pruning

use crate::board::{Board, Player};
use crate::error::SearchError;
use crate::evaluation::{completed_line, evaluate, win_score, Score};
use crate::successors::successors;

/// Which side picks the value of a search node
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Role {
    /// The searching player, takes the best child value
    Maximizer,
    /// The opponent, takes the worst child value
    Minimizer,
}

impl Role {
    pub fn next(self) -> Self {
        match self {
            Role::Maximizer => Role::Minimizer,
            Role::Minimizer => Role::Maximizer,
        }
    }
}

/// Settings for a single move search
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// The search horizon in plies, at least 1
    pub depth: usize,
    /// Cut off branches that cannot change the result, disabling this gives
    /// a plain minimax search over the full tree
    pub pruning: bool,
    /// Search the root moves on the rayon thread pool
    pub parallel: bool,
}

impl SearchConfig {
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            pruning: true,
            parallel: false,
        }
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.depth < 1 {
            return Err(SearchError::InvalidDepth(self.depth));
        }
        Ok(())
    }
}

/// A searcher for the positions below one root position
///
/// # Position Scoring
/// Every position is scored from the point of view of the player to move
/// at the root, whoever is to move in the position itself. A finished game
/// scores `±win_score(N)`, any other position at the horizon gets its
/// static evaluation.
#[derive(Clone, Debug)]
pub struct Searcher {
    config: SearchConfig,
    player: Player,

    /// The number of nodes visited by this `Searcher` so far (for diagnostics only)
    pub node_count: usize,
}

impl Searcher {
    /// Creates a new `Searcher` scoring positions for `player`
    pub fn new(config: SearchConfig, player: Player) -> Self {
        Self {
            config,
            player,
            node_count: 0,
        }
    }

    /// Returns the value of `board`, found `depth` plies below the root
    ///
    /// `alpha` is the value the maximizer is already guaranteed elsewhere in
    /// the tree and `beta` the value the minimizer is. A result outside of
    /// that window only bounds the true value, which is enough for the
    /// caller to discard the branch.
    pub fn search<B: Board>(
        &mut self,
        board: &B,
        depth: usize,
        role: Role,
        mut alpha: Score,
        mut beta: Score,
    ) -> Score {
        self.node_count += 1;

        // the evaluation already scores finished games
        if depth >= self.config.depth {
            return evaluate(board, self.player);
        }

        // a finished game is not played on
        if let Some(winner) = completed_line(board) {
            let score = win_score(board.connect_length());
            return if winner == self.player { score } else { -score };
        }

        let children = successors(board);
        if children.is_empty() {
            return evaluate(board, self.player);
        }

        match role {
            Role::Maximizer => {
                let mut value = Score::NEG_INFINITY;
                for (child, _column) in children.iter() {
                    let score = self.search(child, depth + 1, role.next(), alpha, beta);
                    if score > value {
                        value = score;
                    }
                    if self.config.pruning {
                        if value > alpha {
                            alpha = value;
                        }
                        // the minimizer above will never let the game get here
                        if alpha >= beta {
                            break;
                        }
                    }
                }
                value
            }
            Role::Minimizer => {
                let mut value = Score::INFINITY;
                for (child, _column) in children.iter() {
                    let score = self.search(child, depth + 1, role.next(), alpha, beta);
                    if score < value {
                        value = score;
                    }
                    if self.config.pruning {
                        if value < beta {
                            beta = value;
                        }
                        // the maximizer above already has something better
                        if alpha >= beta {
                            break;
                        }
                    }
                }
                value
            }
        }
    }
}
