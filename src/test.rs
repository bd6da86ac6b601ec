#[cfg(test)]
pub mod test {
    use anyhow::Result;

    use crate::agent::{best_move, choose_move, AlphaBetaAgent};
    use crate::board::{ArrayBoard, Board, GameState, Player};
    use crate::error::SearchError;
    use crate::evaluation::{completed_line, evaluate, win_score, Score};
    use crate::search::SearchConfig;
    use crate::successors::successors;

    // positions on the default board, none of them finished
    const POSITIONS: [&str; 9] = [
        "", "4", "44", "71", "4444", "4453", "112233", "3344523", "1234567",
    ];

    /// Plain minimax written out independently of `Searcher`
    fn minimax<B: Board>(
        board: &B,
        depth: usize,
        max_depth: usize,
        maximizing: bool,
        player: Player,
    ) -> Score {
        if depth == max_depth {
            return evaluate(board, player);
        }
        if let Some(winner) = completed_line(board) {
            let score = win_score(board.connect_length());
            return if winner == player { score } else { -score };
        }
        let children = successors(board);
        if children.is_empty() {
            return evaluate(board, player);
        }
        let scores = children
            .iter()
            .map(|(child, _)| minimax(child, depth + 1, max_depth, !maximizing, player));
        if maximizing {
            scores.fold(Score::NEG_INFINITY, Score::max)
        } else {
            scores.fold(Score::INFINITY, Score::min)
        }
    }

    fn minimax_move<B: Board>(board: &B, max_depth: usize) -> (usize, Score) {
        let player = board.current_player();
        let children = successors(board);
        if let Some((_, column)) = children
            .iter()
            .find(|(child, _)| completed_line(child) == Some(player))
        {
            return (*column, win_score(board.connect_length()));
        }
        let mut best = (children[0].1, Score::NEG_INFINITY);
        for (child, column) in children.iter() {
            let score = minimax(child, 1, max_depth, false, player);
            if score > best.1 {
                best = (*column, score);
            }
        }
        best
    }

    fn swap_marks(rows: &[&str]) -> Vec<String> {
        rows.iter()
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        'X' => 'O',
                        'O' => 'X',
                        other => other,
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    pub fn chosen_moves_are_legal() -> Result<()> {
        for moves in POSITIONS.iter() {
            let board = ArrayBoard::from_moves(moves)?;
            for depth in 1..=3 {
                let column = choose_move(&board, depth)?;
                assert!(
                    board.legal_columns().contains(&column),
                    "{} at depth {} chose column {}",
                    moves,
                    depth,
                    column
                );
            }
        }

        // a nearly full board with a single free cell
        let board = ArrayBoard::from_diagram(&["O.O", "OXX", "XXO"], 3)?;
        assert_eq!(board.legal_columns(), vec![1]);
        assert_eq!(choose_move(&board, 4)?, 1);
        Ok(())
    }

    #[test]
    pub fn pruning_matches_minimax() -> Result<()> {
        for moves in POSITIONS.iter() {
            let board = ArrayBoard::from_moves(moves)?;
            for depth in 1..=4 {
                let pruned = best_move(&board, &SearchConfig::new(depth))?;
                let full_config = SearchConfig::new(depth).with_pruning(false);
                let full = best_move(&board, &full_config)?;
                let reference = minimax_move(&board, depth);

                assert_eq!((pruned.column, pruned.score), reference, "{}/{}", moves, depth);
                assert_eq!((full.column, full.score), reference, "{}/{}", moves, depth);
                assert!(pruned.node_count <= full.node_count);
            }
        }
        Ok(())
    }

    #[test]
    pub fn pruning_matches_minimax_small_board() -> Result<()> {
        // deep enough to reach the end of the game on a 4x4 board
        let board = ArrayBoard::new(4, 4, 3)?.with_moves("2312")?;
        for depth in 1..=8 {
            let pruned = best_move(&board, &SearchConfig::new(depth))?;
            assert_eq!((pruned.column, pruned.score), minimax_move(&board, depth));
        }
        Ok(())
    }

    #[test]
    pub fn parallel_matches_sequential() -> Result<()> {
        for moves in POSITIONS.iter() {
            let board = ArrayBoard::from_moves(moves)?;
            for depth in 1..=4 {
                let sequential = best_move(&board, &SearchConfig::new(depth))?;
                let parallel_config = SearchConfig::new(depth).with_parallel(true);
                let parallel = best_move(&board, &parallel_config)?;
                assert_eq!(
                    (sequential.column, sequential.score),
                    (parallel.column, parallel.score)
                );
            }
        }
        Ok(())
    }

    #[test]
    pub fn evaluation_symmetry() -> Result<()> {
        // balanced diagrams, so the swapped boards are valid too
        let diagrams: [&[&str]; 3] = [
            &[
                ".......", //
                ".......",
                ".......",
                "...X...",
                "..OO...",
                ".XXOXO.",
            ],
            &[
                ".......", //
                ".......",
                "..O....",
                "..XX...",
                ".OXOO..",
                "XOXOXOX",
            ],
            &["....", ".O..", "XXO."],
        ];
        for rows in diagrams.iter() {
            let connect_length = if rows.len() == 3 { 3 } else { 4 };
            let board = ArrayBoard::from_diagram(rows, connect_length)?;
            let swapped_rows = swap_marks(rows);
            let swapped_rows: Vec<&str> = swapped_rows.iter().map(String::as_str).collect();
            let swapped = ArrayBoard::from_diagram(&swapped_rows, connect_length)?;

            let score = evaluate(&board, Player::One);
            assert_ne!(score, 0.0);
            assert_eq!(evaluate(&swapped, Player::One), -score);
            assert_eq!(evaluate(&swapped, Player::Two), score);
            assert_eq!(evaluate(&board, Player::Two), -score);
        }
        Ok(())
    }

    #[test]
    pub fn completed_lines_score_exactly() -> Result<()> {
        let board = ArrayBoard::from_diagram(
            &[
                ".......", //
                ".......",
                ".......",
                "OXO....",
                "OXO....",
                "XXXXOO.",
            ],
            4,
        )?;
        assert_eq!(board.current_player(), Player::One);
        assert_eq!(evaluate(&board, Player::One), 100.0);
        assert_eq!(evaluate(&board, Player::Two), -100.0);

        let board = ArrayBoard::from_diagram(&["XXXXXOOOO"], 5)?;
        assert_eq!(evaluate(&board, Player::One), 1000.0);
        assert_eq!(evaluate(&board, Player::Two), -1000.0);
        Ok(())
    }

    #[test]
    pub fn empty_board_scores_zero() -> Result<()> {
        assert_eq!(evaluate(&ArrayBoard::default(), Player::One), 0.0);
        assert_eq!(evaluate(&ArrayBoard::new(5, 4, 3)?, Player::Two), 0.0);
        Ok(())
    }

    #[test]
    pub fn evaluation_is_repeatable() -> Result<()> {
        for moves in POSITIONS.iter() {
            let board = ArrayBoard::from_moves(moves)?;
            let first = evaluate(&board, Player::One);
            assert_eq!(evaluate(&board, Player::One), first);
            assert_eq!(board.game, *moves);
        }
        Ok(())
    }

    #[test]
    pub fn completes_vertical_line() -> Result<()> {
        let board = ArrayBoard::from_diagram(
            &[
                ".......", //
                ".......",
                ".......",
                "...X...",
                "O..X...",
                "O..X..O",
            ],
            4,
        )?;
        assert_eq!(board.current_player(), Player::One);
        for depth in 1..=5 {
            assert_eq!(choose_move(&board, depth)?, 3, "depth {}", depth);
        }
        Ok(())
    }

    #[test]
    pub fn blocks_vertical_line() -> Result<()> {
        // player two must stop the stack in column 4
        let board = ArrayBoard::from_moves("41424")?;
        assert_eq!(board.current_player(), Player::Two);
        for depth in 1..=4 {
            assert_eq!(choose_move(&board, depth)?, 3, "depth {}", depth);
        }
        Ok(())
    }

    #[test]
    pub fn empty_board_is_deterministic() -> Result<()> {
        let board = ArrayBoard::default();
        let first = choose_move(&board, 1)?;
        assert!(first < 7);
        for _ in 0..3 {
            assert_eq!(choose_move(&board, 1)?, first);
        }
        // every opening move scores the same, the lowest column wins the tie
        assert_eq!(first, 0);
        Ok(())
    }

    #[test]
    pub fn rejects_bad_calls() -> Result<()> {
        let full = ArrayBoard::from_diagram(&["XOX", "OXO"], 3)?;
        assert_eq!(choose_move(&full, 2), Err(SearchError::NoLegalMove));

        let board = ArrayBoard::default();
        assert_eq!(choose_move(&board, 0), Err(SearchError::InvalidDepth(0)));
        Ok(())
    }

    #[test]
    pub fn agent_plays_a_game() -> Result<()> {
        let first = AlphaBetaAgent::new("first", 3);
        let second =
            AlphaBetaAgent::with_config("second", SearchConfig::new(2).with_parallel(true));
        assert_eq!(first.max_depth(), 3);
        assert_eq!(second.name(), "second");

        let mut board = ArrayBoard::new(5, 4, 3)?;
        while board.state == GameState::Playing {
            let agent = match board.current_player() {
                Player::One => &first,
                Player::Two => &second,
            };
            let result = agent.go(&board)?;
            board.play_checked(result.column)?;
        }
        assert!(board.num_moves() <= 20);
        Ok(())
    }
}
