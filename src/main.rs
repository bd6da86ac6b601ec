use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use rayon::prelude::*;

use std::io::{stdin, stdout, Write};
use std::time::Instant;

use connect4_alphabeta::agent::AlphaBetaAgent;
use connect4_alphabeta::board::{ArrayBoard, Board, GameState, Player};
use connect4_alphabeta::error::MoveError;
use connect4_alphabeta::evaluation::win_score;
use connect4_alphabeta::search::SearchConfig;
use connect4_alphabeta::{CONNECT_LENGTH, HEIGHT, WIDTH};

/// The search depth used when none is given
const DEFAULT_DEPTH: usize = 5;

/// Connect 4 against a depth-limited alpha-beta search
#[derive(Parser)]
#[command(name = "connect4_alphabeta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal (the default)
    Play(PlayArgs),
    /// Play two search depths against each other from every two-move opening
    Selfplay(SelfplayArgs),
}

#[derive(Args)]
struct BoardArgs {
    /// Number of columns
    #[arg(long, default_value_t = WIDTH)]
    width: usize,
    /// Number of rows
    #[arg(long, default_value_t = HEIGHT)]
    height: usize,
    /// Tokens in a row needed to win
    #[arg(long, default_value_t = CONNECT_LENGTH)]
    connect: usize,
}

impl BoardArgs {
    fn board(&self) -> Result<ArrayBoard> {
        Ok(ArrayBoard::new(self.width, self.height, self.connect)?)
    }
}

#[derive(Parser)]
struct PlayArgs {
    #[command(flatten)]
    board: BoardArgs,
    /// Search depth of the AI in plies
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    depth: usize,
    /// Moves to play before the game starts, as 1-indexed column digits
    #[arg(long)]
    moves: Option<String>,
    /// Player 1 is AI controlled
    #[arg(long)]
    ai_one: bool,
    /// Player 2 is AI controlled
    #[arg(long)]
    ai_two: bool,
    /// Search the AI's candidate moves in parallel
    #[arg(long)]
    parallel: bool,
    /// Search the full game tree without alpha-beta cutoffs
    #[arg(long)]
    no_pruning: bool,
}

#[derive(Args)]
struct SelfplayArgs {
    #[command(flatten)]
    board: BoardArgs,
    /// Search depth of the first agent
    #[arg(long, default_value_t = 2)]
    depth_one: usize,
    /// Search depth of the second agent
    #[arg(long, default_value_t = 4)]
    depth_two: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Play(args)) => play(args),
        Some(Commands::Selfplay(args)) => selfplay(args),
        None => play(PlayArgs::parse_from(["play"])),
    }
}

fn ask_yes_no(question: &str) -> Result<bool> {
    let stdin = stdin();
    loop {
        let mut buffer = String::new();
        print!("{} y/n: ", question);
        stdout().flush()?;
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn play(args: PlayArgs) -> Result<()> {
    let mut board = args.board.board()?;
    if let Some(moves) = &args.moves {
        board = board.with_moves(moves)?;
    }
    let config = SearchConfig::new(args.depth)
        .with_pruning(!args.no_pruning)
        .with_parallel(args.parallel);
    config.validate()?;

    let stdin = stdin();

    println!("Welcome to Connect {}\n", board.connect_length());

    // choose AI control of the players
    let ai_players = if args.ai_one || args.ai_two {
        (args.ai_one, args.ai_two)
    } else {
        (
            ask_yes_no("Is player 1 AI controlled?")?,
            ask_yes_no("Is player 2 AI controlled?")?,
        )
    };
    let agents = (
        AlphaBetaAgent::with_config("Player 1 AI", config),
        AlphaBetaAgent::with_config("Player 2 AI", config),
    );

    // game loop
    loop {
        board.display()?;

        match board.state {
            GameState::Playing => {
                let player = board.current_player();
                let ai_controlled = match player {
                    Player::One => ai_players.0,
                    Player::Two => ai_players.1,
                };
                let next_move = if ai_controlled {
                    println!("AI is thinking...");
                    stdout().flush()?;

                    // slow down play if both players are AI
                    if ai_players == (true, true) {
                        std::thread::sleep(std::time::Duration::new(1, 0));
                    }

                    let agent = match player {
                        Player::One => &agents.0,
                        Player::Two => &agents.1,
                    };
                    let result = agent.go(&board)?;

                    let win = win_score(board.connect_length());
                    if result.score >= win {
                        println!(
                            "Player {} can force a win within {} plies.",
                            player.number(),
                            agent.max_depth()
                        );
                    } else if result.score <= -win {
                        println!(
                            "Player {} can force a win within {} plies.",
                            player.other().number(),
                            agent.max_depth()
                        );
                    }
                    println!(
                        "Best move: {} (score {:.1}, {} positions searched)",
                        result.column + 1,
                        result.score,
                        result.node_count
                    );
                    result.column + 1

                // human player
                } else {
                    print!("Move input > ");
                    stdout().flush()?;
                    let mut input_str = String::new();
                    stdin.read_line(&mut input_str)?;

                    match input_str.trim().parse::<usize>() {
                        Ok(column) if column >= 1 && column <= board.width() => column,
                        Ok(column) => {
                            println!(
                                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                                column,
                                board.width()
                            );
                            continue;
                        }
                        Err(_) => {
                            println!("Invalid number: {}", input_str.trim());
                            continue;
                        }
                    }
                };

                match board.play_checked(next_move - 1) {
                    Ok(_) => {}
                    Err(MoveError::ColumnFull { .. }) => {
                        println!("Invalid move, column {} full", next_move);
                        // try the move again
                        continue;
                    }
                    Err(err) => return Err(err.into()),
                }
            }

            // end states
            GameState::PlayerOneWin => {
                println!("Player 1 wins!");
                break;
            }
            GameState::PlayerTwoWin => {
                println!("Player 2 wins!");
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    println!("Game record: {}", board.game);
    Ok(())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Outcome {
    FirstAgent,
    SecondAgent,
    Draw,
}

/// Plays out `board` between two agents, `first_moves` tells whether the
/// first agent controls player 1
fn play_out(
    mut board: ArrayBoard,
    first: &AlphaBetaAgent,
    second: &AlphaBetaAgent,
    first_moves: bool,
) -> Result<Outcome> {
    loop {
        let winner = match board.state {
            GameState::Playing => None,
            GameState::PlayerOneWin => Some(Player::One),
            GameState::PlayerTwoWin => Some(Player::Two),
            GameState::Draw => return Ok(Outcome::Draw),
        };
        if let Some(winner) = winner {
            return Ok(if (winner == Player::One) == first_moves {
                Outcome::FirstAgent
            } else {
                Outcome::SecondAgent
            });
        }

        let agent = if (board.current_player() == Player::One) == first_moves {
            first
        } else {
            second
        };
        let result = agent.go(&board)?;
        board.play_checked(result.column)?;
    }
}

fn selfplay(args: SelfplayArgs) -> Result<()> {
    let start = Instant::now();
    let empty = args.board.board()?;
    let first = AlphaBetaAgent::new(format!("depth {}", args.depth_one), args.depth_one);
    let second = AlphaBetaAgent::new(format!("depth {}", args.depth_two), args.depth_two);
    SearchConfig::new(args.depth_one).validate()?;
    SearchConfig::new(args.depth_two).validate()?;

    // every two-move opening, played once from each side
    let mut games = Vec::new();
    for a in 1..=empty.width() {
        for b in 1..=empty.width() {
            let opening = format!("{}{}", a, b);
            if let Ok(board) = empty.clone().with_moves(&opening) {
                games.push((board.clone(), true));
                games.push((board, false));
            }
        }
    }
    if games.is_empty() {
        return Err(anyhow!("no openings can be played on this board"));
    }

    let progress = ProgressBar::new(games.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let outcomes = games
        .into_par_iter()
        .map(|(board, first_moves)| {
            let outcome = play_out(board, &first, &second, first_moves);
            progress.inc(1);
            outcome
        })
        .collect::<Result<Vec<_>>>()?;
    progress.finish();

    let count = |outcome: Outcome| outcomes.iter().filter(|&&o| o == outcome).count();
    println!(
        "{} wins: {}, {} wins: {}, draws: {}",
        first.name(),
        count(Outcome::FirstAgent),
        second.name(),
        count(Outcome::SecondAgent),
        count(Outcome::Draw)
    );
    println!(
        "{} games played in {}",
        outcomes.len(),
        HumanDuration(start.elapsed())
    );
    Ok(())
}
