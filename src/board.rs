use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use crate::error::{BoardError, MoveError};
use crate::evaluation::completed_line;
use crate::{CONNECT_LENGTH, HEIGHT, MAX_WIDTH, WIDTH};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }

    /// 1 for the first player, 2 for the second
    pub fn number(self) -> usize {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn owner(&self) -> Option<Player> {
        match self {
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
            Cell::Empty => None,
        }
    }
}

/// The view of a board the search needs
///
/// Rows are counted from the floor upwards, so row 0 is where the first
/// token dropped into a column lands. Implementations must be cheap to
/// clone, every node of the search tree owns its own copy.
pub trait Board: Clone + Send + Sync {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn connect_length(&self) -> usize;

    /// Columns with at least one free cell, in ascending order
    fn legal_columns(&self) -> Vec<usize>;

    fn cell(&self, row: usize, column: usize) -> Cell;

    fn current_player(&self) -> Player;

    /// Places a token for the current player in the lowest free cell of
    /// `column` and passes the turn to the other player
    fn drop_token(&mut self, column: usize) -> Result<(), MoveError>;

    fn is_full(&self) -> bool {
        self.legal_columns().is_empty()
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

impl GameState {
    fn won_by(player: Player) -> Self {
        match player {
            Player::One => GameState::PlayerOneWin,
            Player::Two => GameState::PlayerTwoWin,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ArrayBoard {
    cells: Vec<Cell>, // cells are stored left-to-right, bottom-to-top
    heights: Vec<usize>,
    width: usize,
    height: usize,
    connect_length: usize,
    player: Player,
    pub game: String,
    num_moves: usize,
    pub state: GameState,
}

impl ArrayBoard {
    pub fn new(width: usize, height: usize, connect_length: usize) -> Result<Self, BoardError> {
        if width == 0
            || width > MAX_WIDTH
            || height == 0
            || connect_length < 2
            || connect_length > width.max(height)
        {
            return Err(BoardError::Dimensions {
                width,
                height,
                connect_length,
            });
        }
        Ok(Self {
            cells: vec![Cell::Empty; width * height],
            heights: vec![0; width],
            width,
            height,
            connect_length,
            player: Player::One,
            game: String::new(),
            num_moves: 0,
            state: GameState::Playing,
        })
    }

    /// Plays a string of 1-indexed column digits on a default sized board
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self, BoardError> {
        Self::default().with_moves(moves)
    }

    /// Plays a string of 1-indexed column digits on this board
    pub fn with_moves<S: AsRef<str>>(mut self, moves: S) -> Result<Self, BoardError> {
        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column) if column >= 1 && column <= self.width => {
                    // abort if the position is won at any point
                    if self.state != GameState::Playing {
                        return Err(BoardError::GameOver);
                    }
                    self.play_checked(column - 1)?;
                }
                _ => return Err(BoardError::Parse(column_char)),
            }
        }
        Ok(self)
    }

    /// Builds a board from a picture of its rows, top row first
    ///
    /// `X` marks a token of the first player, `O` one of the second player
    /// and `.` an empty cell. The player to move follows from the token
    /// counts, the first player always moves first.
    pub fn from_diagram(rows: &[&str], connect_length: usize) -> Result<Self, BoardError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut board = Self::new(width, height, connect_length)?;

        let mut counts = (0, 0);
        for (line, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(BoardError::Diagram(format!(
                    "row {} has a different width to the first row",
                    line + 1
                )));
            }
            let row_index = height - 1 - line;
            for (column, symbol) in row.chars().enumerate() {
                let cell = match symbol {
                    'X' | 'x' => {
                        counts.0 += 1;
                        Cell::PlayerOne
                    }
                    'O' | 'o' => {
                        counts.1 += 1;
                        Cell::PlayerTwo
                    }
                    '.' => Cell::Empty,
                    other => return Err(BoardError::Parse(other)),
                };
                board.cells[column + width * row_index] = cell;
            }
        }

        for column in 0..width {
            let filled = (0..height)
                .take_while(|&row| !board.cell(row, column).is_empty())
                .count();
            if (filled..height).any(|row| !board.cell(row, column).is_empty()) {
                return Err(BoardError::Diagram(format!(
                    "floating token in column {}",
                    column + 1
                )));
            }
            board.heights[column] = filled;
        }

        board.player = match counts.0 as isize - counts.1 as isize {
            0 => Player::One,
            1 => Player::Two,
            _ => {
                return Err(BoardError::Diagram(format!(
                    "{} tokens for player one and {} for player two",
                    counts.0, counts.1
                )))
            }
        };
        board.num_moves = counts.0 + counts.1;
        board.state = match completed_line(&board) {
            Some(winner) => GameState::won_by(winner),
            None if board.is_full() => GameState::Draw,
            None => GameState::Playing,
        };
        Ok(board)
    }

    /// Plays a move, updating the game state
    pub fn play_checked(&mut self, column: usize) -> Result<GameState, MoveError> {
        if column >= self.width {
            return Err(MoveError::OutOfRange {
                column,
                width: self.width,
            });
        }
        if !self.playable(column) {
            return Err(MoveError::ColumnFull { column });
        }

        self.state = if self.check_winning_move(column) {
            GameState::won_by(self.player)
        } else if self.check_draw_move() {
            GameState::Draw
        } else {
            GameState::Playing
        };
        self.play(column);
        self.game.push_str(&(column + 1).to_string());

        Ok(self.state)
    }

    pub fn check_draw_move(&self) -> bool {
        self.num_moves + 1 == self.width * self.height
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    pub fn display(&self) -> anyhow::Result<()> {
        let mut stdout = stdout();

        let cols: String = (1..=self.width).map(|x| x.to_string()).collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;
        for _ in 0..self.height {
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;

        let (origin_x, origin_y) = crossterm::cursor::position()?;

        for (idx, cell) in self.cells.iter().enumerate() {
            let (pos_x, pos_y) = (
                origin_x + (idx % self.width) as u16,
                origin_y - (idx / self.width) as u16,
            );

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match cell {
                            Cell::PlayerOne => Color::Red,
                            Cell::PlayerTwo => Color::Yellow,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?;
        }
        stdout
            .queue(MoveTo(origin_x + self.width as u16, origin_y))?
            .queue(PrintStyledContent(style("\n")))?;
        stdout.flush()?;
        Ok(())
    }

    fn playable(&self, column: usize) -> bool {
        self.heights[column] < self.height
    }

    fn play(&mut self, column: usize) {
        self.cells[column + self.width * self.heights[column]] = self.player.cell();
        self.heights[column] += 1;
        self.num_moves += 1;
        self.player = self.player.other();
    }

    fn check_winning_move(&self, column: usize) -> bool {
        let player = self.player.cell();
        let needed = self.connect_length as i32 - 1;
        let (column, row) = (column as i32, self.heights[column] as i32);

        // vertical, horizontal and both diagonal alignments through the new token
        for &(dx, dy) in [(0i32, 1i32), (1, 0), (1, 1), (1, -1)].iter() {
            let mut run = 0;
            for side in [-1i32, 1].iter() {
                let mut x = column + side * dx;
                let mut y = row + side * dy;
                loop {
                    if x < 0
                        || x >= self.width as i32
                        || y < 0
                        || y >= self.height as i32
                        || self.cells[x as usize + self.width * y as usize] != player
                    {
                        break;
                    }
                    x += side * dx;
                    y += side * dy;
                    run += 1;
                }
            }
            if run >= needed {
                return true;
            }
        }

        false
    }
}

impl Default for ArrayBoard {
    fn default() -> Self {
        Self {
            cells: vec![Cell::Empty; WIDTH * HEIGHT],
            heights: vec![0; WIDTH],
            width: WIDTH,
            height: HEIGHT,
            connect_length: CONNECT_LENGTH,
            player: Player::One,
            game: String::new(),
            num_moves: 0,
            state: GameState::Playing,
        }
    }
}

impl Board for ArrayBoard {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn connect_length(&self) -> usize {
        self.connect_length
    }

    fn legal_columns(&self) -> Vec<usize> {
        (0..self.width).filter(|&c| self.playable(c)).collect()
    }

    fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[column + self.width * row]
    }

    fn current_player(&self) -> Player {
        self.player
    }

    fn drop_token(&mut self, column: usize) -> Result<(), MoveError> {
        if column >= self.width {
            return Err(MoveError::OutOfRange {
                column,
                width: self.width,
            });
        }
        if !self.playable(column) {
            return Err(MoveError::ColumnFull { column });
        }
        self.play(column);
        Ok(())
    }
}
