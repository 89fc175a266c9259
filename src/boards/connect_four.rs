use crate::board::{Board, GameOutcome, Player};
use crate::error::MoveError;
use std::fmt;

/// Number of aligned pieces needed to win.
pub const CONNECT: usize = 4;

pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;

/// Horizontal, vertical and the two diagonals, as (row, col) steps.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A Connect-Four position of arbitrary size.
///
/// The grid is stored row-major with row 0 on top. A move is a column index and the piece drops
/// to the lowest open row of that column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectFourBoard {
    rows: usize,
    cols: usize,
    field: Vec<Option<Player>>,
    open_rows: Vec<usize>,
    current_player: Player,
    last_move: Option<(usize, usize)>,
}

impl ConnectFourBoard {
    /// Creates an empty board with player one to move.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            field: vec![None; rows * cols],
            open_rows: vec![rows; cols],
            current_player: Player::One,
            last_move: None,
        }
    }

    /// Number of rows on the board.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns on the board.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The piece at `(row, col)`, row 0 being the top. Out-of-range cells read as empty.
    pub fn cell(&self, row: usize, col: usize) -> Option<Player> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.field[row * self.cols + col]
    }

    /// How many empty cells are left in `col`.
    pub fn open_rows(&self, col: usize) -> usize {
        self.open_rows.get(col).copied().unwrap_or(0)
    }

    /// The row the next piece dropped into `col` lands on, if the column has room.
    pub fn next_free_row(&self, col: usize) -> Option<usize> {
        self.open_rows(col).checked_sub(1)
    }

    /// The side that plays next.
    pub fn side_to_move(&self) -> Player {
        self.current_player
    }

    /// The `(row, col)` of the most recently placed piece.
    pub fn last_move(&self) -> Option<(usize, usize)> {
        self.last_move
    }

    /// Columns whose top cell is empty, in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..self.cols)
            .filter(|&col| self.rows > 0 && self.field[col].is_none())
            .collect()
    }

    /// Drops a piece for the side to move into `column`.
    pub fn apply_move(&mut self, column: usize) -> Result<(), MoveError> {
        if column >= self.cols {
            return Err(MoveError::ColumnOutOfRange {
                column,
                cols: self.cols,
            });
        }
        if self.next_free_row(column).is_none() {
            return Err(MoveError::ColumnFull(column));
        }

        self.place(column);
        Ok(())
    }

    fn place(&mut self, column: usize) {
        let row = self.open_rows[column] - 1;
        self.field[row * self.cols + column] = Some(self.current_player);
        self.open_rows[column] = row;
        self.last_move = Some((row, column));
        self.current_player = self.current_player.opponent();
    }

    /// The winner, judged only on lines through the last placed piece.
    pub fn winner(&self) -> Option<Player> {
        let (row, col) = self.last_move?;
        let player = self.cell(row, col)?;

        let wins = DIRECTIONS.iter().any(|&(dr, dc)| {
            1 + self.run_length(row, col, dr, dc, player)
                + self.run_length(row, col, -dr, -dc, player)
                >= CONNECT
        });

        wins.then_some(player)
    }

    /// Counts contiguous `player` pieces stepping away from `(row, col)`, excluding the start cell.
    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, player: Player) -> usize {
        let mut count = 0;
        let (mut r, mut c) = (row as isize + dr, col as isize + dc);
        while r >= 0 && c >= 0 && self.cell(r as usize, c as usize) == Some(player) {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    /// `true` once someone has won or the board is full.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.legal_moves().is_empty()
    }

    /// `Win` or `Draw` once terminal, `InProgress` before.
    pub fn outcome(&self) -> GameOutcome {
        if let Some(player) = self.winner() {
            GameOutcome::Win(player)
        } else if self.legal_moves().is_empty() {
            GameOutcome::Draw
        } else {
            GameOutcome::InProgress
        }
    }
}

impl Default for ConnectFourBoard {
    /// The standard 6x7 board.
    fn default() -> Self {
        ConnectFourBoard::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl Board for ConnectFourBoard {
    type Move = usize;

    fn get_current_player(&self) -> Player {
        self.current_player
    }

    fn get_outcome(&self) -> GameOutcome {
        self.outcome()
    }

    fn get_available_moves(&self) -> Vec<Self::Move> {
        self.legal_moves()
    }

    fn perform_move(&mut self, b_move: &Self::Move) {
        debug_assert!(
            self.legal_moves().contains(b_move),
            "illegal move {b_move}"
        );
        self.place(*b_move);
    }

    fn is_terminal(&self) -> bool {
        ConnectFourBoard::is_terminal(self)
    }
}

impl fmt::Display for ConnectFourBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = "=".repeat(self.cols * 4 + 1);
        writeln!(f, "{frame}")?;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let symbol = match self.cell(row, col) {
                    Some(Player::One) => 'X',
                    Some(Player::Two) => 'O',
                    None => ' ',
                };
                write!(f, "| {symbol} ")?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{frame}")?;
        for col in 0..self.cols {
            write!(f, "  {col:<2}")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(board: &mut ConnectFourBoard, moves: &[usize]) {
        for &col in moves {
            board.apply_move(col).unwrap();
        }
    }

    #[test]
    fn new_board_is_empty() {
        let board = ConnectFourBoard::default();
        assert_eq!(board.rows(), 6);
        assert_eq!(board.cols(), 7);
        for row in 0..6 {
            for col in 0..7 {
                assert_eq!(board.cell(row, col), None);
            }
        }
        assert_eq!(board.legal_moves(), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(board.side_to_move(), Player::One);
        assert_eq!(board.last_move(), None);
        assert_eq!(board.winner(), None);
        assert_eq!(board.outcome(), GameOutcome::InProgress);
    }

    #[test]
    fn pieces_fall_to_lowest_open_row() {
        let mut board = ConnectFourBoard::default();
        play(&mut board, &[3]);
        assert_eq!(board.cell(5, 3), Some(Player::One));
        assert_eq!(board.last_move(), Some((5, 3)));
        assert_eq!(board.open_rows(3), 5);
        assert_eq!(board.next_free_row(3), Some(4));
        assert_eq!(board.side_to_move(), Player::Two);

        play(&mut board, &[3]);
        assert_eq!(board.cell(4, 3), Some(Player::Two));
        assert_eq!(board.open_rows(3), 4);
        assert_eq!(board.side_to_move(), Player::One);
    }

    #[test]
    fn four_alternating_stones_in_one_column() {
        let mut board = ConnectFourBoard::default();
        play(&mut board, &[3, 3, 3, 3]);
        assert_eq!(board.open_rows(3), 2);
        assert!(board.legal_moves().contains(&3));
        assert_eq!(board.winner(), None);
        assert!(!board.is_terminal());
    }

    #[test]
    fn horizontal_win() {
        let mut board = ConnectFourBoard::default();
        play(&mut board, &[0, 6, 1, 6, 2, 6]);
        assert_eq!(board.winner(), None);
        play(&mut board, &[3]);
        assert_eq!(board.winner(), Some(Player::One));
        assert!(board.is_terminal());
        assert_eq!(board.outcome(), GameOutcome::Win(Player::One));
    }

    #[test]
    fn horizontal_win_completed_in_the_middle() {
        let mut board = ConnectFourBoard::default();
        play(&mut board, &[0, 6, 1, 6, 3, 5, 2]);
        assert_eq!(board.winner(), Some(Player::One));
    }

    #[test]
    fn vertical_win() {
        let mut board = ConnectFourBoard::default();
        play(&mut board, &[0, 1, 0, 1, 0, 1]);
        assert_eq!(board.winner(), None);
        play(&mut board, &[2, 1]);
        assert_eq!(board.winner(), Some(Player::Two));
    }

    #[test]
    fn rising_diagonal_win() {
        // X at (5,0) (4,1) (3,2) (2,3)
        let mut board = ConnectFourBoard::default();
        play(&mut board, &[0, 1, 1, 2, 2, 3, 2, 3, 3, 6, 3]);
        assert_eq!(board.cell(2, 3), Some(Player::One));
        assert_eq!(board.winner(), Some(Player::One));
    }

    #[test]
    fn falling_diagonal_win() {
        // X at (5,6) (4,5) (3,4) (2,3)
        let mut board = ConnectFourBoard::default();
        play(&mut board, &[6, 5, 5, 4, 4, 3, 4, 3, 3, 0, 3]);
        assert_eq!(board.winner(), Some(Player::One));
    }

    #[test]
    fn full_column_is_rejected() {
        let mut board = ConnectFourBoard::default();
        play(&mut board, &[2, 2, 2, 2, 2, 2]);
        assert_eq!(board.open_rows(2), 0);
        assert_eq!(board.next_free_row(2), None);
        assert_eq!(board.legal_moves(), vec![0, 1, 3, 4, 5, 6]);
        assert_eq!(board.apply_move(2), Err(MoveError::ColumnFull(2)));
        assert_eq!(
            board.apply_move(7),
            Err(MoveError::ColumnOutOfRange { column: 7, cols: 7 })
        );
        assert_eq!(board.side_to_move(), Player::One);
    }

    #[test]
    fn full_small_board_is_a_draw() {
        let mut board = ConnectFourBoard::new(3, 3);
        play(&mut board, &[0, 1, 2, 0, 1, 2, 0, 1, 2]);
        assert!(board.legal_moves().is_empty());
        assert_eq!(board.winner(), None);
        assert!(board.is_terminal());
        assert_eq!(board.outcome(), GameOutcome::Draw);
    }

    #[test]
    fn legal_moves_track_the_top_row() {
        let mut board = ConnectFourBoard::new(2, 4);
        play(&mut board, &[1, 1, 3]);
        assert_eq!(board.legal_moves(), vec![0, 2, 3]);
        assert!(board.legal_moves().len() <= board.cols());
    }

    #[test]
    fn clone_is_independent() {
        let mut board = ConnectFourBoard::default();
        play(&mut board, &[3]);
        let mut copy = board.clone();
        copy.apply_move(4).unwrap();
        assert_eq!(board.cell(5, 4), None);
        assert_eq!(copy.cell(5, 4), Some(Player::Two));
        assert_ne!(board, copy);
    }

    #[test]
    fn trait_view_matches_inherent_api() {
        let mut board = ConnectFourBoard::default();
        board.perform_move(&0);
        assert_eq!(board.get_current_player(), Player::Two);
        assert_eq!(board.get_available_moves(), board.legal_moves());
        assert_eq!(board.get_outcome(), GameOutcome::InProgress);
        assert!(!Board::is_terminal(&board));
    }

    #[test]
    fn renders_grid() {
        let mut board = ConnectFourBoard::new(2, 3);
        play(&mut board, &[0, 0, 2]);
        let expected = "\
=============
| O |   |   |
| X |   | X |
=============
  0   1   2 \n";
        assert_eq!(board.to_string(), expected);
    }
}
