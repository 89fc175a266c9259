use std::fmt::Debug;

/// The central trait of the library, defining the interface for a game state.
///
/// The search engine is generic over this trait. It only ever reads the position and applies
/// moves it got from `get_available_moves`, cloning the board whenever it needs an independent
/// continuation.
pub trait Board: Clone {
    /// The type representing a move in the game, e.g. a column index for Connect-Four.
    type Move: Copy + PartialEq + Debug;

    /// Returns the player whose turn it is to make a move.
    fn get_current_player(&self) -> Player;

    /// Returns the current outcome of the game.
    fn get_outcome(&self) -> GameOutcome;

    /// Returns a list of all legal moves available from the current state.
    fn get_available_moves(&self) -> Vec<Self::Move>;

    /// Applies a given move to the board, modifying its state.
    ///
    /// The move must be one of `get_available_moves`. Implementations are free to panic otherwise.
    fn perform_move(&mut self, b_move: &Self::Move);

    /// Returns `true` once the game has been decided or no move is left.
    fn is_terminal(&self) -> bool {
        self.get_outcome() != GameOutcome::InProgress
    }
}

/// Represents the possible outcomes of a game.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GameOutcome {
    /// The game is still ongoing.
    InProgress,
    /// The given player has won.
    Win(Player),
    /// The board is full and nobody has won.
    Draw,
}

/// The two sides of a game.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Player {
    /// The side that moves first.
    One,
    /// The side that moves second.
    Two,
}

impl Player {
    /// Returns the other side.
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}
