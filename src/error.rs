/// Errors reported when a move cannot be placed on a Connect-Four board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range (board has {cols} columns)")]
    ColumnOutOfRange { column: usize, cols: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),
}

/// Errors reported by the search engine, generic over the game's move type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MctsError<M> {
    #[error("no move available: the game is over")]
    NoMoveAvailable,

    #[error("the root position has not been searched yet")]
    NotSearched,

    #[error("move {0:?} is not legal in the root position")]
    IllegalMove(M),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_error_display() {
        let err = MoveError::ColumnOutOfRange { column: 9, cols: 7 };
        assert_eq!(
            err.to_string(),
            "column 9 is out of range (board has 7 columns)"
        );
        assert_eq!(MoveError::ColumnFull(3).to_string(), "column 3 is full");
    }

    #[test]
    fn mcts_error_display() {
        assert_eq!(
            MctsError::<usize>::NoMoveAvailable.to_string(),
            "no move available: the game is over"
        );
        assert_eq!(
            MctsError::IllegalMove(7usize).to_string(),
            "move 7 is not legal in the root position"
        );
    }
}
