//! Connect-Four with a Monte Carlo tree search opponent.
//!
//! The search engine is generic over the [`board::Board`] trait and runs the classic
//! selection, expansion, random playout and backpropagation cycle with UCB1 selection. The tree is
//! kept between turns: playing a move that was already explored keeps its subtree.
//!
//! # Example
//!
//! ```rust
//! use connect_four_mcts::boards::connect_four::ConnectFourBoard;
//! use connect_four_mcts::mcts::{MonteCarloTreeSearch, SearchBudget};
//! use connect_four_mcts::random::SeededRandomGenerator;
//!
//! let mut state = ConnectFourBoard::new(6, 7);
//! let mut mcts = MonteCarloTreeSearch::builder(state.clone())
//!     .with_random_generator(SeededRandomGenerator::new(7))
//!     .build();
//!
//! // The human plays the centre column.
//! state.apply_move(3).unwrap();
//! mcts.advance(3).unwrap();
//!
//! // The engine answers.
//! mcts.search(SearchBudget::Rollouts(1000));
//! let reply = mcts.best_move().unwrap();
//! state.apply_move(reply).unwrap();
//! mcts.advance(reply).unwrap();
//!
//! assert_eq!(mcts.root_state(), &state);
//! println!("{state}");
//! ```

/// Contains the `Board` trait and related enums that define the interface for a game.
pub mod board;
/// Contains implementations of the `Board` trait.
pub mod boards;
/// Error types for moves and searches.
pub mod error;
/// The core module of the library, containing the `MonteCarloTreeSearch` implementation.
pub mod mcts;
/// Contains the `MctsNode` struct, which represents a node in the search tree.
pub mod mcts_node;
/// Contains traits and implementations for random number generation.
pub mod random;
