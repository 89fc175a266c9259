use crate::board::{Board, GameOutcome, Player};
use crate::error::MctsError;
use crate::mcts_node::MctsNode;
use crate::random::{RandomGenerator, StandardRandomGenerator};
use ego_tree::{NodeId, NodeRef, Tree};
use log::{debug, trace};
use std::time::{Duration, Instant};

/// Default UCB1 exploration constant.
pub const DEFAULT_EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// How long a single `search` call may run.
///
/// The budget is checked between rollouts only; a rollout that has started always plays out to
/// the end of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBudget {
    /// Stop after this many rollouts.
    Rollouts(u32),
    /// Stop once this much wall-clock time has elapsed.
    Time(Duration),
}

/// Report of the most recent `search` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    pub rollouts: u32,
    pub elapsed: Duration,
}

/// The main struct for running the Monte Carlo Tree Search algorithm.
///
/// It owns the root game state and the search tree grown from it. Nodes are kept in a single
/// arena, so dropping a tree releases every node at once.
pub struct MonteCarloTreeSearch<T: Board, K: RandomGenerator> {
    tree: Tree<MctsNode<T::Move>>,
    root_state: T,
    random: K,
    exploration: f64,
    statistics: SearchStatistics,
}

/// A builder for creating instances of `MonteCarloTreeSearch`.
pub struct MonteCarloTreeSearchBuilder<T: Board, K: RandomGenerator> {
    board: T,
    random_generator: K,
    exploration: f64,
}

impl<T: Board, K: RandomGenerator> MonteCarloTreeSearchBuilder<T, K> {
    /// Creates a new builder with the given initial board state.
    pub fn new(board: T) -> Self {
        Self {
            board,
            random_generator: K::default(),
            exploration: DEFAULT_EXPLORATION,
        }
    }

    /// Sets the random number generator used for tie-breaks and playouts.
    pub fn with_random_generator(mut self, rg: K) -> Self {
        self.random_generator = rg;
        self
    }

    /// Sets the UCB1 exploration constant.
    pub fn with_exploration_constant(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    /// Builds the `MonteCarloTreeSearch` instance with the configured parameters.
    pub fn build(self) -> MonteCarloTreeSearch<T, K> {
        MonteCarloTreeSearch::new(self.board, self.random_generator, self.exploration)
    }
}

impl<T: Board, K: RandomGenerator> MonteCarloTreeSearch<T, K> {
    /// Returns a new builder for `MonteCarloTreeSearch`.
    pub fn builder(board: T) -> MonteCarloTreeSearchBuilder<T, K> {
        MonteCarloTreeSearchBuilder::new(board)
    }

    /// Creates a search rooted at a copy of `board`, with an empty tree.
    ///
    /// It is recommended to use the builder pattern via `MonteCarloTreeSearch::builder()` instead.
    pub fn new(board: T, rg: K, exploration: f64) -> Self {
        Self {
            tree: Tree::new(MctsNode::new(None)),
            root_state: board,
            random: rg,
            exploration,
            statistics: SearchStatistics::default(),
        }
    }

    /// Returns an immutable reference to the underlying search tree.
    pub fn get_tree(&self) -> &Tree<MctsNode<T::Move>> {
        &self.tree
    }

    /// Returns the root node of the search tree.
    pub fn get_root(&self) -> NodeRef<'_, MctsNode<T::Move>> {
        self.tree.root()
    }

    /// The game state at the root of the tree.
    pub fn root_state(&self) -> &T {
        &self.root_state
    }

    /// The UCB1 exploration constant used during selection.
    pub fn exploration_constant(&self) -> f64 {
        self.exploration
    }

    /// Rollout count and elapsed time of the most recent `search`.
    pub fn statistics(&self) -> SearchStatistics {
        self.statistics
    }

    /// Runs select, expand, simulate and backpropagate until the budget is spent or the root
    /// position is terminal.
    pub fn search(&mut self, budget: SearchBudget) -> SearchStatistics {
        let start = Instant::now();
        let mut rollouts = 0u32;

        while !self.root_state.is_terminal() {
            let exhausted = match budget {
                SearchBudget::Rollouts(limit) => rollouts >= limit,
                SearchBudget::Time(limit) => start.elapsed() >= limit,
            };
            if exhausted {
                break;
            }

            self.do_iteration();
            rollouts += 1;
        }

        self.statistics = SearchStatistics {
            rollouts,
            elapsed: start.elapsed(),
        };
        debug!(
            "search finished: {} rollouts in {:?}, root visits {}",
            rollouts,
            self.statistics.elapsed,
            self.tree.root().value().visits
        );
        self.statistics
    }

    /// Runs the search for a specified number of rollouts.
    pub fn iterate_n_times(&mut self, n: u32) -> SearchStatistics {
        self.search(SearchBudget::Rollouts(n))
    }

    /// Performs one full rollout. Returns the path of nodes that were updated, leaf first.
    pub fn do_iteration(&mut self) -> Vec<NodeId> {
        let (leaf, state) = self.select_leaf();
        let perspective = state.get_current_player();
        let outcome = self.simulate(state);
        self.backpropagate(leaf, perspective, outcome)
    }

    /// The most visited child of the root. Ties are broken uniformly at random.
    pub fn best_move(&mut self) -> Result<T::Move, MctsError<T::Move>> {
        if self.root_state.is_terminal() {
            return Err(MctsError::NoMoveAvailable);
        }

        let root = self.tree.root();
        let max_visits = root
            .children()
            .map(|child| child.value().visits)
            .max()
            .ok_or(MctsError::NotSearched)?;
        let best: Vec<T::Move> = root
            .children()
            .filter(|child| child.value().visits == max_visits)
            .filter_map(|child| child.value().prev_move)
            .collect();

        self.random
            .get_random_from_slice(&best)
            .copied()
            .ok_or(MctsError::NotSearched)
    }

    /// Plays `b_move` at the root.
    ///
    /// An explored child becomes the new root with its statistics intact. Otherwise the whole
    /// tree is dropped and a fresh root is started.
    pub fn advance(&mut self, b_move: T::Move) -> Result<(), MctsError<T::Move>> {
        if !self.root_state.get_available_moves().contains(&b_move) {
            return Err(MctsError::IllegalMove(b_move));
        }

        let child_id = self
            .tree
            .root()
            .children()
            .find(|child| child.value().prev_move == Some(b_move))
            .map(|child| child.id());

        self.root_state.perform_move(&b_move);
        self.tree = match child_id {
            Some(id) => {
                let subtree = self.detach_subtree(id);
                trace!(
                    "reusing subtree for move {:?} with {} visits",
                    b_move,
                    subtree.root().value().visits
                );
                subtree
            }
            None => {
                trace!("move {:?} was not explored, starting a fresh tree", b_move);
                Tree::new(MctsNode::new(None))
            }
        };
        Ok(())
    }

    /// Copies the subtree under `id` into a new arena whose root has no move.
    fn detach_subtree(&self, id: NodeId) -> Tree<MctsNode<T::Move>> {
        let source = self.tree.get(id).expect("subtree root is in the search tree");
        let mut subtree = Tree::new(MctsNode {
            prev_move: None,
            ..source.value().clone()
        });

        let mut pending = vec![(source, subtree.root().id())];
        while let Some((source, target_id)) = pending.pop() {
            let mut target = subtree
                .get_mut(target_id)
                .expect("copied node is in the new subtree");
            for child in source.children() {
                let copied = target.append(child.value().clone()).id();
                pending.push((child, copied));
            }
        }

        subtree
    }

    /// Descends from the root by UCB1, replaying moves on a copy of the root state.
    ///
    /// Stops at the first unvisited child. A never-expanded node reached at the bottom is expanded
    /// and its first child is returned instead.
    fn select_leaf(&mut self) -> (NodeId, T) {
        let mut node_id = self.tree.root().id();
        let mut state = self.root_state.clone();

        loop {
            let node = self
                .tree
                .get(node_id)
                .expect("selected node is in the search tree");
            if !node.has_children() {
                break;
            }

            let parent_visits = node.value().visits;
            let scored: Vec<(NodeId, f64)> = node
                .children()
                .map(|child| {
                    let score = child.value().ucb_value(parent_visits, self.exploration);
                    (child.id(), score)
                })
                .collect();
            let max_score = scored
                .iter()
                .map(|&(_, score)| score)
                .fold(f64::NEG_INFINITY, f64::max);
            let best: Vec<NodeId> = scored
                .iter()
                .filter(|&&(_, score)| score == max_score)
                .map(|&(id, _)| id)
                .collect();

            let chosen = *self
                .random
                .get_random_from_slice(&best)
                .expect("an expanded node has a best-scoring child");
            let child = self.tree.get(chosen).expect("child is in the search tree");
            if let Some(b_move) = child.value().prev_move {
                state.perform_move(&b_move);
            }
            node_id = chosen;
            if child.value().visits == 0 {
                return (node_id, state);
            }
        }

        if self.expand(node_id, &state) {
            let first_child = self
                .tree
                .get(node_id)
                .and_then(|node| node.first_child())
                .map(|child| (child.id(), child.value().prev_move));
            if let Some((child_id, Some(b_move))) = first_child {
                state.perform_move(&b_move);
                node_id = child_id;
            }
        }

        (node_id, state)
    }

    /// Adds one child per legal move under `node_id`. A terminal state gets no children.
    fn expand(&mut self, node_id: NodeId, state: &T) -> bool {
        if state.is_terminal() {
            return false;
        }
        let Some(mut node) = self.tree.get_mut(node_id) else {
            return false;
        };

        for b_move in state.get_available_moves() {
            node.append(MctsNode::new(Some(b_move)));
        }
        true
    }

    /// Plays uniformly random moves until the game ends.
    fn simulate(&mut self, mut state: T) -> GameOutcome {
        while !state.is_terminal() {
            let moves = state.get_available_moves();
            let Some(&b_move) = self.random.get_random_from_slice(&moves) else {
                break;
            };
            state.perform_move(&b_move);
        }
        state.get_outcome()
    }

    /// Credits `outcome` from `leaf` up to the root.
    ///
    /// `perspective` is the side to move at the leaf. Each node collects reward for the player
    /// who moved into it, so the reward flips at every level. Draws are worth nothing anywhere.
    fn backpropagate(
        &mut self,
        leaf: NodeId,
        perspective: Player,
        outcome: GameOutcome,
    ) -> Vec<NodeId> {
        let mut branch = Vec::new();
        let mut current = self.tree.get(leaf);
        while let Some(node) = current {
            branch.push(node.id());
            current = node.parent();
        }

        let decisive = matches!(outcome, GameOutcome::Win(_));
        let mut reward = match outcome {
            GameOutcome::Win(winner) if winner != perspective => 1.0,
            _ => 0.0,
        };

        for &node_id in &branch {
            if let Some(mut node) = self.tree.get_mut(node_id) {
                let stats = node.value();
                stats.visits += 1;
                stats.value += reward;
            }
            if decisive {
                reward = 1.0 - reward;
            }
        }

        branch
    }
}

impl<T: Board> MonteCarloTreeSearch<T, StandardRandomGenerator> {
    /// Creates a search with the default exploration constant and the thread-local generator.
    pub fn from_board(board: T) -> Self {
        MonteCarloTreeSearchBuilder::new(board).build()
    }
}
