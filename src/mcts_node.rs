/// Represents a single node in the Monte Carlo search tree.
///
/// A node does not store a game state; the engine replays moves from the root state while it
/// descends. Parent and child links live in the enclosing `ego_tree::Tree`.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsNode<M> {
    /// The move that led to this node from its parent. `None` for the root node.
    pub prev_move: Option<M>,
    /// The number of rollouts that passed through this node.
    pub visits: u32,
    /// Accumulated reward for the player who made `prev_move`. Always within `0..=visits`.
    pub value: f64,
}

impl<M> MctsNode<M> {
    /// Creates an unvisited node reached by `prev_move`.
    pub fn new(prev_move: Option<M>) -> Self {
        MctsNode {
            prev_move,
            visits: 0,
            value: 0.0,
        }
    }

    /// The UCB1 selection score given the parent's visit count.
    ///
    /// An unvisited node scores `+inf` while exploring so that every sibling is tried once before
    /// any is revisited, and `0` for pure exploitation (`exploration == 0`).
    pub fn ucb_value(&self, parent_visits: u32, exploration: f64) -> f64 {
        if self.visits == 0 {
            return if exploration == 0.0 { 0.0 } else { f64::INFINITY };
        }

        let visits = self.visits as f64;
        self.value / visits + exploration * f64::sqrt(f64::ln(parent_visits as f64) / visits)
    }

    /// Average reward of this node.
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.value / self.visits as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MctsNode;
    use std::f64::consts::SQRT_2;

    #[test]
    fn unvisited_node_is_infinite_only_while_exploring() {
        let node = MctsNode::new(Some(3usize));
        assert_eq!(node.ucb_value(10, SQRT_2), f64::INFINITY);
        assert_eq!(node.ucb_value(10, 0.0), 0.0);
        assert_eq!(node.mean_value(), 0.0);
    }

    #[test]
    fn visited_node_uses_ucb1() {
        let node = MctsNode {
            prev_move: Some(1usize),
            visits: 4,
            value: 3.0,
        };
        let expected = 0.75 + SQRT_2 * f64::sqrt(f64::ln(16.0) / 4.0);
        assert!((node.ucb_value(16, SQRT_2) - expected).abs() < 1e-12);
        assert_eq!(node.ucb_value(16, 0.0), 0.75);
        assert_eq!(node.mean_value(), 0.75);
    }
}
