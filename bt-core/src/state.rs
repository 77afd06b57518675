#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of evaluating a node for one tick.
///
/// `Running` is the sole suspension mechanism: a node that cannot finish
/// within one tick returns `Running` and is re-entered next tick, with any
/// progress stored as plain node fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeState {
    Running,
    Success,
    Failure,
}

impl Default for NodeState {
    /// `Failure` doubles as the inactive state of a node that has never been
    /// evaluated (or has been reset).
    fn default() -> Self {
        NodeState::Failure
    }
}

impl NodeState {
    /// Swap `Success` and `Failure`; `Running` is indeterminate and passes
    /// through unchanged.
    pub fn inverted(self) -> NodeState {
        match self {
            NodeState::Running => NodeState::Running,
            NodeState::Success => NodeState::Failure,
            NodeState::Failure => NodeState::Success,
        }
    }
}
