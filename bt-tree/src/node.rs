use core::fmt;

use bt_core::NodeState;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identity of a node, assigned once when the node is added to a
/// template and preserved across instantiation. Observers use it to query
/// per-node state without traversing the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The closed set of node types and their parameters.
///
/// Structural edges live on [`Node`], not here, so editing a parameter can
/// never bypass the template's connection checks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum NodeKind {
    /// The template's single entry point. Forwards its child's result.
    Root,
    /// Succeeds only if all children succeed, in order.
    Sequence,
    /// Succeeds on the first child success.
    Selector,
    /// Swaps its child's `Success` and `Failure`.
    Inverter,
    /// Runs until `seconds` of simulation time have elapsed.
    Wait { seconds: f32 },
    /// Dispatches a named action through the agent's task registry.
    CallTask { task: String },
    /// Logs a message and succeeds.
    Log { message: String },
    /// Sets a named boolean flag on the agent's animation sink.
    SetFlag { flag: String, value: bool },
    /// Fires a named one-shot trigger on the agent's animation sink.
    FireTrigger { trigger: String },
    /// Succeeds when the agent's resources cover `cost`.
    HasResources { cost: i64 },
}

impl NodeKind {
    /// Upper bound on direct children for this node type.
    pub fn max_children(&self) -> usize {
        match self {
            NodeKind::Sequence | NodeKind::Selector => usize::MAX,
            NodeKind::Root | NodeKind::Inverter => 1,
            _ => 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.max_children() == 0
    }

    /// Default display name for freshly added nodes.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Root => "Root",
            NodeKind::Sequence => "Sequence",
            NodeKind::Selector => "Selector",
            NodeKind::Inverter => "Inverter",
            NodeKind::Wait { .. } => "Wait",
            NodeKind::CallTask { .. } => "Call Task",
            NodeKind::Log { .. } => "Log",
            NodeKind::SetFlag { .. } => "Set Flag",
            NodeKind::FireTrigger { .. } => "Fire Trigger",
            NodeKind::HasResources { .. } => "Has Resources",
        }
    }
}

/// One arena entry: identity, display name, parameters, child edges, and the
/// per-instance evaluation state.
///
/// Progress across ticks (`running_child`, `started_at`) is ordinary data,
/// re-read on re-entry rather than resumed from a suspended call frame. None
/// of it is serialized; a persisted template always loads inactive.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    id: NodeId,
    /// Display name, free for the editor to change.
    pub name: String,
    pub(crate) kind: NodeKind,
    pub(crate) children: Vec<NodeId>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) state: NodeState,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) running_child: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) started_at: Option<f64>,
}

impl Node {
    pub(crate) fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            name: kind.label().to_string(),
            kind,
            children: Vec::new(),
            state: NodeState::Failure,
            running_child: 0,
            started_at: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Mutable access to the node's parameters.
    ///
    /// This is the editor's surface for tweaking durations, task names, and
    /// the like. A node's variant is fixed at creation; swapping a composite
    /// for a leaf while it still has children leaves the template malformed,
    /// which [`crate::Template::validate`] reports.
    pub fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    /// Ordered child edges; order is evaluation priority.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Last evaluated result. Pure read, safe for external observers.
    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Force the node back to the inactive state and drop any progress.
    pub fn reset_state(&mut self) {
        self.state = NodeState::Failure;
        self.running_child = 0;
        self.started_at = None;
    }
}
