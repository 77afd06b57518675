use std::collections::BTreeMap;

use bt_core::{AgentContext, NodeState, TaskRegistry, TickContext};
use tracing::{info, warn};

use crate::{Node, NodeId, NodeKind, Template};

/// A running copy of a [`Template`], owned by exactly one agent.
///
/// Instantiation deep-copies every node, so per-node state and progress are
/// private to this agent and never leak back into the template or into other
/// instances. Node identities are preserved; the arena doubles as the
/// identity lookup for external observers.
///
/// Evaluation is a single top-down, depth-first, left-to-right traversal per
/// tick. No node is evaluated twice in one tick, and siblings after a
/// short-circuiting child are not evaluated at all. Structural problems
/// (missing child, dangling edge) resolve to `Failure`, never a panic: the
/// worst a malformed tree can do is fail every tick.
#[derive(Debug)]
pub struct Instance {
    name: String,
    nodes: BTreeMap<NodeId, Node>,
    root: NodeId,
    tree_state: NodeState,
}

impl Instance {
    pub(crate) fn new(template: &Template) -> Self {
        let mut nodes: BTreeMap<NodeId, Node> = template
            .nodes()
            .map(|node| (node.id(), node.clone()))
            .collect();
        for node in nodes.values_mut() {
            node.reset_state();
        }
        Self {
            name: format!("{} (instance)", template.name),
            nodes,
            root: template.root(),
            tree_state: NodeState::Running,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Result of the most recent root evaluation. Starts as `Running`;
    /// once terminal, the instance is not re-evaluated until [`reset`].
    ///
    /// [`reset`]: Instance::reset
    pub fn tree_state(&self) -> NodeState {
        self.tree_state
    }

    /// Last evaluated state of one node, for external observers polling
    /// every frame. An id unknown to this instance reads as `Failure`
    /// rather than an error, so stale observers stay harmless.
    pub fn node_state(&self, id: NodeId) -> NodeState {
        self.nodes.get(&id).map(Node::state).unwrap_or_default()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Force every node back to inactive and re-arm the tree.
    pub fn reset(&mut self) {
        for node in self.nodes.values_mut() {
            node.reset_state();
        }
        self.tree_state = NodeState::Running;
    }

    /// Evaluate the tree once for this simulation tick.
    ///
    /// A tree that has already reached a terminal result is left untouched;
    /// re-running it is an explicit policy decision made through [`reset`].
    ///
    /// [`reset`]: Instance::reset
    pub fn tick<A: AgentContext>(
        &mut self,
        ctx: &TickContext,
        agent: &mut A,
        tasks: &mut TaskRegistry<A>,
    ) -> NodeState {
        if self.tree_state != NodeState::Running {
            return self.tree_state;
        }
        self.tree_state = self.evaluate(self.root, ctx, agent, tasks);
        self.tree_state
    }

    fn evaluate<A: AgentContext>(
        &mut self,
        id: NodeId,
        ctx: &TickContext,
        agent: &mut A,
        tasks: &mut TaskRegistry<A>,
    ) -> NodeState {
        let Some(node) = self.nodes.get(&id) else {
            return NodeState::Failure;
        };
        let was_running = node.state == NodeState::Running;
        let children = node.children.clone();
        // A node whose last result was not Running is entered fresh, not
        // resumed: the cursor starts over at the first child.
        let resume_at = if was_running { node.running_child } else { 0 };
        let started_at = node.started_at;
        let kind = node.kind.clone();

        let state = match kind {
            NodeKind::Root => match children.first().copied() {
                None => NodeState::Failure,
                Some(child) => self.evaluate(child, ctx, agent, tasks),
            },
            NodeKind::Inverter => match children.first().copied() {
                None => NodeState::Failure,
                Some(child) => self.evaluate(child, ctx, agent, tasks).inverted(),
            },
            NodeKind::Sequence => {
                let mut state = NodeState::Success;
                let mut cursor = 0;
                for i in resume_at..children.len() {
                    match self.evaluate(children[i], ctx, agent, tasks) {
                        NodeState::Running => {
                            // Park the cursor so the next tick resumes at
                            // this child instead of re-running its siblings.
                            state = NodeState::Running;
                            cursor = i;
                            break;
                        }
                        NodeState::Failure => {
                            state = NodeState::Failure;
                            break;
                        }
                        NodeState::Success => {}
                    }
                }
                self.set_cursor(id, cursor);
                state
            }
            NodeKind::Selector => {
                let mut state = NodeState::Failure;
                let mut cursor = 0;
                for i in resume_at..children.len() {
                    match self.evaluate(children[i], ctx, agent, tasks) {
                        NodeState::Running => {
                            state = NodeState::Running;
                            cursor = i;
                            break;
                        }
                        NodeState::Success => {
                            state = NodeState::Success;
                            break;
                        }
                        NodeState::Failure => {}
                    }
                }
                self.set_cursor(id, cursor);
                state
            }
            NodeKind::Wait { seconds } => {
                if !was_running {
                    self.set_started(id, ctx.time_seconds);
                    NodeState::Running
                } else {
                    let started = started_at.unwrap_or(ctx.time_seconds);
                    if ctx.time_seconds - started >= f64::from(seconds) {
                        NodeState::Success
                    } else {
                        NodeState::Running
                    }
                }
            }
            NodeKind::CallTask { task } => tasks.dispatch(&task, agent),
            NodeKind::Log { message } => {
                info!(agent = agent.name(), "{message}");
                NodeState::Success
            }
            NodeKind::SetFlag { flag, value } => {
                if agent.set_flag(&flag, value) {
                    NodeState::Success
                } else {
                    warn!(
                        agent = agent.name(),
                        flag = %flag,
                        "agent has no animation sink; flag not set"
                    );
                    NodeState::Failure
                }
            }
            NodeKind::FireTrigger { trigger } => {
                if agent.fire_trigger(&trigger) {
                    NodeState::Success
                } else {
                    warn!(
                        agent = agent.name(),
                        trigger = %trigger,
                        "agent has no animation sink; trigger not fired"
                    );
                    NodeState::Failure
                }
            }
            NodeKind::HasResources { cost } => match agent.resources() {
                Some(amount) if amount >= cost => NodeState::Success,
                Some(_) => NodeState::Failure,
                None => {
                    warn!(
                        agent = agent.name(),
                        "agent has no stat block; resource check fails"
                    );
                    NodeState::Failure
                }
            },
        };

        self.set_state(id, state)
    }

    fn set_state(&mut self, id: NodeId, state: NodeState) -> NodeState {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.state = state;
        }
        state
    }

    fn set_cursor(&mut self, id: NodeId, cursor: usize) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.running_child = cursor;
        }
    }

    fn set_started(&mut self, id: NodeId, time_seconds: f64) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.started_at = Some(time_seconds);
        }
    }
}
