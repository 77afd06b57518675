use std::collections::BTreeMap;

use tracing::warn;

use crate::{AgentContext, NodeState};

/// Maps task names to invocable external actions.
///
/// Owned by the agent's runner, consulted by call-task leaves. Keys are
/// case-sensitive and unique; binding a name again replaces the previous
/// action. The tree has no knowledge of what a bound action does: dispatch
/// is fire-and-forget and reports `Success` upon invocation.
pub struct TaskRegistry<A> {
    bindings: BTreeMap<String, Box<dyn FnMut(&mut A)>>,
}

impl<A> TaskRegistry<A> {
    pub fn new() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    pub fn bind(&mut self, name: impl Into<String>, action: impl FnMut(&mut A) + 'static) {
        self.bindings.insert(name.into(), Box::new(action));
    }

    pub fn unbind(&mut self, name: &str) -> bool {
        self.bindings.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Invoke the action bound to `name`, handing it the agent.
    ///
    /// An unresolved name is a binding error, not a programmer error: it
    /// logs a warning and resolves to `Failure` so the tree keeps a
    /// well-defined result.
    pub fn dispatch(&mut self, name: &str, agent: &mut A) -> NodeState
    where
        A: AgentContext,
    {
        match self.bindings.get_mut(name) {
            Some(action) => {
                action(agent);
                NodeState::Success
            }
            None => {
                warn!(task = name, agent = agent.name(), "no action bound for task");
                NodeState::Failure
            }
        }
    }
}

impl<A> Default for TaskRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}
