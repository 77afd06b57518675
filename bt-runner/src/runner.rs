use bt_core::{AgentContext, NodeState, TaskRegistry, TickContext};
use bt_tree::{Instance, NodeId, Template};

/// Drives one agent's behaviour tree: the clone-and-run entry point the
/// host simulation calls at agent spawn time.
///
/// Owns the agent's [`Instance`] together with its [`TaskRegistry`], so a
/// call-task leaf always resolves against the bindings of the agent being
/// evaluated. Dropped with the agent.
pub struct Runner<A>
where
    A: AgentContext,
{
    instance: Instance,
    tasks: TaskRegistry<A>,
}

impl<A> Runner<A>
where
    A: AgentContext,
{
    /// Clone the template into a private instance, ready to tick.
    pub fn new(template: &Template) -> Self {
        Self {
            instance: template.instantiate(),
            tasks: TaskRegistry::new(),
        }
    }

    /// Bind a named task for this agent's call-task leaves. Binding the
    /// same name again replaces the previous action.
    pub fn bind_task(&mut self, name: impl Into<String>, action: impl FnMut(&mut A) + 'static) {
        self.tasks.bind(name, action);
    }

    /// Evaluate the tree once for this simulation tick.
    ///
    /// Does nothing when the tree already reached a terminal result; call
    /// [`reset`](Runner::reset) to re-arm it.
    pub fn tick(&mut self, ctx: &TickContext, agent: &mut A) -> NodeState {
        self.instance.tick(ctx, agent, &mut self.tasks)
    }

    pub fn tree_state(&self) -> NodeState {
        self.instance.tree_state()
    }

    /// Per-node state for external observers, safe to call every frame.
    pub fn node_state(&self, id: NodeId) -> NodeState {
        self.instance.node_state(id)
    }

    /// Force the whole tree back to its initial condition.
    pub fn reset(&mut self) {
        self.instance.reset();
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn tasks(&self) -> &TaskRegistry<A> {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskRegistry<A> {
        &mut self.tasks
    }
}
