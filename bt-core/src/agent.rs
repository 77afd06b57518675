/// Agent-side state reachable from leaf nodes.
///
/// The tree passes an `&mut impl AgentContext` through every evaluation
/// unmodified; this trait is the only view the engine has of the host's
/// agent. The core crate intentionally does not prescribe what an agent is;
/// every method has a conservative default so a host implements only the
/// hooks its trees actually use.
pub trait AgentContext {
    /// Display name used in log and warning output.
    fn name(&self) -> &str {
        "agent"
    }

    /// Set a named boolean parameter on the agent's animation controller
    /// (or equivalent). Returns `false` when the agent has no such sink
    /// attached; the calling leaf fails with a warning.
    fn set_flag(&mut self, flag: &str, value: bool) -> bool {
        let _ = (flag, value);
        false
    }

    /// Fire a named one-shot trigger on the agent's animation controller.
    /// Returns `false` when the agent has no such sink attached.
    fn fire_trigger(&mut self, trigger: &str) -> bool {
        let _ = trigger;
        false
    }

    /// Current spendable resource amount, or `None` when the agent carries
    /// no stat block.
    fn resources(&self) -> Option<i64> {
        None
    }
}
