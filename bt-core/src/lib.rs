//! Engine-agnostic behaviour tree primitives.
//!
//! This crate holds the pieces shared by templates, instances, and runners
//! without knowing anything about tree shape: the per-node result state, the
//! simulation clock handed to every evaluation, the agent seam, and the
//! name-to-action task registry.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod state;
pub mod task;
pub mod tick;

pub use agent::AgentContext;
pub use state::NodeState;
pub use task::TaskRegistry;
pub use tick::TickContext;
