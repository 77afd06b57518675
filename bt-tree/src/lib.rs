//! Behaviour tree node model, templates, and running instances.
//!
//! A [`Template`] is the authored, shared graph: an arena of nodes addressed
//! by stable ids, mutated only through operations that keep it a tree.
//! [`Template::instantiate`] produces an [`Instance`], a structurally
//! independent copy owned by one agent, evaluated once per simulation tick.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod instance;
pub mod node;
pub mod template;

pub use instance::Instance;
pub use node::{Node, NodeId, NodeKind};
pub use template::{Template, TemplateError};
