//! Umbrella crate that re-exports the `bt-*` building blocks.
//!
//! This crate is intended as a convenient entrypoint for hosts embedding the
//! behaviour tree engine.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use bt_core as core;

#[cfg(feature = "tree")]
#[cfg_attr(docsrs, doc(cfg(feature = "tree")))]
pub use bt_tree as tree;

#[cfg(feature = "runner")]
#[cfg_attr(docsrs, doc(cfg(feature = "runner")))]
pub use bt_runner as runner;
