//! Per-agent tick driver for behaviour tree instances.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod runner;

pub use runner::Runner;
