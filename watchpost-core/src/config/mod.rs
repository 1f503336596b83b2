//! Configuration types
//!
//! Board-agnostic description of one sensor node: which pins the
//! sensors hang off, their protocol tunables and the task periods.
//! The firmware build parses `node.toml` into [`NodeConfig`] and
//! rejects it unless [`NodeConfig::validate`] passes.

pub mod node;

pub use node::*;
