//! Periodic task scheduling
//!
//! Every acquisition task runs at a fixed priority and period. The
//! executor provides preemption; this module provides the task table
//! and the deadline arithmetic each task loop uses.

pub mod deadline;
pub mod task;

pub use deadline::PeriodicDeadline;
pub use task::{task_table, Priority, TaskDescriptor, TaskKind, TASK_COUNT};
