//! Task descriptors

use crate::config::TaskPlan;

/// Number of periodic tasks on the node
pub const TASK_COUNT: usize = 5;

/// Periodic tasks run by the firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskKind {
    Motion,
    Ranging,
    Climate,
    RemoteLink,
    Display,
}

impl TaskKind {
    pub const ALL: [TaskKind; TASK_COUNT] = [
        TaskKind::Motion,
        TaskKind::Ranging,
        TaskKind::Climate,
        TaskKind::RemoteLink,
        TaskKind::Display,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            TaskKind::Motion => "motion",
            TaskKind::Ranging => "ranging",
            TaskKind::Climate => "climate",
            TaskKind::RemoteLink => "remote_link",
            TaskKind::Display => "display",
        }
    }

    /// Fixed priority, most time-sensitive first
    ///
    /// Motion detection has the shortest useful reaction time, the
    /// display the longest.
    pub const fn priority(self) -> Priority {
        match self {
            TaskKind::Motion => Priority::Critical,
            TaskKind::Ranging => Priority::High,
            TaskKind::Climate | TaskKind::RemoteLink => Priority::Normal,
            TaskKind::Display => Priority::Background,
        }
    }
}

/// Fixed task priority
///
/// Ordering follows urgency: `Critical > High > Normal > Background`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Priority {
    Background,
    Normal,
    High,
    Critical,
}

/// Static description of one periodic task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskDescriptor {
    pub kind: TaskKind,
    pub name: &'static str,
    /// Period between scheduled wakes in milliseconds
    pub period_ms: u32,
    pub priority: Priority,
}

impl TaskDescriptor {
    pub const fn new(kind: TaskKind, period_ms: u32) -> Self {
        Self {
            kind,
            name: kind.name(),
            period_ms,
            priority: kind.priority(),
        }
    }

    pub const fn period_us(&self) -> u64 {
        self.period_ms as u64 * 1_000
    }
}

/// Descriptors for every task, in [`TaskKind::ALL`] order
///
/// The remote link is described with its idle (not connected) period.
pub fn task_table(plan: &TaskPlan) -> [TaskDescriptor; TASK_COUNT] {
    TaskKind::ALL.map(|kind| TaskDescriptor::new(kind, plan.period_ms(kind)))
}
