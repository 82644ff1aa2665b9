//! Periodic task scheduler
//!
//! A fixed table of periodic tasks advanced by a tick source. Triggering
//! (tick context) is kept apart from execution (main context): the tick only
//! raises flags, the dispatch pass runs the bodies.

pub mod table;
pub mod task;

pub use table::{Scheduler, TriggeredKinds};
pub use task::{TaskEntry, TaskKind, TASK_COUNT};
