//! Core data model: tasks routed through the environment and the structured
//! results agents hand back.

pub mod result;
pub mod task;

pub use result::{TaskResult, TaskStatus};
pub use task::{Framework, Task, TaskKind, TradeAction};
