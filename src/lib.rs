// prioritodo - In-memory priority-sorted to-do list with a terminal front end

pub mod action;
pub mod config;
pub mod jsonl;
pub mod render;
pub mod shell;
pub mod store;
pub mod task;

// Re-export main types for convenience
pub use action::{Action, Applied, Ignored, TaskRef};
pub use config::Config;
pub use store::{Draft, StaleEditPolicy, TaskList};
pub use task::{Priority, Task, TaskId, now_ms};
