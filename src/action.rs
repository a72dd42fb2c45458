// Actions accepted by the task list reducer, and their outcomes

use crate::task::{Priority, TaskId};
use serde::{Deserialize, Serialize};

/// One user gesture, mapped 1:1 to a store operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Add {
        text: String,
        #[serde(default)]
        priority: Priority,
    },
    SetDraftText {
        text: String,
    },
    SetDraftPriority {
        priority: Priority,
    },
    SubmitDraft,
    Toggle {
        task: TaskRef,
    },
    Delete {
        task: TaskRef,
    },
    BeginEdit {
        task: TaskRef,
    },
    SaveEdit,
    CancelEdit,
}

/// How an action names its target task
///
/// A JSON string is a task id; a JSON number is a 1-based position in the
/// priority-sorted view at the time the action is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskRef {
    Id(TaskId),
    Position(usize),
}

impl From<TaskId> for TaskRef {
    fn from(id: TaskId) -> Self {
        TaskRef::Id(id)
    }
}

/// What an accepted action did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Added(TaskId),
    DraftUpdated,
    Toggled { id: TaskId, completed: bool },
    Deleted(TaskId),
    EditStarted(TaskId),
    Saved(TaskId),
    EditCancelled,
}

/// Why an action left the state untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// Add with empty or whitespace-only text
    EmptyText,
    /// No task carries the given id
    UnknownTask(TaskId),
    /// No task sits at the given position of the sorted view
    NoTaskAt(usize),
    /// Add while an edit session is open
    Editing,
    /// Save or cancel without an open edit session
    NotEditing,
    /// The edit target was deleted before the save
    StaleEdit(TaskId),
}

impl std::fmt::Display for Ignored {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ignored::EmptyText => write!(f, "task text is empty"),
            Ignored::UnknownTask(id) => write!(f, "no task with id {}", id),
            Ignored::NoTaskAt(position) => write!(f, "no task at position {}", position),
            Ignored::Editing => write!(f, "finish or cancel the edit first"),
            Ignored::NotEditing => write!(f, "no edit in progress"),
            Ignored::StaleEdit(id) => write!(f, "task {} was deleted while being edited", id),
        }
    }
}

impl std::error::Error for Ignored {}
