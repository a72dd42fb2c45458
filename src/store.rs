// In-memory task list store: canonical task collection plus the draft buffer

use crate::action::{Action, Applied, Ignored, TaskRef};
use crate::task::{Priority, Task, TaskId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What happens to an open edit session when its target task is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaleEditPolicy {
    /// Close the edit session and reset the draft
    #[default]
    Cancel,
    /// Leave the session open; a later save changes nothing
    Keep,
}

/// Transient edit buffer shared by the compose and edit surfaces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub priority: Priority,
    /// Task being edited, or None while composing a new task
    pub editing: Option<TaskId>,
}

impl Draft {
    fn reset(&mut self) {
        self.text.clear();
        self.priority = Priority::Low;
    }

    fn close(&mut self) {
        self.reset();
        self.editing = None;
    }
}

/// The task list state container
///
/// Tasks are kept in insertion order. Every mutation goes through one of the
/// methods below (or [`TaskList::apply`]); an `Err(Ignored)` return means the
/// state was left as it was.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    draft: Draft,
    stale_edit: StaleEditPolicy,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stale_edit_policy(policy: StaleEditPolicy) -> Self {
        Self {
            stale_edit: policy,
            ..Self::default()
        }
    }

    pub fn stale_edit_policy(&self) -> StaleEditPolicy {
        self.stale_edit
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Whether an edit session is open (the edit surface is visible)
    pub fn is_editing(&self) -> bool {
        self.draft.editing.is_some()
    }

    /// The task under edit, if the session is open and its target still exists
    pub fn editing_task(&self) -> Option<&Task> {
        self.draft.editing.and_then(|id| self.get(id))
    }

    /// Tasks ordered by priority, highest first
    ///
    /// The sort is stable over insertion order, so equal priorities keep their
    /// creation order. Storage itself is never reordered.
    pub fn sorted_view(&self) -> Vec<&Task> {
        let mut view: Vec<&Task> = self.tasks.iter().collect();
        view.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
        view
    }

    /// Resolve a task reference against the current state
    pub fn resolve(&self, task: TaskRef) -> Result<TaskId, Ignored> {
        match task {
            TaskRef::Id(id) => self.get(id).map(|t| t.id).ok_or(Ignored::UnknownTask(id)),
            TaskRef::Position(position) => position
                .checked_sub(1)
                .and_then(|i| self.sorted_view().get(i).map(|t| t.id))
                .ok_or(Ignored::NoTaskAt(position)),
        }
    }

    // ========================================================================
    // Draft input
    // ========================================================================

    pub fn set_draft_text(&mut self, text: impl Into<String>) -> Applied {
        self.draft.text = text.into();
        Applied::DraftUpdated
    }

    pub fn set_draft_priority(&mut self, priority: Priority) -> Applied {
        self.draft.priority = priority;
        Applied::DraftUpdated
    }

    /// Add a task from the current draft
    pub fn submit_draft(&mut self) -> Result<Applied, Ignored> {
        let text = self.draft.text.clone();
        let priority = self.draft.priority;
        self.add(text, priority)
    }

    // ========================================================================
    // Task operations
    // ========================================================================

    /// Append a new task; whitespace-only text is ignored and the draft kept
    ///
    /// The draft is shared with the edit surface, so adding is refused while an
    /// edit session is open.
    pub fn add(&mut self, text: impl Into<String>, priority: Priority) -> Result<Applied, Ignored> {
        if let Some(id) = self.draft.editing {
            debug!(editing = %id, "add: ignored during edit session");
            return Err(Ignored::Editing);
        }

        let text = text.into();
        if text.trim().is_empty() {
            debug!(reason = %Ignored::EmptyText, "add: ignored");
            return Err(Ignored::EmptyText);
        }

        let task = Task::new(text, priority);
        let id = task.id;
        debug!(%id, %priority, "add: appended task");
        self.tasks.push(task);
        self.draft.reset();

        Ok(Applied::Added(id))
    }

    /// Flip the completed flag of a task
    pub fn toggle(&mut self, id: TaskId) -> Result<Applied, Ignored> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(%id, "toggle: unknown task");
            return Err(Ignored::UnknownTask(id));
        };

        task.completed = !task.completed;
        debug!(%id, completed = task.completed, "toggle: flipped");
        Ok(Applied::Toggled {
            id,
            completed: task.completed,
        })
    }

    /// Remove a task
    pub fn delete(&mut self, id: TaskId) -> Result<Applied, Ignored> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            debug!(%id, "delete: unknown task");
            return Err(Ignored::UnknownTask(id));
        };

        self.tasks.remove(pos);
        debug!(%id, remaining = self.tasks.len(), "delete: removed");

        if self.draft.editing == Some(id) {
            match self.stale_edit {
                StaleEditPolicy::Cancel => {
                    debug!(%id, "delete: closing edit session on deleted task");
                    self.draft.close();
                }
                StaleEditPolicy::Keep => {
                    debug!(%id, "delete: edit session left open on deleted task");
                }
            }
        }

        Ok(Applied::Deleted(id))
    }

    /// Open an edit session, loading the task into the draft
    pub fn begin_edit(&mut self, id: TaskId) -> Result<Applied, Ignored> {
        let Some(task) = self.get(id) else {
            debug!(%id, "begin_edit: unknown task");
            return Err(Ignored::UnknownTask(id));
        };

        let text = task.text.clone();
        let priority = task.priority;
        self.draft = Draft {
            text,
            priority,
            editing: Some(id),
        };
        debug!(%id, "begin_edit: session opened");

        Ok(Applied::EditStarted(id))
    }

    /// Write the draft back to the task under edit and close the session
    ///
    /// Unlike [`TaskList::add`], the text is not checked for emptiness.
    pub fn save_edit(&mut self) -> Result<Applied, Ignored> {
        let Some(id) = self.draft.editing else {
            debug!("save_edit: no edit session");
            return Err(Ignored::NotEditing);
        };

        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(%id, "save_edit: target was deleted, closing session");
            self.draft.close();
            return Err(Ignored::StaleEdit(id));
        };

        task.text = std::mem::take(&mut self.draft.text);
        task.priority = self.draft.priority;
        self.draft.close();
        debug!(%id, "save_edit: saved");

        Ok(Applied::Saved(id))
    }

    /// Close the edit session without touching any task
    pub fn cancel_edit(&mut self) -> Result<Applied, Ignored> {
        if self.draft.editing.is_none() {
            debug!("cancel_edit: no edit session");
            return Err(Ignored::NotEditing);
        }

        self.draft.close();
        debug!("cancel_edit: session closed");
        Ok(Applied::EditCancelled)
    }

    // ========================================================================
    // Reducer
    // ========================================================================

    /// Apply one action; actions are processed strictly in call order
    pub fn apply(&mut self, action: Action) -> Result<Applied, Ignored> {
        match action {
            Action::Add { text, priority } => self.add(text, priority),
            Action::SetDraftText { text } => Ok(self.set_draft_text(text)),
            Action::SetDraftPriority { priority } => Ok(self.set_draft_priority(priority)),
            Action::SubmitDraft => self.submit_draft(),
            Action::Toggle { task } => self.toggle(self.resolve(task)?),
            Action::Delete { task } => self.delete(self.resolve(task)?),
            Action::BeginEdit { task } => self.begin_edit(self.resolve(task)?),
            Action::SaveEdit => self.save_edit(),
            Action::CancelEdit => self.cancel_edit(),
        }
    }

    /// Apply a batch of actions in order, returning how many were ignored
    pub fn apply_all<I>(&mut self, actions: I) -> usize
    where
        I: IntoIterator<Item = Action>,
    {
        let mut ignored = 0;
        for (i, action) in actions.into_iter().enumerate() {
            if let Err(reason) = self.apply(action) {
                info!(index = i, %reason, "Action ignored");
                ignored += 1;
            }
        }
        ignored
    }
}
