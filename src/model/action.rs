use super::drag::TaskUpdate;

/// Requests the grid and timeline send to the task store. One per user
/// action; never batched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GanttAction {
    #[default]
    None,
    /// A completed drag moved or resized a task.
    UpdateDates(TaskUpdate),
    Select(String),
    /// Add a root task, or a subtask when `parent_id` is set.
    Add { parent_id: Option<String> },
    Delete(String),
    ToggleExpand(String),
}

impl GanttAction {
    pub fn is_none(&self) -> bool {
        matches!(self, GanttAction::None)
    }

    /// Keep the first non-empty action seen in a frame.
    pub fn or(self, other: GanttAction) -> GanttAction {
        if self.is_none() {
            other
        } else {
            self
        }
    }
}
