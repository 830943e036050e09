use chrono::NaiveDate;
use uuid::Uuid;

/// Task priority, shown as a badge in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl TaskPriority {
    pub fn all() -> &'static [TaskPriority] {
        &[
            TaskPriority::Low,
            TaskPriority::Medium,
            TaskPriority::High,
            TaskPriority::Critical,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Critical => "Critical",
        }
    }
}

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    OnHold,
    Completed,
}

impl TaskStatus {
    pub fn all() -> &'static [TaskStatus] {
        &[
            TaskStatus::NotStarted,
            TaskStatus::InProgress,
            TaskStatus::OnHold,
            TaskStatus::Completed,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "Not Started",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::OnHold => "On Hold",
            TaskStatus::Completed => "Completed",
        }
    }
}

/// A single task in the plan. Children are owned directly; there is no
/// back-reference to the parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    pub project_case: String,
    pub name: String,
    pub description: String,
    pub assignees: Vec<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    /// First day of the task (inclusive).
    pub start: NaiveDate,
    /// Last day of the task (inclusive).
    pub end: NaiveDate,
    pub est_hours: f32,
    pub used_hours: f32,
    pub sub_tasks: Vec<Task>,
}

impl Task {
    /// Create a new task with a fresh id and sensible defaults.
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            project_case: String::new(),
            name: name.into(),
            description: String::new(),
            assignees: Vec::new(),
            priority: TaskPriority::default(),
            status: TaskStatus::default(),
            start,
            end,
            est_hours: 0.0,
            used_hours: 0.0,
            sub_tasks: Vec::new(),
        }
    }

    /// Builder-style id override, mostly for fixtures.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_children(mut self, children: Vec<Task>) -> Self {
        self.sub_tasks = children;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.sub_tasks.is_empty()
    }

    /// Remaining budget; negative when the task is over its estimate.
    pub fn remaining_hours(&self) -> f32 {
        self.est_hours - self.used_hours
    }

    pub fn assignee_list(&self) -> String {
        self.assignees.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn new_task_gets_unique_id() {
        let a = Task::new("A", d(2024, 1, 1), d(2024, 1, 2));
        let b = Task::new("B", d(2024, 1, 1), d(2024, 1, 2));
        assert_ne!(a.id, b.id);
        assert!(!a.has_children());
    }

    #[test]
    fn remaining_hours_can_go_negative() {
        let mut t = Task::new("A", d(2024, 1, 1), d(2024, 1, 1));
        t.est_hours = 8.0;
        t.used_hours = 10.5;
        assert_eq!(t.remaining_hours(), -2.5);
    }

    #[test]
    fn assignees_are_comma_joined() {
        let mut t = Task::new("A", d(2024, 1, 1), d(2024, 1, 1));
        t.assignees = vec!["Ana".into(), "Bo".into()];
        assert_eq!(t.assignee_list(), "Ana, Bo");
    }
}
