use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::drag::TaskUpdate;
use super::task::Task;
use crate::error::{Error, Result};

/// The in-memory plan: a named task forest.
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub tasks: Vec<Task>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            name: "Untitled Plan".to_string(),
            tasks: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Total number of tasks at every depth.
    pub fn task_count(&self) -> usize {
        super::tree::flatten(&self.tasks).len()
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        find_in(&self.tasks, id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Task> {
        find_in_mut(&mut self.tasks, id)
    }

    /// Add a task at the root, or as the last child of `parent_id`.
    ///
    /// Subtasks start no earlier than today or the parent's start and run at
    /// least a week. Returns the new task's id.
    pub fn add_task(&mut self, parent_id: Option<&str>, today: NaiveDate) -> Result<String> {
        let task = match parent_id {
            None => Task::new("New Task", today, today + Duration::days(7)),
            Some(pid) => {
                let parent = self
                    .find(pid)
                    .ok_or_else(|| Error::TaskNotFound(pid.to_string()))?;
                let start = parent.start.max(today);
                let end = parent.end.max(start + Duration::days(7));
                Task::new("New Subtask", start, end)
            }
        };
        let id = task.id.clone();

        match parent_id {
            None => self.tasks.push(task),
            Some(pid) => {
                let parent = self
                    .find_mut(pid)
                    .ok_or_else(|| Error::TaskNotFound(pid.to_string()))?;
                parent.sub_tasks.push(task);
            }
        }
        self.touch();
        Ok(id)
    }

    /// Remove a task together with its whole subtree.
    pub fn delete_task(&mut self, id: &str) -> Result<Task> {
        let removed =
            remove_in(&mut self.tasks, id).ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        self.touch();
        Ok(removed)
    }

    /// Replace a task's date range. Children are left untouched.
    pub fn update_dates(&mut self, update: &TaskUpdate) -> Result<()> {
        if update.end < update.start {
            return Err(Error::InvalidRange {
                start: update.start,
                end: update.end,
            });
        }
        let task = self
            .find_mut(&update.task_id)
            .ok_or_else(|| Error::TaskNotFound(update.task_id.clone()))?;
        task.start = update.start;
        task.end = update.end;
        self.touch();
        Ok(())
    }
}

fn find_in<'a>(tasks: &'a [Task], id: &str) -> Option<&'a Task> {
    for task in tasks {
        if task.id == id {
            return Some(task);
        }
        if let Some(found) = find_in(&task.sub_tasks, id) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(tasks: &'a mut [Task], id: &str) -> Option<&'a mut Task> {
    for task in tasks.iter_mut() {
        if task.id == id {
            return Some(task);
        }
        if let Some(found) = find_in_mut(&mut task.sub_tasks, id) {
            return Some(found);
        }
    }
    None
}

fn remove_in(tasks: &mut Vec<Task>, id: &str) -> Option<Task> {
    if let Some(pos) = tasks.iter().position(|t| t.id == id) {
        return Some(tasks.remove(pos));
    }
    tasks
        .iter_mut()
        .find_map(|task| remove_in(&mut task.sub_tasks, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample() -> Project {
        let mut p = Project::new("Test");
        p.tasks = vec![
            Task::new("Design", d(2024, 1, 1), d(2024, 1, 20))
                .with_id("a")
                .with_children(vec![
                    Task::new("Wireframes", d(2024, 1, 1), d(2024, 1, 5)).with_id("b"),
                    Task::new("Mockups", d(2024, 1, 6), d(2024, 1, 20))
                        .with_id("c")
                        .with_children(vec![
                            Task::new("Review", d(2024, 1, 18), d(2024, 1, 20)).with_id("d"),
                        ]),
                ]),
            Task::new("Build", d(2024, 1, 21), d(2024, 2, 28)).with_id("e"),
        ];
        p
    }

    #[test]
    fn finds_nested_tasks() {
        let p = sample();
        assert_eq!(p.find("d").map(|t| t.name.as_str()), Some("Review"));
        assert!(p.find("zzz").is_none());
        assert_eq!(p.task_count(), 5);
    }

    #[test]
    fn add_root_task_defaults_to_a_week_from_today() {
        let mut p = sample();
        let id = p.add_task(None, d(2024, 5, 1)).unwrap();
        let t = p.tasks.last().unwrap();
        assert_eq!(t.id, id);
        assert_eq!((t.start, t.end), (d(2024, 5, 1), d(2024, 5, 8)));
    }

    #[test]
    fn add_subtask_appends_to_parent() {
        let mut p = sample();
        let id = p.add_task(Some("c"), d(2023, 12, 1)).unwrap();
        let parent = p.find("c").unwrap();
        assert_eq!(parent.sub_tasks.len(), 2);
        let child = &parent.sub_tasks[1];
        assert_eq!(child.id, id);
        assert_eq!(child.name, "New Subtask");
        // starts at the parent start, runs at least a week
        assert_eq!((child.start, child.end), (d(2024, 1, 6), d(2024, 1, 20)));
    }

    #[test]
    fn add_subtask_to_unknown_parent_fails() {
        let mut p = sample();
        let err = p.add_task(Some("nope"), d(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, Error::TaskNotFound(id) if id == "nope"));
        assert_eq!(p.task_count(), 5);
    }

    #[test]
    fn delete_removes_subtree() {
        let mut p = sample();
        let removed = p.delete_task("c").unwrap();
        assert_eq!(removed.sub_tasks.len(), 1);
        assert!(p.find("c").is_none());
        assert!(p.find("d").is_none());
        assert_eq!(p.task_count(), 3);
        assert!(p.delete_task("c").is_err());
    }

    #[test]
    fn update_dates_leaves_children_alone() {
        let mut p = sample();
        let update = TaskUpdate {
            task_id: "a".into(),
            start: d(2024, 2, 1),
            end: d(2024, 2, 3),
        };
        p.update_dates(&update).unwrap();
        let a = p.find("a").unwrap();
        assert_eq!((a.start, a.end), (d(2024, 2, 1), d(2024, 2, 3)));
        assert_eq!(p.find("b").unwrap().start, d(2024, 1, 1));
    }

    #[test]
    fn update_dates_rejects_reversed_range() {
        let mut p = sample();
        let update = TaskUpdate {
            task_id: "a".into(),
            start: d(2024, 2, 3),
            end: d(2024, 2, 1),
        };
        assert!(matches!(p.update_dates(&update), Err(Error::InvalidRange { .. })));
    }
}
