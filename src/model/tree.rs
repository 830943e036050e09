//! Tree flattening and the expand/collapse side table.

use std::collections::HashMap;

use super::task::Task;

/// Pre-order traversal of the task forest: each task is immediately followed
/// by its subtree, in stored order.
pub fn flatten(tasks: &[Task]) -> Vec<&Task> {
    fn walk<'a>(task: &'a Task, out: &mut Vec<&'a Task>) {
        out.push(task);
        for child in &task.sub_tasks {
            walk(child, out);
        }
    }

    let mut out = Vec::new();
    for task in tasks {
        walk(task, &mut out);
    }
    out
}

/// Expanded/collapsed flag per task id, kept outside the task tree.
/// Ids not present are expanded.
#[derive(Debug, Clone, Default)]
pub struct ExpandState {
    flags: HashMap<String, bool>,
}

impl ExpandState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.flags.get(id).copied().unwrap_or(true)
    }

    pub fn set_expanded(&mut self, id: &str, expanded: bool) {
        self.flags.insert(id.to_string(), expanded);
    }

    /// Flip the flag and return the new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        let expanded = !self.is_expanded(id);
        self.set_expanded(id, expanded);
        expanded
    }

    /// Drop entries for ids no longer present in the forest.
    pub fn retain_existing(&mut self, tasks: &[Task]) {
        let live: std::collections::HashSet<&str> =
            flatten(tasks).into_iter().map(|t| t.id.as_str()).collect();
        self.flags.retain(|id, _| live.contains(id.as_str()));
    }
}

/// A task as laid out in the grid / timeline.
#[derive(Debug, Clone)]
pub struct FlatRow<'a> {
    pub task: &'a Task,
    pub depth: usize,
    /// Work-breakdown code derived from tree position, e.g. `2.1.3`.
    pub wbs: String,
    pub has_children: bool,
    pub expanded: bool,
}

/// Pre-order rows, skipping the descendants of collapsed tasks.
pub fn visible_rows<'a>(tasks: &'a [Task], expand: &ExpandState) -> Vec<FlatRow<'a>> {
    fn walk<'a>(
        task: &'a Task,
        depth: usize,
        wbs: String,
        expand: &ExpandState,
        out: &mut Vec<FlatRow<'a>>,
    ) {
        let expanded = expand.is_expanded(&task.id);
        out.push(FlatRow {
            task,
            depth,
            wbs: wbs.clone(),
            has_children: task.has_children(),
            expanded,
        });
        if expanded {
            for (i, child) in task.sub_tasks.iter().enumerate() {
                walk(child, depth + 1, format!("{}.{}", wbs, i + 1), expand, out);
            }
        }
    }

    let mut out = Vec::new();
    for (i, task) in tasks.iter().enumerate() {
        walk(task, 0, (i + 1).to_string(), expand, &mut out);
    }
    out
}
