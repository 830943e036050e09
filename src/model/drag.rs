//! Task-bar placement and the drag-to-date-range reducer.
//!
//! Bars are laid out on a fixed day grid: `left` is the whole-day distance
//! from the window start times the column width, `width` covers every day of
//! the inclusive range minus a small visual gap. A finished drag gesture is
//! mapped back to dates by snapping its pixel delta to whole days.

use chrono::{Duration, NaiveDate};

use super::task::Task;

pub const DEFAULT_DAY_WIDTH: f32 = 32.0;
pub const DEFAULT_BAR_GAP: f32 = 4.0;

/// Which endpoint(s) of a task a drag gesture moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragRole {
    Move,
    ResizeStart,
    ResizeEnd,
}

impl DragRole {
    pub fn all() -> &'static [DragRole] {
        &[DragRole::Move, DragRole::ResizeStart, DragRole::ResizeEnd]
    }

    pub fn key(&self) -> &'static str {
        match self {
            DragRole::Move => "move",
            DragRole::ResizeStart => "resize-start",
            DragRole::ResizeEnd => "resize-end",
        }
    }
}

/// Horizontal span of a task bar, relative to the window start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSpan {
    pub left: f32,
    pub width: f32,
}

impl BarSpan {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

/// An inclusive calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Column width and gap that turn dates into pixels and back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub day_width: f32,
    pub bar_gap: f32,
}

impl Default for BarGeometry {
    fn default() -> Self {
        Self {
            day_width: DEFAULT_DAY_WIDTH,
            bar_gap: DEFAULT_BAR_GAP,
        }
    }
}

impl BarGeometry {
    pub fn new(day_width: f32, bar_gap: f32) -> Self {
        Self { day_width, bar_gap }
    }

    /// Place a task's bar. `left` is negative when the task starts before
    /// the window; clipping is the caller's job.
    pub fn position(&self, task: &Task, window_start: NaiveDate) -> BarSpan {
        self.span(task.start, task.end, window_start)
    }

    pub fn span(&self, start: NaiveDate, end: NaiveDate, window_start: NaiveDate) -> BarSpan {
        let left = (start - window_start).num_days() as f32 * self.day_width;
        let width = ((end - start).num_days() + 1) as f32 * self.day_width - self.bar_gap;
        BarSpan { left, width }
    }

    /// Snap a pixel delta to whole days, rounding halves up.
    pub fn days_dragged(&self, delta_x: f32) -> i64 {
        (delta_x / self.day_width + 0.5).floor() as i64
    }

    /// Map a finished drag to a new range. `None` when the delta snaps to
    /// zero days.
    ///
    /// Resizing never inverts the range: pulling the end past the start (or
    /// the start past the end) collapses it to a single day.
    pub fn apply_drag(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        role: DragRole,
        delta_x: f32,
    ) -> Option<DateRange> {
        let days = self.days_dragged(delta_x);
        if days == 0 {
            return None;
        }
        let shift = Duration::days(days);

        let range = match role {
            DragRole::Move => {
                let duration = end - start;
                let new_start = start + shift;
                DateRange {
                    start: new_start,
                    end: new_start + duration,
                }
            }
            DragRole::ResizeEnd => DateRange {
                start,
                end: (end + shift).max(start),
            },
            DragRole::ResizeStart => DateRange {
                start: (start + shift).min(end),
                end,
            },
        };
        Some(range)
    }
}

/// New dates for one task, reported to the task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    pub task_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// What is being dragged. Captured when the gesture starts and consumed
/// exactly once when it ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub task_id: String,
    pub original_start: NaiveDate,
    pub original_end: NaiveDate,
    pub role: DragRole,
}

impl DragPayload {
    pub fn new(task: &Task, role: DragRole) -> Self {
        Self {
            task_id: task.id.clone(),
            original_start: task.start,
            original_end: task.end,
            role,
        }
    }

    /// Resolve the gesture against its accumulated pixel delta.
    pub fn finish(self, delta_x: f32, geometry: &BarGeometry) -> Option<TaskUpdate> {
        let range =
            geometry.apply_drag(self.original_start, self.original_end, self.role, delta_x)?;
        Some(TaskUpdate {
            task_id: self.task_id,
            start: range.start,
            end: range.end,
        })
    }

    /// An aborted drag resolves as a zero delta.
    pub fn abort(self, geometry: &BarGeometry) -> Option<TaskUpdate> {
        self.finish(0.0, geometry)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ActiveGesture {
    payload: DragPayload,
    origin_x: f32,
    delta_x: f32,
}

/// Bookkeeping for the one drag gesture that can be in flight.
///
/// `begin` captures the payload and press position, `update` follows the
/// pointer, and exactly one of `finish` / `cancel` consumes the gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragTracker {
    active: Option<ActiveGesture>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, task: &Task, role: DragRole, origin_x: f32) {
        self.active = Some(ActiveGesture {
            payload: DragPayload::new(task, role),
            origin_x,
            delta_x: 0.0,
        });
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Follow the pointer. Ignored when no gesture is in flight.
    pub fn update(&mut self, pointer_x: f32) {
        if let Some(active) = &mut self.active {
            active.delta_x = pointer_x - active.origin_x;
        }
    }

    /// Role and raw pixel delta of the gesture on `task_id`, if any.
    pub fn live(&self, task_id: &str) -> Option<(DragRole, f32)> {
        self.active
            .as_ref()
            .filter(|a| a.payload.task_id == task_id)
            .map(|a| (a.payload.role, a.delta_x))
    }

    /// Drop the gesture without changing any dates.
    pub fn cancel(&mut self, geometry: &BarGeometry) -> Option<TaskUpdate> {
        self.active.take().and_then(|a| a.payload.abort(geometry))
    }

    /// End the gesture on `task_id` / `role`. A stop from any other bar or
    /// handle leaves the tracker untouched and reports nothing.
    pub fn finish(
        &mut self,
        task_id: &str,
        role: DragRole,
        geometry: &BarGeometry,
    ) -> Option<TaskUpdate> {
        let matches = self
            .active
            .as_ref()
            .is_some_and(|a| a.payload.task_id == task_id && a.payload.role == role);
        if !matches {
            return None;
        }
        let active = self.active.take()?;
        active.payload.finish(active.delta_x, geometry)
    }
}
