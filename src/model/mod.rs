pub mod action;
pub mod calendar;
pub mod drag;
pub mod header;
pub mod project;
pub mod task;
pub mod timeline;
pub mod tree;
pub mod view;

pub use action::GanttAction;
pub use drag::{BarGeometry, BarSpan, DateRange, DragPayload, DragRole, DragTracker, TaskUpdate};
pub use header::{DateHeaders, DayCell, MonthGroup, WeekGroup};
pub use project::Project;
pub use task::{Task, TaskPriority, TaskStatus};
pub use timeline::TimelineViewport;
pub use tree::{ExpandState, FlatRow};
pub use view::{GanttView, ViewRow};
