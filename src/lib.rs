//! Project-plan Gantt chart: a hierarchical task grid paired with a
//! draggable, resizable timeline.
//!
//! The [`model`] layer is pure date/pixel arithmetic and tree handling; the
//! [`ui`] and [`app`] layers render it with egui.

pub mod app;
pub mod config;
pub mod error;
pub mod model;
pub mod ui;

pub use error::{Error, Result};
