//! # Data Models
//!
//! Records owned by the in-memory stores and the request bodies that create
//! or patch them.

pub mod item;
pub mod task;

pub use item::{Item, ItemUpdate, NewItem};
pub use task::{NewTask, Task, TaskFilter, TaskStatusView, TaskUpdate};
