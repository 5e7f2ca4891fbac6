//! # Services
//!
//! Business operations that sit between the HTTP handlers and the stores.

pub mod task_service;

pub use task_service::TaskService;
