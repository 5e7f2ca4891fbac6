//! # In-Memory Stores
//!
//! Process-lifetime record stores. Each store owns its records behind a
//! `parking_lot::RwLock`; every find-mutate-write sequence runs under a single
//! write guard and callers only ever receive cloned snapshots.

pub mod item_store;
pub mod task_store;

pub use item_store::ItemStore;
pub use task_store::TaskStore;
