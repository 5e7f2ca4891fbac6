//! # Task Store
//!
//! Insertion-ordered task records keyed by id.

use chrono::Utc;
use parking_lot::RwLock;

use crate::models::{Task, TaskFilter, TaskUpdate};

#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, task: Task) -> Task {
        let snapshot = task.clone();
        self.tasks.write().push(task);
        snapshot
    }

    /// All tasks matching `filter`, in insertion order
    pub fn list(&self, filter: &TaskFilter) -> Vec<Task> {
        self.tasks
            .read()
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<Task> {
        self.tasks.read().iter().find(|task| task.id == id).cloned()
    }

    /// Apply `update` and return the post-update snapshot
    pub fn update(&self, id: &str, update: TaskUpdate) -> Option<Task> {
        self.modify(id, |task| task.apply(update, Utc::now()))
    }

    /// Mark completed and return the post-update snapshot
    pub fn complete(&self, id: &str) -> Option<Task> {
        self.modify(id, |task| task.mark_completed(Utc::now()))
    }

    /// Remove the record and return its last known state
    pub fn remove(&self, id: &str) -> Option<Task> {
        let mut tasks = self.tasks.write();
        let index = tasks.iter().position(|task| task.id == id)?;
        Some(tasks.remove(index))
    }

    pub fn len(&self) -> usize {
        self.tasks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.read().is_empty()
    }

    /// The first `limit` tasks in insertion order
    pub fn head(&self, limit: usize) -> Vec<Task> {
        self.tasks.read().iter().take(limit).cloned().collect()
    }

    fn modify(&self, id: &str, mutate: impl FnOnce(&mut Task)) -> Option<Task> {
        let mut tasks = self.tasks.write();
        let task = tasks.iter_mut().find(|task| task.id == id)?;
        mutate(task);
        Some(task.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTask;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn new_task(title: &str, priority: &str) -> Task {
        Task::new(
            NewTask {
                title: title.to_string(),
                description: format!("{title} description"),
                priority: priority.to_string(),
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_insert_get_remove() {
        let store = TaskStore::new();
        let task = store.insert(new_task("a", "medium"));

        assert_eq!(store.get(&task.id), Some(task.clone()));
        assert_eq!(store.remove(&task.id), Some(task.clone()));
        assert_eq!(store.get(&task.id), None);
        assert_eq!(store.remove(&task.id), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_list_preserves_insertion_order_and_filters() {
        let store = TaskStore::new();
        let a = store.insert(new_task("a", "high"));
        let b = store.insert(new_task("b", "low"));
        let c = store.insert(new_task("c", "high"));
        store.complete(&c.id).unwrap();

        let all: Vec<String> = store
            .list(&TaskFilter::default())
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(all, vec![a.id.clone(), b.id.clone(), c.id.clone()]);

        let completed = store.list(&TaskFilter {
            status: Some("completed".to_string()),
            priority: None,
        });
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, c.id);

        let high_pending = store.list(&TaskFilter {
            status: Some("pending".to_string()),
            priority: Some("high".to_string()),
        });
        assert_eq!(high_pending.len(), 1);
        assert_eq!(high_pending[0].id, a.id);
    }

    #[test]
    fn test_update_missing_task() {
        let store = TaskStore::new();
        assert!(store.update("missing", TaskUpdate::default()).is_none());
        assert!(store.complete("missing").is_none());
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let store = Arc::new(TaskStore::new());
        let ids: Vec<String> = (0..8)
            .map(|i| store.insert(new_task(&format!("t{i}"), "medium")).id)
            .collect();

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let store = Arc::clone(&store);
                let ids = ids.clone();
                std::thread::spawn(move || {
                    for id in &ids {
                        store.update(
                            id,
                            TaskUpdate {
                                description: Some(format!("worker {worker}")),
                                ..TaskUpdate::default()
                            },
                        );
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 8);
        let unique: HashSet<String> = store
            .list(&TaskFilter::default())
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(unique.len(), 8);
    }
}
