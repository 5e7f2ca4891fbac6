//! # Item Store
//!
//! Insertion-ordered dictionary items keyed by id.

use parking_lot::RwLock;

use crate::models::{Item, ItemUpdate};

#[derive(Debug, Default)]
pub struct ItemStore {
    items: RwLock<Vec<Item>>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, item: Item) -> Item {
        let snapshot = item.clone();
        self.items.write().push(item);
        snapshot
    }

    pub fn list(&self) -> Vec<Item> {
        self.items.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<Item> {
        self.items.read().iter().find(|item| item.id == id).cloned()
    }

    pub fn update(&self, id: &str, update: ItemUpdate) -> Option<Item> {
        let mut items = self.items.write();
        let item = items.iter_mut().find(|item| item.id == id)?;
        item.apply(update);
        Some(item.clone())
    }

    pub fn remove(&self, id: &str) -> Option<Item> {
        let mut items = self.items.write();
        let index = items.iter().position(|item| item.id == id)?;
        Some(items.remove(index))
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}
