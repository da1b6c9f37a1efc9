//! Category membership index

use crate::types::{CategoryId, TaskId};
use std::collections::{BTreeSet, HashMap};

/// Which tasks belong to which category.
///
/// Kept next to the task map by [`super::Board`]; a task id appears under at
/// most one category at a time.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    members: HashMap<CategoryId, BTreeSet<TaskId>>,
}

impl CategoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id` as a member of `category`
    pub fn insert(&mut self, category: &CategoryId, id: &TaskId) {
        self.members
            .entry(category.clone())
            .or_default()
            .insert(id.clone());
    }

    /// Forget `id` as a member of `category`; returns whether it was there
    pub fn remove(&mut self, category: &CategoryId, id: &TaskId) -> bool {
        let Some(members) = self.members.get_mut(category) else {
            return false;
        };
        let removed = members.remove(id);
        if members.is_empty() {
            self.members.remove(category);
        }
        removed
    }

    /// Members of `category`, in id order
    pub fn members(&self, category: &CategoryId) -> impl Iterator<Item = &TaskId> {
        self.members.get(category).into_iter().flatten()
    }

    /// Whether `id` is recorded under `category`
    pub fn contains(&self, category: &CategoryId, id: &TaskId) -> bool {
        self.members
            .get(category)
            .is_some_and(|members| members.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove() {
        let mut index = CategoryIndex::new();
        let todo = CategoryId::from("Todo");
        let t1 = TaskId::from("t1");
        let t2 = TaskId::from("t2");

        index.insert(&todo, &t2);
        index.insert(&todo, &t1);
        assert_eq!(index.members(&todo).collect::<Vec<_>>(), vec![&t1, &t2]);

        assert!(index.remove(&todo, &t1));
        assert!(!index.remove(&todo, &t1));
        assert!(index.contains(&todo, &t2));
        assert!(!index.contains(&todo, &t1));
    }

    #[test]
    fn test_empty_category_is_dropped() {
        let mut index = CategoryIndex::new();
        let todo = CategoryId::from("Todo");
        index.insert(&todo, &TaskId::from("t1"));
        index.remove(&todo, &TaskId::from("t1"));

        assert!(!index.members.contains_key(&todo));
        assert_eq!(index.members(&todo).count(), 0);
    }
}
