//! Board-wide stacking order.
//!
//! Every task on a board holds a distinct `z` of at least the stack's base.
//! Raising a task takes it out of the stack, closes the gap it leaves, and
//! puts it back on top.

use super::slots::{first_free_slot, has_duplicates};
use crate::types::{Task, TaskId};
use tracing::debug;

/// Lowest z a task can hold; values below it are reserved for board chrome.
pub const BASE_Z_INDEX: u32 = 5;

/// Assigns and maintains `Task::z` across a whole board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackEngine {
    base: u32,
}

impl StackEngine {
    /// Create a stack whose lowest position is `base`
    pub fn new(base: u32) -> Self {
        Self { base }
    }

    /// Lowest z this stack hands out
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Raise `task` above every other task.
    ///
    /// If the task already has a z, every task above it drops by one first.
    /// The task then takes the lowest free z at or above the base, which is
    /// the top of the stack because the stack stays dense.
    ///
    /// Returns the ids of every task whose z changed, `task` included.
    pub fn bring_to_front<'a, I>(&self, others: I, task: &mut Task) -> Vec<TaskId>
    where
        I: IntoIterator<Item = &'a mut Task>,
    {
        let mut others: Vec<&mut Task> = others
            .into_iter()
            .filter(|other| other.id != task.id)
            .collect();

        let mut changed = Self::close_gap(&mut others, task.z);
        let top = first_free_slot(others.iter().filter_map(|t| t.z), self.base);
        if task.z != Some(top) {
            debug!("Raising {} from {:?} to z {}", task.id, task.z, top);
        }
        task.z = Some(top);
        changed.push(task.id.clone());

        debug_assert!(
            !has_duplicates(others.iter().filter_map(|t| t.z).chain(task.z)),
            "duplicate z after raising {}",
            task.id
        );
        debug_assert!(
            others.iter().filter_map(|t| t.z).all(|z| z >= self.base),
            "z below base {} after raising {}",
            self.base,
            task.id
        );
        changed
    }

    /// Take `task` out of the stack, dropping every task above it by one.
    ///
    /// Used when a task leaves the board so the next raise still lands on top.
    pub fn remove_from_stack<'a, I>(&self, others: I, task: &mut Task) -> Vec<TaskId>
    where
        I: IntoIterator<Item = &'a mut Task>,
    {
        let mut others: Vec<&mut Task> = others
            .into_iter()
            .filter(|other| other.id != task.id)
            .collect();
        let changed = Self::close_gap(&mut others, task.z.take());

        debug_assert!(
            !has_duplicates(others.iter().filter_map(|t| t.z)),
            "duplicate z after removing {}",
            task.id
        );
        changed
    }

    fn close_gap(others: &mut [&mut Task], vacated: Option<u32>) -> Vec<TaskId> {
        let Some(vacated) = vacated else {
            return Vec::new();
        };
        let mut changed = Vec::new();
        for other in others.iter_mut() {
            if let Some(z) = other.z {
                if z > vacated {
                    other.z = Some(z - 1);
                    changed.push(other.id.clone());
                }
            }
        }
        changed
    }
}

impl Default for StackEngine {
    fn default() -> Self {
        Self::new(BASE_Z_INDEX)
    }
}
