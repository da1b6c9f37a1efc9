//! Dense slot ordering within a single category.
//!
//! Orders are 1-based. Inserting into an occupied slot shifts everything at
//! or after it one slot right; removing shifts everything after it one slot
//! left. The renderer can therefore use `order` directly as a sort key.

use super::slots::{first_free_slot, has_duplicates};
use crate::types::{Task, TaskId};
use tracing::debug;

/// The first slot of every category
pub const FIRST_SLOT: u32 = 1;

/// Assigns and maintains `Task::order` within one category
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderingEngine;

impl OrderingEngine {
    /// Smallest positive slot not present in `occupied`
    pub fn minimum_unused_slot<I>(occupied: I) -> u32
    where
        I: IntoIterator<Item = u32>,
    {
        first_free_slot(occupied, FIRST_SLOT)
    }

    /// Give `task` a slot among the other members of its category.
    ///
    /// Without a target the task takes the lowest free slot. With a target
    /// that another task holds, every other task at or after the target moves
    /// one slot right first. A free target is taken as-is; holes the engine
    /// did not create are left alone. A target of 0 is treated as 1.
    ///
    /// Returns the ids of every task whose order changed, `task` included.
    pub fn insert_at<'a, I>(others: I, task: &mut Task, target: Option<u32>) -> Vec<TaskId>
    where
        I: IntoIterator<Item = &'a mut Task>,
    {
        let mut others: Vec<&mut Task> = others
            .into_iter()
            .filter(|other| other.id != task.id)
            .collect();
        let mut changed = Vec::new();

        let slot = match target {
            None => Self::minimum_unused_slot(others.iter().filter_map(|t| t.order)),
            Some(target) => {
                let target = target.max(FIRST_SLOT);
                if others.iter().any(|t| t.order == Some(target)) {
                    for other in others.iter_mut() {
                        if let Some(order) = other.order {
                            if order >= target {
                                other.order = Some(order + 1);
                                changed.push(other.id.clone());
                            }
                        }
                    }
                    debug!(
                        "Shifted {} task(s) right to open slot {}",
                        changed.len(),
                        target
                    );
                }
                target
            }
        };

        task.order = Some(slot);
        changed.push(task.id.clone());

        debug_assert!(
            !has_duplicates(others.iter().filter_map(|t| t.order).chain(task.order)),
            "duplicate order after inserting {} at {}",
            task.id,
            slot
        );
        changed
    }

    /// Take `task` out of its category's ordering.
    ///
    /// Every other task after it moves one slot left and `task.order` is
    /// cleared, so a task in transit never carries a stale slot into its next
    /// category. A task without an order is left untouched.
    ///
    /// Returns the ids of every task whose order changed, `task` included.
    pub fn remove_from_category<'a, I>(others: I, task: &mut Task) -> Vec<TaskId>
    where
        I: IntoIterator<Item = &'a mut Task>,
    {
        let Some(removed) = task.order.take() else {
            return Vec::new();
        };

        let mut others: Vec<&mut Task> = others
            .into_iter()
            .filter(|other| other.id != task.id)
            .collect();
        let mut changed = Vec::new();

        for other in others.iter_mut() {
            if let Some(order) = other.order {
                if order > removed {
                    other.order = Some(order - 1);
                    changed.push(other.id.clone());
                }
            }
        }
        changed.push(task.id.clone());

        debug_assert!(
            !has_duplicates(others.iter().filter_map(|t| t.order)),
            "duplicate order after removing {} from slot {}",
            task.id,
            removed
        );
        changed
    }
}
