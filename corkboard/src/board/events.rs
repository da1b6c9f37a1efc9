//! Change sets and the board event channel.
//!
//! Every mutating board operation returns a [`ChangeSet`] describing the
//! placement of each task it touched, and publishes the same information as a
//! [`BoardEvent`] for any view layer that subscribed.

use crate::types::{CategoryId, Task, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::broadcast;

/// Placement of one task as a renderer needs it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskView {
    pub id: TaskId,
    pub category: Option<CategoryId>,
    pub order: Option<u32>,
    pub z: Option<u32>,
    pub x: f64,
    pub y: f64,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            category: task.category.clone(),
            order: task.order,
            z: task.z,
            x: task.x,
            y: task.y,
        }
    }
}

/// Tasks whose placement changed in one operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Final placement of every task that changed, keyed by id
    pub tasks: BTreeMap<TaskId, TaskView>,
    /// Tasks that left the board
    pub removed: Vec<TaskId>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current placement of `task`, replacing any earlier record
    pub fn record(&mut self, task: &Task) {
        self.tasks.insert(task.id.clone(), TaskView::from(task));
    }

    /// Record that `id` was deleted
    pub fn record_removed(&mut self, id: TaskId) {
        self.tasks.remove(&id);
        self.removed.push(id);
    }

    /// Placement recorded for `id`, if it changed
    pub fn get(&self, id: &TaskId) -> Option<&TaskView> {
        self.tasks.get(id)
    }

    /// Whether `id` changed or was removed
    pub fn contains(&self, id: &TaskId) -> bool {
        self.tasks.contains_key(id) || self.removed.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.removed.is_empty()
    }

    /// Number of tasks changed or removed
    pub fn len(&self) -> usize {
        self.tasks.len() + self.removed.len()
    }
}

/// Something a view layer may want to react to
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    /// Tasks were placed, moved, raised or removed
    Changed { board: String, changes: ChangeSet },
    /// A task's text, due date or flags changed
    Edited { board: String, task: Box<Task> },
    /// The board switched between free-form and list view
    ViewModeChanged { board: String, list: bool },
}

/// Broadcast channel for board events.
///
/// Publishing never fails: events sent while nobody listens are dropped.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<BoardEvent>,
}

impl EventBus {
    /// Create a bus that buffers up to `capacity` events per lagging subscriber
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn publish(&self, event: BoardEvent) {
        let _ = self.sender.send(event);
    }

    /// Get a receiver for every event published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_set_keeps_latest_placement() {
        let mut task = Task::new(TaskId::from("t1"), "");
        task.order = Some(1);
        let mut changes = ChangeSet::new();
        changes.record(&task);
        task.order = Some(2);
        changes.record(&task);

        assert_eq!(changes.len(), 1);
        assert_eq!(changes.get(&task.id).unwrap().order, Some(2));
    }

    #[test]
    fn test_removed_task_drops_placement() {
        let task = Task::new(TaskId::from("t1"), "");
        let mut changes = ChangeSet::new();
        changes.record(&task);
        changes.record_removed(task.id.clone());

        assert!(changes.get(&task.id).is_none());
        assert!(changes.contains(&task.id));
        assert_eq!(changes.removed, vec![task.id]);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::default();
        bus.publish(BoardEvent::ViewModeChanged {
            board: "b".into(),
            list: true,
        });
    }

    #[test]
    fn test_subscriber_receives_events() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        bus.publish(BoardEvent::ViewModeChanged {
            board: "b".into(),
            list: true,
        });

        assert_eq!(
            rx.try_recv().unwrap(),
            BoardEvent::ViewModeChanged {
                board: "b".into(),
                list: true
            }
        );
    }
}
