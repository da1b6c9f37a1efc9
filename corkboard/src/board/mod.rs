//! The board: tasks, their categories and their placement.
//!
//! A [`Board`] owns its task map and the [`CategoryIndex`] beside it, and is
//! the only thing that calls the ordering and stacking engines. Each mutator
//! takes the moving task out of the map, runs the engines over the remaining
//! tasks, and puts it back, so the engines never see the task twice.

mod events;
mod index;
mod spawn;

pub use events::{BoardEvent, ChangeSet, EventBus, TaskView};
pub use index::CategoryIndex;
pub use spawn::{compute_spawn_position, SpawnConfig};

use crate::engine::{OrderingEngine, StackEngine, BASE_Z_INDEX};
use crate::error::{BoardError, Result};
use crate::logging::Pretty;
use crate::template::Template;
use crate::types::{
    clamp, BoardMeta, CardSize, CategoryId, NewTask, Point, Task, TaskFlag, TaskId, Viewport,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::{HashMap, HashSet};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Placement parameters shared by every board of an application
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardSettings {
    /// Lowest z handed out
    pub base_z: u32,
    /// Card extent used when clamping free-form positions
    pub card: CardSize,
    pub spawn: SpawnConfig,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            base_z: BASE_Z_INDEX,
            card: CardSize::default(),
            spawn: SpawnConfig::default(),
        }
    }
}

/// A board and its tasks
#[derive(Debug)]
pub struct Board {
    meta: BoardMeta,
    template: Template,
    settings: BoardSettings,
    stack: StackEngine,
    tasks: HashMap<TaskId, Task>,
    index: CategoryIndex,
    events: EventBus,
}

/// Tasks recorded under `category`, borrowed mutably from the task map.
fn members_mut<'a>(
    tasks: &'a mut HashMap<TaskId, Task>,
    index: &'a CategoryIndex,
    category: &'a CategoryId,
) -> impl Iterator<Item = &'a mut Task> + 'a {
    tasks
        .iter_mut()
        .filter(move |(id, _)| index.contains(category, id))
        .map(|(_, task)| task)
}

impl Board {
    /// Create an empty board. The board records the name of the template it
    /// was actually given.
    pub fn new(mut meta: BoardMeta, template: Template, settings: BoardSettings) -> Self {
        meta.template = template.name.clone();
        Self {
            meta,
            template,
            stack: StackEngine::new(settings.base_z),
            settings,
            tasks: HashMap::new(),
            index: CategoryIndex::new(),
            events: EventBus::default(),
        }
    }

    /// Rebuild a board from stored tasks.
    ///
    /// Stored placement is trusted only as a ranking. Tasks in a category the
    /// template does not offer go to the default category; every category is
    /// renumbered `1..n` in stored order, and the board's z values are
    /// renumbered from the base in stored order. Tasks missing an order or a
    /// z rank after those that have one. A repeated id keeps its first record.
    pub fn hydrate(
        meta: BoardMeta,
        template: Template,
        settings: BoardSettings,
        stored: Vec<Task>,
    ) -> Self {
        let mut board = Self::new(meta, template, settings);

        let mut seen = HashSet::new();
        let mut tasks: Vec<Task> = Vec::with_capacity(stored.len());
        for mut task in stored {
            if !seen.insert(task.id.clone()) {
                warn!(
                    "Dropping duplicate task {} on board '{}'",
                    task.id, board.meta.name
                );
                continue;
            }
            let category = board.template.resolve(task.category.as_ref());
            if task.category.as_ref() != Some(&category) {
                debug!(
                    "Task {} moved from {:?} to default category '{}'",
                    task.id, task.category, category
                );
                task.category = Some(category);
            }
            tasks.push(task);
        }

        tasks.sort_by(|a, b| {
            (a.z.is_none(), a.z, &a.id).cmp(&(b.z.is_none(), b.z, &b.id))
        });
        for (rank, task) in (0u32..).zip(tasks.iter_mut()) {
            task.z = Some(settings.base_z + rank);
        }

        let mut by_category: HashMap<CategoryId, Vec<&mut Task>> = HashMap::new();
        for task in tasks.iter_mut() {
            if let Some(category) = task.category.clone() {
                by_category.entry(category).or_default().push(task);
            }
        }
        for members in by_category.values_mut() {
            members.sort_by(|a, b| {
                (a.order.is_none(), a.order, &a.id).cmp(&(b.order.is_none(), b.order, &b.id))
            });
            for (order, task) in (1u32..).zip(members.iter_mut()) {
                task.order = Some(order);
            }
        }

        for task in tasks {
            if let Some(category) = &task.category {
                board.index.insert(category, &task.id);
            }
            board.tasks.insert(task.id.clone(), task);
        }

        info!(
            "Loaded board '{}' with {} task(s)",
            board.meta.name,
            board.tasks.len()
        );
        board
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn meta(&self) -> &BoardMeta {
        &self.meta
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    /// Whether the board shows categories as columns instead of free-form
    pub fn is_list_view(&self) -> bool {
        self.meta.list
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Look up a task, failing if it is not on this board
    pub fn task(&self, id: &TaskId) -> Result<&Task> {
        self.tasks.get(id).ok_or_else(|| BoardError::task_not_found(id))
    }

    /// Members of `category`, sorted by order
    pub fn tasks_in_category(&self, category: &CategoryId) -> Vec<&Task> {
        let mut members: Vec<&Task> = self
            .index
            .members(category)
            .filter_map(|id| self.tasks.get(id))
            .collect();
        members.sort_by(|a, b| (a.order, &a.id).cmp(&(b.order, &b.id)));
        members
    }

    /// Every task, bottom of the stack first
    pub fn tasks_by_z(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.values().collect();
        tasks.sort_by(|a, b| (a.z, &a.id).cmp(&(b.z, &b.id)));
        tasks
    }

    /// Every task, oldest first, ready to be stored
    pub fn snapshot(&self) -> Vec<Task> {
        let mut tasks: Vec<Task> = self.tasks.values().cloned().collect();
        tasks.sort_by(|a, b| a.id.cmp(&b.id));
        tasks
    }

    /// Get a receiver for every event this board publishes from now on
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.meta.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.meta.description = description.into();
    }

    /// Width of the board area
    pub fn width(&self) -> f64 {
        self.meta.width
    }

    pub fn set_width(&mut self, width: f64) {
        self.meta.width = width;
    }

    /// Put a task into a category.
    ///
    /// An unknown or missing category falls back to the template default.
    /// Without a position the task takes the lowest free slot. A task that is
    /// already in a category is moved.
    pub fn place_in_category(
        &mut self,
        id: &TaskId,
        category: Option<&CategoryId>,
        position: Option<u32>,
    ) -> Result<ChangeSet> {
        let mut changes = ChangeSet::new();
        self.relocate(id, category, position, &mut changes)?;
        self.publish_changes(&changes);
        Ok(changes)
    }

    /// Move a task out of its current category and into `category`.
    ///
    /// Removal happens first, so moving within one category lands the task
    /// at `position` of the renumbered list.
    pub fn move_to_category(
        &mut self,
        id: &TaskId,
        category: Option<&CategoryId>,
        position: Option<u32>,
    ) -> Result<ChangeSet> {
        self.place_in_category(id, category, position)
    }

    fn relocate(
        &mut self,
        id: &TaskId,
        category: Option<&CategoryId>,
        position: Option<u32>,
        changes: &mut ChangeSet,
    ) -> Result<()> {
        let mut task = self
            .tasks
            .remove(id)
            .ok_or_else(|| BoardError::task_not_found(id))?;
        let mut changed = Vec::new();

        if let Some(old) = task.category.take() {
            self.index.remove(&old, &task.id);
            changed.extend(OrderingEngine::remove_from_category(
                members_mut(&mut self.tasks, &self.index, &old),
                &mut task,
            ));
        }

        let target = self.template.resolve(category);
        if let Some(requested) = category.filter(|c| **c != target) {
            debug!(
                "Category '{}' not in template '{}', using '{}'",
                requested, self.template.name, target
            );
        }

        changed.extend(OrderingEngine::insert_at(
            members_mut(&mut self.tasks, &self.index, &target),
            &mut task,
            position,
        ));
        self.index.insert(&target, &task.id);
        task.category = Some(target);

        self.tasks.insert(task.id.clone(), task);
        self.record(changed, changes);
        Ok(())
    }

    /// Move a task to `point`, clamped so the card stays inside `viewport`,
    /// and raise it to the top of the stack.
    pub fn drag_to(&mut self, id: &TaskId, point: Point, viewport: Viewport) -> Result<ChangeSet> {
        let mut task = self
            .tasks
            .remove(id)
            .ok_or_else(|| BoardError::task_not_found(id))?;

        let clamped = self.clamp_to(point, viewport);
        task.x = clamped.x;
        task.y = clamped.y;
        let changed = self.stack.bring_to_front(self.tasks.values_mut(), &mut task);

        self.tasks.insert(task.id.clone(), task);
        let mut changes = ChangeSet::new();
        self.record(changed, &mut changes);
        self.publish_changes(&changes);
        Ok(changes)
    }

    /// Raise a task above every other task
    pub fn bring_to_front(&mut self, id: &TaskId) -> Result<ChangeSet> {
        let mut task = self
            .tasks
            .remove(id)
            .ok_or_else(|| BoardError::task_not_found(id))?;
        let changed = self.stack.bring_to_front(self.tasks.values_mut(), &mut task);
        self.tasks.insert(task.id.clone(), task);

        let mut changes = ChangeSet::new();
        self.record(changed, &mut changes);
        self.publish_changes(&changes);
        Ok(changes)
    }

    fn clamp_to(&self, point: Point, viewport: Viewport) -> Point {
        let card = self.settings.card;
        let x = clamp(0.0, point.x, viewport.width - card.width);
        let y = match viewport.height {
            Some(height) => clamp(0.0, point.y, height - card.height),
            None => point.y.max(0.0),
        };
        Point::new(x, y)
    }

    /// Where a new card would appear on a board `viewport_width` wide
    pub fn spawn_position(&self, viewport_width: f64) -> Point {
        let existing: Vec<Point> = self.tasks.values().map(Task::position).collect();
        compute_spawn_position(
            &existing,
            viewport_width,
            self.settings.card.width,
            &self.settings.spawn,
        )
    }

    /// Create a task, stamped with the current time
    pub fn create_task(&mut self, new: NewTask, viewport_width: f64) -> Result<(TaskId, ChangeSet)> {
        self.create_task_at(new, viewport_width, Utc::now())
    }

    /// Create a task stamped with `created`.
    ///
    /// The id is `created` in RFC 3339; if another task already holds it the
    /// stamp moves forward a millisecond at a time. The task appears at its
    /// requested position or the next free spawn position, on top of the
    /// stack, in its requested category.
    pub fn create_task_at(
        &mut self,
        new: NewTask,
        viewport_width: f64,
        created: DateTime<Utc>,
    ) -> Result<(TaskId, ChangeSet)> {
        let mut at = created;
        let mut id = TaskId::at(at);
        while self.tasks.contains_key(&id) {
            at += Duration::milliseconds(1);
            id = TaskId::at(at);
        }

        let position = new
            .position
            .unwrap_or_else(|| self.spawn_position(viewport_width));
        let mut task = Task::new(id.clone(), new.text).at(position);
        task.due = new.due;

        self.stack.bring_to_front(self.tasks.values_mut(), &mut task);
        self.tasks.insert(id.clone(), task);

        let mut changes = ChangeSet::new();
        self.relocate(&id, new.category.as_ref(), new.slot, &mut changes)?;
        if let Some(task) = self.tasks.get(&id) {
            changes.record(task);
            info!("Created task {} {}", id, Pretty(&TaskView::from(task)));
        }
        self.publish_changes(&changes);
        Ok((id, changes))
    }

    /// Remove a task, closing the gaps it leaves in its category and the stack
    pub fn delete_task(&mut self, id: &TaskId) -> Result<ChangeSet> {
        let mut task = self
            .tasks
            .remove(id)
            .ok_or_else(|| BoardError::task_not_found(id))?;
        let mut changed = Vec::new();

        if let Some(category) = task.category.take() {
            self.index.remove(&category, &task.id);
            changed.extend(OrderingEngine::remove_from_category(
                members_mut(&mut self.tasks, &self.index, &category),
                &mut task,
            ));
        }
        changed.extend(self.stack.remove_from_stack(self.tasks.values_mut(), &mut task));

        let mut changes = ChangeSet::new();
        self.record(changed, &mut changes);
        changes.record_removed(task.id.clone());
        info!("Deleted task {} from board '{}'", task.id, self.meta.name);
        self.publish_changes(&changes);
        Ok(changes)
    }

    /// Whether a task may be dragged: pinned tasks stay put on a free-form board
    pub fn can_drag(&self, id: &TaskId) -> Result<bool> {
        let task = self.task(id)?;
        Ok(self.meta.list || !task.pinned)
    }

    /// Flip a flag, returning its new value
    pub fn toggle(&mut self, id: &TaskId, flag: TaskFlag) -> Result<bool> {
        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| BoardError::task_not_found(id))?;
        let value = task.toggle(flag);
        debug!("Task {} {} = {}", id, flag, value);
        self.publish_edit(id);
        Ok(value)
    }

    pub fn set_text(&mut self, id: &TaskId, text: impl Into<String>) -> Result<()> {
        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| BoardError::task_not_found(id))?;
        task.text = text.into();
        self.publish_edit(id);
        Ok(())
    }

    /// Set or clear the due date
    pub fn set_due(&mut self, id: &TaskId, due: Option<NaiveDate>) -> Result<()> {
        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| BoardError::task_not_found(id))?;
        task.due = due;
        self.publish_edit(id);
        Ok(())
    }

    /// Switch between list and free-form view, returning whether list view is now on
    pub fn toggle_list_view(&mut self) -> bool {
        self.set_list_view(!self.meta.list);
        self.meta.list
    }

    pub fn set_list_view(&mut self, list: bool) {
        if self.meta.list == list {
            return;
        }
        self.meta.list = list;
        info!(
            "Board '{}' switched to {} view",
            self.meta.name,
            if list { "list" } else { "free-form" }
        );
        self.events.publish(BoardEvent::ViewModeChanged {
            board: self.meta.name.clone(),
            list,
        });
    }

    /// Clamp every task back inside `viewport`. Stacking is left alone.
    pub fn move_tasks_into_view(&mut self, viewport: Viewport) -> ChangeSet {
        let mut changes = ChangeSet::new();
        let clamped: Vec<(TaskId, Point)> = self
            .tasks
            .values()
            .filter_map(|task| {
                let target = self.clamp_to(task.position(), viewport);
                (target != task.position()).then(|| (task.id.clone(), target))
            })
            .collect();

        for (id, point) in clamped {
            if let Some(task) = self.tasks.get_mut(&id) {
                task.x = point.x;
                task.y = point.y;
                changes.record(task);
            }
        }
        self.publish_changes(&changes);
        changes
    }

    /// Switch to another template.
    ///
    /// Tasks in categories the new template lacks are appended to its
    /// default category, bottom of the stack first. Categories both
    /// templates share keep their orders.
    pub fn change_template(&mut self, template: Template) -> Result<ChangeSet> {
        info!(
            "Board '{}' template '{}' -> '{}'",
            self.meta.name, self.template.name, template.name
        );
        self.meta.template = template.name.clone();
        self.template = template;

        let mut displaced: Vec<&Task> = self
            .tasks
            .values()
            .filter(|task| {
                task.category
                    .as_ref()
                    .is_some_and(|category| !self.template.contains(category))
            })
            .collect();
        displaced.sort_by(|a, b| (a.z, &a.id).cmp(&(b.z, &b.id)));
        let displaced: Vec<TaskId> = displaced.into_iter().map(|t| t.id.clone()).collect();

        let mut changes = ChangeSet::new();
        for id in &displaced {
            self.relocate(id, None, None, &mut changes)?;
        }
        self.publish_changes(&changes);
        Ok(changes)
    }

    fn record(&self, ids: Vec<TaskId>, changes: &mut ChangeSet) {
        for id in ids {
            if let Some(task) = self.tasks.get(&id) {
                changes.record(task);
            }
        }
    }

    fn publish_changes(&self, changes: &ChangeSet) {
        if changes.is_empty() {
            return;
        }
        self.events.publish(BoardEvent::Changed {
            board: self.meta.name.clone(),
            changes: changes.clone(),
        });
    }

    fn publish_edit(&self, id: &TaskId) {
        if let Some(task) = self.tasks.get(id) {
            self.events.publish(BoardEvent::Edited {
                board: self.meta.name.clone(),
                task: Box::new(task.clone()),
            });
        }
    }
}
