//! services/app/src/stores/tasks.rs
//!
//! The task entity store. Same cache discipline as the habit store, without
//! the completion-history reconciliation: task mutations return the full
//! entity.

use std::sync::{Arc, RwLock};

use daykeep_core::domain::{Task, TaskInput, TaskPatch};
use daykeep_core::events::{SuggestionEvent, SuggestionTrigger};
use daykeep_core::ports::{SuggestionSink, TaskBackend};
use tracing::{debug, warn};

use super::error_message;

pub struct TaskStore {
    backend: Arc<dyn TaskBackend>,
    sink: Arc<dyn SuggestionSink>,
    tasks: RwLock<Vec<Task>>,
    error: RwLock<Option<String>>,
    is_loading: RwLock<bool>,
}

impl TaskStore {
    pub fn new(backend: Arc<dyn TaskBackend>, sink: Arc<dyn SuggestionSink>) -> Self {
        Self {
            backend,
            sink,
            tasks: RwLock::new(Vec::new()),
            error: RwLock::new(None),
            is_loading: RwLock::new(false),
        }
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.read().expect("task cache poisoned").clone()
    }

    pub fn error(&self) -> Option<String> {
        self.error.read().expect("error slot poisoned").clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.is_loading.read().expect("loading flag poisoned")
    }

    pub fn clear_error(&self) {
        self.set_error(None);
    }

    /// Replaces the cache with the backend's list, kept in the order the
    /// backend returned it. Mutations below re-sort by creation time.
    pub async fn fetch_all(&self) {
        self.set_loading(true);
        self.set_error(None);
        match self.backend.list_tasks().await {
            Ok(tasks) => {
                *self.tasks.write().expect("task cache poisoned") = tasks;
                self.set_loading(false);
            }
            Err(err) => {
                let message = error_message(&err, "Failed to fetch tasks.");
                warn!(error = %message, "task list fetch failed");
                self.tasks.write().expect("task cache poisoned").clear();
                self.set_error(Some(message));
                self.set_loading(false);
            }
        }
    }

    pub async fn add(&self, input: TaskInput) -> Option<Task> {
        match self.backend.create_task(&input).await {
            Ok(task) => {
                debug!(task_id = %task.id, "task created");
                {
                    let mut tasks = self.tasks.write().expect("task cache poisoned");
                    tasks.insert(0, task.clone());
                    sort_by_created_desc(&mut tasks);
                }
                self.sink
                    .notify(SuggestionEvent::new(SuggestionTrigger::TaskAdded {
                        item_name: task.title.clone(),
                    }));
                Some(task)
            }
            Err(err) => {
                self.set_error(Some(error_message(&err, "Failed to add task.")));
                None
            }
        }
    }

    pub async fn update(&self, task_id: &str, patch: TaskPatch) -> Option<Task> {
        match self.backend.update_task(task_id, &patch).await {
            Ok(task) => {
                self.replace(task.clone());
                Some(task)
            }
            Err(err) => {
                self.set_error(Some(error_message(&err, "Failed to update task.")));
                None
            }
        }
    }

    /// Flips completion relative to the state the caller saw. The backend
    /// returns the full updated task.
    pub async fn toggle(&self, task_id: &str, currently_completed: bool) -> Option<Task> {
        let patch = TaskPatch::completion(!currently_completed);
        match self.backend.update_task(task_id, &patch).await {
            Ok(task) => {
                self.replace(task.clone());
                if task.is_completed {
                    self.sink
                        .notify(SuggestionEvent::new(SuggestionTrigger::TaskCompleted {
                            item_name: task.title.clone(),
                        }));
                }
                Some(task)
            }
            Err(err) => {
                self.set_error(Some(error_message(&err, "Failed to toggle task.")));
                None
            }
        }
    }

    pub async fn delete(&self, task_id: &str) -> bool {
        match self.backend.delete_task(task_id).await {
            Ok(()) => {
                self.tasks
                    .write()
                    .expect("task cache poisoned")
                    .retain(|t| t.id != task_id);
                true
            }
            Err(err) => {
                self.set_error(Some(error_message(&err, "Failed to delete task.")));
                false
            }
        }
    }

    fn replace(&self, task: Task) {
        let mut tasks = self.tasks.write().expect("task cache poisoned");
        if let Some(existing) = tasks.iter_mut().find(|t| t.id == task.id) {
            *existing = task;
        } else {
            tasks.push(task);
        }
        sort_by_created_desc(&mut tasks);
    }

    fn set_error(&self, value: Option<String>) {
        *self.error.write().expect("error slot poisoned") = value;
    }

    fn set_loading(&self, value: bool) {
        *self.is_loading.write().expect("loading flag poisoned") = value;
    }
}

fn sort_by_created_desc(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
