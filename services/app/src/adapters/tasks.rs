//! services/app/src/adapters/tasks.rs
//!
//! Concrete implementation of the `TaskBackend` port over the REST contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use daykeep_core::domain::{Task, TaskCategory, TaskInput, TaskPatch};
use daykeep_core::ports::{BackendResult, TaskBackend};
use serde::{Deserialize, Serialize};

use super::client::{parse_day, ApiClient};

/// An adapter that implements the `TaskBackend` port over HTTP.
#[derive(Clone)]
pub struct TaskApi {
    api: ApiClient,
}

impl TaskApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

//=========================================================================================
// "Impure" Wire Record Structs
//=========================================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    deadline: Option<String>,
    #[serde(default)]
    category: Option<String>,
    is_completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskRecord {
    fn to_domain(self) -> BackendResult<Task> {
        let deadline = match self.deadline.as_deref().filter(|d| !d.is_empty()) {
            Some(d) => Some(parse_day(d)?),
            None => None,
        };
        // Unknown or empty categories leave the task uncategorized.
        let category = self.category.as_deref().and_then(TaskCategory::from_string);
        Ok(Task {
            id: self.id,
            title: self.title,
            description: self.description,
            deadline,
            category,
            is_completed: self.is_completed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Deserialize)]
struct TasksResponse {
    tasks: Vec<TaskRecord>,
}

#[derive(Deserialize)]
struct SingleTaskResponse {
    task: TaskRecord,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskInputBody<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'static str>,
}

impl<'a> TaskInputBody<'a> {
    fn from_domain(input: &'a TaskInput) -> Self {
        Self {
            title: &input.title,
            description: input.description.as_deref(),
            deadline: input.deadline.map(|d| d.format("%Y-%m-%d").to_string()),
            category: input.category.map(|c| c.as_str()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskPatchBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_completed: Option<bool>,
}

impl<'a> TaskPatchBody<'a> {
    fn from_domain(patch: &'a TaskPatch) -> Self {
        Self {
            title: patch.title.as_deref(),
            description: patch.description.as_deref(),
            deadline: patch.deadline.map(|d| d.format("%Y-%m-%d").to_string()),
            category: patch.category.map(|c| c.as_str()),
            is_completed: patch.is_completed,
        }
    }
}

//=========================================================================================
// `TaskBackend` Trait Implementation
//=========================================================================================

#[async_trait]
impl TaskBackend for TaskApi {
    async fn list_tasks(&self) -> BackendResult<Vec<Task>> {
        let response: TasksResponse = self.api.get("/tasks").await?;
        response.tasks.into_iter().map(|r| r.to_domain()).collect()
    }

    async fn create_task(&self, input: &TaskInput) -> BackendResult<Task> {
        let response: SingleTaskResponse = self
            .api
            .post("/tasks", &TaskInputBody::from_domain(input))
            .await?;
        response.task.to_domain()
    }

    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> BackendResult<Task> {
        let response: SingleTaskResponse = self
            .api
            .put(&format!("/tasks/{task_id}"), &TaskPatchBody::from_domain(patch))
            .await?;
        response.task.to_domain()
    }

    async fn delete_task(&self, task_id: &str) -> BackendResult<()> {
        self.api.delete(&format!("/tasks/{task_id}")).await
    }
}
