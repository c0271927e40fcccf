//! In-memory `/tasks` API consumed by the task board frontend.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

pub const DEFAULT_STATUS: &str = "To do";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub due_date: Option<String>,
}

/// Request body for create and update. Unknown fields such as `id` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl TaskInput {
    fn into_task(self, id: u64) -> Result<Task, TaskError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(TaskError::BlankTitle);
        }

        Ok(Task {
            id,
            title,
            description: self.description,
            status: self
                .status
                .filter(|status| !status.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            // The board posts "" when no date is picked.
            due_date: self.due_date.filter(|date| !date.trim().is_empty()),
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("task {0} not found")]
    NotFound(u64),
    #[error("task title must not be blank")]
    BlankTitle,
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let status = match self {
            TaskError::NotFound(_) => StatusCode::NOT_FOUND,
            TaskError::BlankTitle => StatusCode::BAD_REQUEST,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[derive(Debug, Default)]
struct TaskState {
    next_id: u64,
    tasks: BTreeMap<u64, Task>,
}

#[derive(Debug, Default)]
pub struct TaskStore {
    state: RwLock<TaskState>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> Vec<Task> {
        self.state.read().await.tasks.values().cloned().collect()
    }

    pub async fn create(&self, input: TaskInput) -> Result<Task, TaskError> {
        let mut state = self.state.write().await;
        let task = input.into_task(state.next_id + 1)?;
        state.next_id = task.id;
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    pub async fn update(&self, id: u64, input: TaskInput) -> Result<Task, TaskError> {
        let mut state = self.state.write().await;
        let slot = state.tasks.get_mut(&id).ok_or(TaskError::NotFound(id))?;
        *slot = input.into_task(id)?;
        Ok(slot.clone())
    }

    pub async fn delete(&self, id: u64) -> Result<(), TaskError> {
        let mut state = self.state.write().await;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskError::NotFound(id))
    }
}

pub fn router(store: Arc<TaskStore>) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", axum::routing::put(update_task).delete(delete_task))
        .with_state(store)
}

async fn list_tasks(State(store): State<Arc<TaskStore>>) -> Json<Vec<Task>> {
    Json(store.list().await)
}

async fn create_task(
    State(store): State<Arc<TaskStore>>,
    Json(input): Json<TaskInput>,
) -> Result<(StatusCode, Json<Task>), TaskError> {
    let task = store.create(input).await?;
    tracing::info!(id = task.id, title = %task.title, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(store): State<Arc<TaskStore>>,
    Path(id): Path<u64>,
    Json(input): Json<TaskInput>,
) -> Result<Json<Task>, TaskError> {
    let task = store.update(id, input).await?;
    tracing::info!(id, status = %task.status, "task updated");
    Ok(Json(task))
}

async fn delete_task(
    State(store): State<Arc<TaskStore>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, TaskError> {
    store.delete(id).await?;
    tracing::info!(id, "task deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;
