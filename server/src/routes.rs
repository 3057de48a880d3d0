//! Route table and handlers for `/todos`.
//!
//! Handlers only translate between HTTP and `TodoService`: they take the
//! lock, call one service method and map `None`/`false` to 404. Every
//! mutation holds the write lock for its whole duration.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::routing::{get, patch};
use axum::{Json, Router};
use tokio::sync::RwLock;
use todo_core::{TodoService, TodoSnapshot, TodoStats, ValidationError};

use crate::error::AppError;
use crate::health::health_handler;
use crate::validation::ValidTodoInput;

pub type SharedTodos = Arc<RwLock<TodoService>>;

/// `/todos/stats` is a static segment, so it is matched ahead of
/// `/todos/{id}` regardless of registration order.
pub fn router(todos: SharedTodos) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/stats", get(todo_stats))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/todos/{id}/complete", patch(complete_todo))
        .fallback(route_not_found)
        .with_state(todos)
}

async fn create_todo(
    State(todos): State<SharedTodos>,
    ValidTodoInput(input): ValidTodoInput,
) -> Result<(StatusCode, Json<TodoSnapshot>), AppError> {
    let title = input.title.flatten().ok_or(ValidationError::TitleRequired)?;
    let description = input.description.flatten().unwrap_or_default();

    let mut service = todos.write().await;
    let todo = service.create_todo(title, description)?;
    Ok((StatusCode::CREATED, Json(todo.snapshot())))
}

async fn list_todos(State(todos): State<SharedTodos>) -> Json<Vec<TodoSnapshot>> {
    let service = todos.read().await;
    Json(service.all_todos().map(|todo| todo.snapshot()).collect())
}

async fn todo_stats(State(todos): State<SharedTodos>) -> Json<TodoStats> {
    let stats = todos.read().await.stats();
    Json(stats)
}

async fn get_todo(
    State(todos): State<SharedTodos>,
    Path(id): Path<String>,
) -> Result<Json<TodoSnapshot>, AppError> {
    let service = todos.read().await;
    service
        .todo_by_id(&id)
        .map(|todo| Json(todo.snapshot()))
        .ok_or_else(|| AppError::not_found(id))
}

async fn update_todo(
    State(todos): State<SharedTodos>,
    Path(id): Path<String>,
    ValidTodoInput(input): ValidTodoInput,
) -> Result<Json<TodoSnapshot>, AppError> {
    let mut service = todos.write().await;
    service
        .update_todo(&id, input.into())?
        .map(|todo| Json(todo.snapshot()))
        .ok_or_else(|| AppError::not_found(id))
}

async fn delete_todo(
    State(todos): State<SharedTodos>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if todos.write().await.delete_todo(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(id))
    }
}

async fn complete_todo(
    State(todos): State<SharedTodos>,
    Path(id): Path<String>,
) -> Result<Json<TodoSnapshot>, AppError> {
    let mut service = todos.write().await;
    service
        .complete_todo(&id)
        .map(|todo| Json(todo.snapshot()))
        .ok_or_else(|| AppError::not_found(id))
}

async fn route_not_found(method: Method, uri: Uri) -> AppError {
    AppError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}
