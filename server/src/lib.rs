//! HTTP surface of the todo service.
//!
//! # Design
//! - One `TodoService` per application, shared by all handlers through
//!   `Arc<RwLock<_>>` (see [`routes::SharedTodos`]).
//! - Request bodies are checked by the [`validation::ValidTodoInput`]
//!   extractor before a handler runs.
//! - `TraceLayer` wraps every request in a span; `CatchPanicLayer` is the
//!   terminal error handler and turns panics into a JSON 500.

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod config;
pub mod error;
pub mod health;
pub mod observability;
pub mod routes;
pub mod validation;

pub use error::{AppError, ErrorBody};
pub use routes::SharedTodos;
pub use validation::TodoInput;

/// A fresh application with its own empty todo collection.
pub fn app() -> Router {
    app_with(SharedTodos::default())
}

/// The application over an existing collection.
pub fn app_with(todos: SharedTodos) -> Router {
    with_layers(routes::router(todos))
}

/// Wrap a router with request tracing and the panic handler.
pub fn with_layers(router: Router) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    router
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(trace_layer)
}

pub async fn run<F>(listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app())
        .with_graceful_shutdown(shutdown)
        .await
}
