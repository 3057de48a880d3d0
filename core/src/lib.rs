//! Domain core for the todo service.
//!
//! # Overview
//! Owns the todo entity, the field rules it enforces and the in-memory
//! service that stores todos in creation order. Nothing here performs I/O;
//! the HTTP surface lives in the `todo-server` crate.
//!
//! # Design
//! - `Todo` validates its own fields on construction and on every update,
//!   and never leaves a half-applied change behind.
//! - `TodoService` is a plain owned value with `&mut self` mutators. Sharing
//!   it across threads (and the locking that implies) is the caller's job.
//! - Absence is `None`/`false`; only `ValidationError` is ever returned as
//!   an error.

pub mod error;
pub mod service;
pub mod timestamp;
pub mod todo;
pub mod validation;

pub use error::ValidationError;
pub use service::{TodoService, TodoStats};
pub use todo::{Todo, TodoPatch, TodoSnapshot};
