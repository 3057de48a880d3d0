//! The todo entity and its JSON snapshot.
//!
//! # Design
//! `Todo` keeps its fields private so every mutation goes through a method
//! that enforces the field rules and refreshes `updated_at`. `TodoSnapshot`
//! is the plain value handed to callers and serialized on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::timestamp;
use crate::validation::{validate_description, validate_title};

/// A single todo item with identity and mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id: Uuid,
    title: String,
    description: String,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Partial update. Only fields that are `Some` are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

/// Value-object view of a [`Todo`] with no hidden state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoSnapshot {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub completed: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Build a new, incomplete todo with a fresh id.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let description = description.into();
        validate_title(&title)?;
        validate_description(&description)?;

        let now = timestamp::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            description,
            completed: false,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Mark as completed. Calling this again keeps the todo completed.
    pub fn complete(&mut self) {
        self.completed = true;
        self.touch();
    }

    /// Apply a partial update.
    ///
    /// All present fields are validated before any is assigned, so a
    /// rejected patch leaves the todo exactly as it was. A successful call
    /// refreshes `updated_at` even when the patch carries no fields.
    pub fn update(&mut self, patch: TodoPatch) -> Result<(), ValidationError> {
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }
        if let Some(description) = &patch.description {
            validate_description(description)?;
        }

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        self.touch();
        Ok(())
    }

    pub fn snapshot(&self) -> TodoSnapshot {
        TodoSnapshot {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            completed: self.completed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    // A wall clock stepping backwards must not break updated_at >= created_at.
    fn touch(&mut self) {
        self.updated_at = timestamp::now().max(self.created_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_todo_has_defaults() {
        let todo = Todo::new("Buy milk", "").unwrap();
        assert_eq!(todo.title(), "Buy milk");
        assert_eq!(todo.description(), "");
        assert!(!todo.is_completed());
        assert_eq!(todo.created_at(), todo.updated_at());
    }

    #[test]
    fn new_todo_keeps_title_untrimmed() {
        let todo = Todo::new("  spaced  ", "").unwrap();
        assert_eq!(todo.title(), "  spaced  ");
    }

    #[test]
    fn new_todos_get_distinct_ids() {
        let a = Todo::new("a", "").unwrap();
        let b = Todo::new("b", "").unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn new_rejects_invalid_fields() {
        assert_eq!(Todo::new("", ""), Err(ValidationError::TitleRequired));
        assert_eq!(Todo::new("   ", ""), Err(ValidationError::TitleRequired));
        assert_eq!(
            Todo::new("a".repeat(201), ""),
            Err(ValidationError::TitleLength)
        );
        assert_eq!(
            Todo::new("ok", "a".repeat(1001)),
            Err(ValidationError::DescriptionTooLong)
        );
    }

    #[test]
    fn complete_is_idempotent() {
        let mut todo = Todo::new("Walk dog", "").unwrap();
        todo.complete();
        assert!(todo.is_completed());
        todo.complete();
        assert!(todo.is_completed());
        assert!(todo.updated_at() >= todo.created_at());
    }

    #[test]
    fn complete_refreshes_updated_at() {
        let mut todo = Todo::new("Walk dog", "").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        todo.complete();
        assert!(todo.updated_at() > todo.created_at());

        let first = todo.updated_at();
        std::thread::sleep(std::time::Duration::from_millis(5));
        todo.complete();
        assert!(todo.updated_at() > first);
    }

    #[test]
    fn update_applies_only_present_fields() {
        let mut todo = Todo::new("Original", "Description").unwrap();
        todo.update(TodoPatch {
            title: Some("Updated".to_string()),
            description: None,
        })
        .unwrap();
        assert_eq!(todo.title(), "Updated");
        assert_eq!(todo.description(), "Description");
    }

    #[test]
    fn rejected_update_leaves_todo_untouched() {
        let mut todo = Todo::new("Original", "Description").unwrap();
        let before = todo.clone();

        let err = todo
            .update(TodoPatch {
                title: Some("Valid new title".to_string()),
                description: Some("a".repeat(1001)),
            })
            .unwrap_err();

        assert_eq!(err, ValidationError::DescriptionTooLong);
        assert_eq!(todo, before);
    }

    #[test]
    fn empty_patch_still_refreshes_updated_at() {
        let mut todo = Todo::new("Task", "").unwrap();
        let created = todo.updated_at();
        std::thread::sleep(std::time::Duration::from_millis(5));
        todo.update(TodoPatch::default()).unwrap();
        assert!(todo.updated_at() > created);
        assert_eq!(todo.created_at(), created);
    }

    #[test]
    fn snapshot_serializes_with_camel_case_keys() {
        let todo = Todo::new("Test", "Details").unwrap();
        let json = serde_json::to_value(todo.snapshot()).unwrap();
        assert_eq!(json["id"], todo.id().to_string());
        assert_eq!(json["title"], "Test");
        assert_eq!(json["description"], "Details");
        assert_eq!(json["completed"], false);
        assert_eq!(json["createdAt"], json["updatedAt"]);
        assert_eq!(json["createdAt"], timestamp::format(&todo.created_at()));
    }
}
