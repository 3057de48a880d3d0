//! In-memory todo repository.
//!
//! # Design
//! Entries live in a `BTreeMap` keyed by a creation sequence number, which
//! gives creation-order iteration for free. A `HashMap` from id to sequence
//! number keeps lookups by id constant time. Both maps are private to
//! `TodoService`; callers only ever see `&Todo` or snapshots.
//!
//! Absence is reported with `None`/`false`, never as an error. Only field
//! validation fails, and it fails before anything is stored or assigned.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::todo::{Todo, TodoPatch};

/// Aggregate counts over the current collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

/// Sole owner of the todo collection.
#[derive(Debug, Default)]
pub struct TodoService {
    entries: BTreeMap<u64, Todo>,
    index: HashMap<Uuid, u64>,
    next_seq: u64,
}

impl TodoService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn create_todo(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<&Todo, ValidationError> {
        let todo = Todo::new(title, description)?;
        let id = todo.id();
        let seq = self.next_seq;
        self.next_seq += 1;

        tracing::debug!(%id, "todo created");
        self.index.insert(id, seq);
        Ok(&*self.entries.entry(seq).or_insert(todo))
    }

    /// All todos in creation order.
    pub fn all_todos(&self) -> impl Iterator<Item = &Todo> + '_ {
        self.entries.values()
    }

    /// Look up a todo. Empty, malformed and unknown ids all yield `None`, as
    /// do other spellings of a stored id (uppercase, simple, braced, urn).
    pub fn todo_by_id(&self, id: &str) -> Option<&Todo> {
        let seq = self.seq_of(id)?;
        self.entries.get(&seq)
    }

    pub fn update_todo(
        &mut self,
        id: &str,
        patch: TodoPatch,
    ) -> Result<Option<&Todo>, ValidationError> {
        let Some(todo) = self.todo_mut(id) else {
            return Ok(None);
        };
        let empty_patch = patch.is_empty();
        todo.update(patch)?;
        tracing::debug!(id = %todo.id(), empty_patch, "todo updated");
        Ok(Some(&*todo))
    }

    /// Remove a todo, returning whether it existed.
    pub fn delete_todo(&mut self, id: &str) -> bool {
        let Some(uuid) = parse_id(id) else {
            return false;
        };
        match self.index.remove(&uuid) {
            Some(seq) => {
                self.entries.remove(&seq);
                tracing::debug!(id = %uuid, "todo deleted");
                true
            }
            None => false,
        }
    }

    pub fn complete_todo(&mut self, id: &str) -> Option<&Todo> {
        let todo = self.todo_mut(id)?;
        todo.complete();
        tracing::debug!(id = %todo.id(), "todo completed");
        Some(&*todo)
    }

    pub fn stats(&self) -> TodoStats {
        let total = self.entries.len();
        let completed = self.all_todos().filter(|todo| todo.is_completed()).count();
        TodoStats {
            total,
            completed,
            pending: total - completed,
        }
    }

    fn todo_mut(&mut self, id: &str) -> Option<&mut Todo> {
        let seq = self.seq_of(id)?;
        self.entries.get_mut(&seq)
    }

    fn seq_of(&self, id: &str) -> Option<u64> {
        let uuid = parse_id(id)?;
        self.index.get(&uuid).copied()
    }
}

// Ids are opaque strings to callers: only the exact lowercase hyphenated
// form handed out on creation refers to a todo.
fn parse_id(id: &str) -> Option<Uuid> {
    if id.is_empty() {
        return None;
    }
    let uuid = Uuid::parse_str(id).ok()?;
    (uuid.hyphenated().to_string() == id).then_some(uuid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_of(todo: &Todo) -> String {
        todo.id().to_string()
    }

    #[test]
    fn new_service_is_empty() {
        let service = TodoService::new();
        assert!(service.is_empty());
        assert_eq!(service.stats(), TodoStats::default());
    }

    #[test]
    fn create_stores_todo() {
        let mut service = TodoService::new();
        let id = id_of(service.create_todo("Buy groceries", "Milk, eggs, bread").unwrap());

        let todo = service.todo_by_id(&id).unwrap();
        assert_eq!(todo.title(), "Buy groceries");
        assert_eq!(todo.description(), "Milk, eggs, bread");
        assert!(!todo.is_completed());
        assert_eq!(service.len(), 1);
    }

    #[test]
    fn create_with_invalid_title_stores_nothing() {
        let mut service = TodoService::new();
        assert_eq!(
            service.create_todo("", "").unwrap_err(),
            ValidationError::TitleRequired
        );
        assert!(service.is_empty());
    }

    #[test]
    fn all_todos_preserves_creation_order() {
        let mut service = TodoService::new();
        for title in ["Task 1", "Task 2", "Task 3"] {
            service.create_todo(title, "").unwrap();
        }
        let titles: Vec<&str> = service.all_todos().map(Todo::title).collect();
        assert_eq!(titles, ["Task 1", "Task 2", "Task 3"]);
    }

    #[test]
    fn order_survives_deleting_from_the_middle() {
        let mut service = TodoService::new();
        service.create_todo("first", "").unwrap();
        let middle = id_of(service.create_todo("middle", "").unwrap());
        service.create_todo("last", "").unwrap();

        assert!(service.delete_todo(&middle));
        service.create_todo("newest", "").unwrap();

        let titles: Vec<&str> = service.all_todos().map(Todo::title).collect();
        assert_eq!(titles, ["first", "last", "newest"]);
    }

    #[test]
    fn lookup_of_missing_or_malformed_id_is_none() {
        let mut service = TodoService::new();
        service.create_todo("Task", "").unwrap();
        assert!(service.todo_by_id("").is_none());
        assert!(service.todo_by_id("nonexistent-id").is_none());
        assert!(service
            .todo_by_id("00000000-0000-0000-0000-000000000000")
            .is_none());
    }

    #[test]
    fn other_spellings_of_a_stored_id_are_unknown() {
        let mut service = TodoService::new();
        let uuid = service.create_todo("Task", "").unwrap().id();
        let spellings = [
            uuid.hyphenated().to_string().to_uppercase(),
            uuid.simple().to_string(),
            uuid.braced().to_string(),
            uuid.urn().to_string(),
        ];

        for spelling in &spellings {
            assert!(service.todo_by_id(spelling).is_none(), "{spelling}");
            assert!(service.complete_todo(spelling).is_none(), "{spelling}");
            assert!(!service.delete_todo(spelling), "{spelling}");
        }
        assert!(service.todo_by_id(&uuid.to_string()).is_some());
        assert!(!service.todo_by_id(&uuid.to_string()).unwrap().is_completed());
        assert_eq!(service.len(), 1);
    }

    #[test]
    fn update_unknown_id_is_none() {
        let mut service = TodoService::new();
        let result = service.update_todo("nonexistent-id", TodoPatch::default());
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn update_changes_fields() {
        let mut service = TodoService::new();
        let id = id_of(service.create_todo("Original", "Description").unwrap());

        let todo = service
            .update_todo(
                &id,
                TodoPatch {
                    title: None,
                    description: Some("New description".to_string()),
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(todo.title(), "Original");
        assert_eq!(todo.description(), "New description");
    }

    #[test]
    fn invalid_update_keeps_stored_todo() {
        let mut service = TodoService::new();
        let id = id_of(service.create_todo("Original", "").unwrap());
        let before = service.todo_by_id(&id).unwrap().clone();

        let err = service
            .update_todo(
                &id,
                TodoPatch {
                    title: Some("   ".to_string()),
                    description: None,
                },
            )
            .unwrap_err();

        assert_eq!(err, ValidationError::TitleRequired);
        assert_eq!(service.todo_by_id(&id), Some(&before));
    }

    #[test]
    fn delete_reports_whether_removed() {
        let mut service = TodoService::new();
        let keep = id_of(service.create_todo("keep", "").unwrap());
        let drop = id_of(service.create_todo("drop", "").unwrap());

        assert!(service.delete_todo(&drop));
        assert!(!service.delete_todo(&drop));
        assert!(!service.delete_todo("nonexistent-id"));
        assert!(service.todo_by_id(&keep).is_some());
        assert_eq!(service.len(), 1);
    }

    #[test]
    fn complete_twice_stays_completed() {
        let mut service = TodoService::new();
        let id = id_of(service.create_todo("Task", "").unwrap());

        assert!(service.complete_todo(&id).unwrap().is_completed());
        assert!(service.complete_todo(&id).unwrap().is_completed());
        assert!(service.complete_todo("nonexistent-id").is_none());
    }

    #[test]
    fn complete_refreshes_updated_at() {
        let mut service = TodoService::new();
        let id = id_of(service.create_todo("Task", "").unwrap());
        let created = service.todo_by_id(&id).unwrap().created_at();

        std::thread::sleep(std::time::Duration::from_millis(5));
        let todo = service.complete_todo(&id).unwrap();
        assert!(todo.updated_at() > created);
        assert_eq!(todo.created_at(), created);
    }

    #[test]
    fn stats_count_completed_and_pending() {
        let mut service = TodoService::new();
        let ids: Vec<String> = (0..4)
            .map(|i| id_of(service.create_todo(format!("Task {i}"), "").unwrap()))
            .collect();
        service.complete_todo(&ids[0]);
        service.complete_todo(&ids[2]);

        assert_eq!(
            service.stats(),
            TodoStats {
                total: 4,
                completed: 2,
                pending: 2,
            }
        );
    }
}
