//! Request body pre-check for create and update.
//!
//! `ValidTodoInput` is an extractor: it parses the JSON body and applies the
//! field rules before the handler body runs, so a rejected request never
//! touches the service. Fields are only checked when present; whether a
//! missing title is acceptable is decided by the handler (required on
//! create, optional on update). An explicit `null` counts as present and is
//! rejected, unlike a field that is left out.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::{Deserialize, Deserializer, Serialize};
use todo_core::validation::{validate_description, validate_title};
use todo_core::{TodoPatch, ValidationError};

use crate::error::AppError;

/// Request payload for `POST /todos` and `PUT /todos/{id}`.
///
/// The outer `Option` records whether the key was sent at all, the inner
/// one whether its value was `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoInput {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl TodoInput {
    pub fn validate(&self) -> Result<(), AppError> {
        match &self.title {
            Some(Some(title)) => validate_title(title)?,
            Some(None) => return Err(ValidationError::TitleRequired.into()),
            None => {}
        }
        match &self.description {
            Some(Some(description)) => validate_description(description)?,
            Some(None) => {
                return Err(AppError::InvalidBody(
                    "description must be a string, not null".to_string(),
                ))
            }
            None => {}
        }
        Ok(())
    }
}

impl From<TodoInput> for TodoPatch {
    fn from(input: TodoInput) -> Self {
        TodoPatch {
            title: input.title.flatten(),
            description: input.description.flatten(),
        }
    }
}

/// A [`TodoInput`] that has passed [`TodoInput::validate`].
#[derive(Debug, Clone)]
pub struct ValidTodoInput(pub TodoInput);

impl<S> FromRequest<S> for ValidTodoInput
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(input) = Json::<TodoInput>::from_request(req, state).await?;
        input.validate()?;
        Ok(Self(input))
    }
}
