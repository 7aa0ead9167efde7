//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Wire fields are camelCase. The client-only flags (`is_editing`,
//! `is_pending`) live on `TodoItem`, never on the wire types, so they cannot
//! leak into a request body and are reset on every fetch.

use serde::{Deserialize, Serialize};

/// Id carried by the placeholder item shown while a create is in flight.
pub const PLACEHOLDER_ID: i64 = 0;

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub completed: bool,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for a partial update. Only the fields present in the JSON
/// are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            title: None,
            completed: Some(completed),
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            completed: None,
        }
    }
}

/// A todo as held by the list state: the persisted fields plus transient
/// UI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub completed: bool,
    /// Title is being edited inline.
    pub is_editing: bool,
    /// A remote call for this item is in flight.
    pub is_pending: bool,
}

impl TodoItem {
    pub fn placeholder(user_id: i64, title: String) -> Self {
        Self {
            id: PLACEHOLDER_ID,
            user_id,
            title,
            completed: false,
            is_editing: false,
            is_pending: true,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id == PLACEHOLDER_ID
    }
}

impl From<Todo> for TodoItem {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            user_id: todo.user_id,
            title: todo.title,
            completed: todo.completed,
            is_editing: false,
            is_pending: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_uses_camel_case_on_the_wire() {
        let todo = Todo {
            id: 7,
            user_id: 1091,
            title: "Test".to_string(),
            completed: false,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["userId"], 1091);
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn new_todo_defaults_completed_to_false() {
        let input: NewTodo = serde_json::from_str(r#"{"userId":1,"title":"x"}"#).unwrap();
        assert!(!input.completed);
    }

    #[test]
    fn patch_omits_absent_fields() {
        let json = serde_json::to_value(TodoPatch::completed(true)).unwrap();
        assert_eq!(json, serde_json::json!({ "completed": true }));
    }

    #[test]
    fn item_from_todo_resets_transient_flags() {
        let item = TodoItem::from(Todo {
            id: 3,
            user_id: 1,
            title: "A".to_string(),
            completed: true,
        });
        assert!(!item.is_editing);
        assert!(!item.is_pending);
        assert!(item.completed);
    }
}
