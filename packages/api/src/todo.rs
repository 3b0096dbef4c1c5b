//! Todo records and the representations built around them.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::operation::{HasOperations, Operations};

/// Key of the todo collection in the [`ResourceMap`] served at `/`.
pub const TODOS_RESOURCE: &str = "todos";

/// Response body of `GET /`: resource name → absolute base URL.
pub type ResourceMap = BTreeMap<String, String>;

/// Response body of `GET /todos`.
pub type TodoList = BTreeMap<TodoId, Todo>;

// ---------------------------------------------------------------------------
// TodoId
// ---------------------------------------------------------------------------

/// Identifier of a todo, written `todo<N>` with `N` a positive integer.
///
/// Ids order by their numeric suffix, so `todo10` sorts after `todo9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TodoId(NonZeroU64);

impl TodoId {
    const PREFIX: &'static str = "todo";

    /// The id handed out when the store is empty.
    pub const FIRST: TodoId = TodoId(NonZeroU64::MIN);

    /// Returns `None` for `0`.
    pub fn new(n: u64) -> Option<Self> {
        NonZeroU64::new(n).map(Self)
    }

    /// The numeric suffix.
    pub fn number(self) -> u64 {
        self.0.get()
    }

    /// The id following this one, or `None` once the id space is exhausted.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

/// A string that is not of the form `todo<N>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid todo id {0:?}; expected todo<N> with N a positive integer")]
pub struct InvalidTodoId(pub String);

impl FromStr for TodoId {
    type Err = InvalidTodoId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTodoId(s.to_string());
        let digits = s.strip_prefix(Self::PREFIX).ok_or_else(invalid)?;
        // `u64::from_str` tolerates a leading `+`; the id format does not.
        // Leading zeros are rejected so every id has exactly one spelling.
        if digits.is_empty()
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        digits
            .parse::<u64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(invalid)
    }
}

impl Serialize for TodoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Todo
// ---------------------------------------------------------------------------

/// A stored todo record.
///
/// `status` is a free-form label (`complete`, `working`, `backlog` are the
/// customary ones). It is absent on freshly created todos and after the task
/// has been replaced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub task: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Todo {
    /// A todo with no status.
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            status: None,
        }
    }

    pub fn with_status(task: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            status: Some(status.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Representations
// ---------------------------------------------------------------------------

/// A single todo together with the operations currently available on it.
///
/// ```json
/// {
///   "todo_id": "todo3",
///   "task": "profit!",
///   "status": "backlog",
///   "operations": { "change-task": { "url": "...", "method": "PUT", ... } }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TodoView {
    pub todo_id: TodoId,

    #[serde(flatten)]
    pub todo: Todo,

    pub operations: Operations,
}

/// Response body of `GET /todos/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusView {
    pub todo_id: TodoId,

    /// `null` when the todo has no status.
    pub status: Option<String>,

    pub operations: Operations,
}

impl HasOperations for TodoView {
    fn operations(&self) -> &Operations {
        &self.operations
    }
}

impl HasOperations for StatusView {
    fn operations(&self) -> &Operations {
        &self.operations
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of `POST /todos` and `PUT /todos/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskRequest {
    pub task: String,
}

/// Body of `PUT /todos/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusRequest {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_ids() {
        let id: TodoId = "todo42".parse().unwrap();
        assert_eq!(id.number(), 42);
        assert_eq!(id.to_string(), "todo42");
    }

    #[test]
    fn rejects_malformed_ids() {
        for bad in ["todo", "todo0", "todo+1", "todo-1", "task1", "TODO1", "todo1x", "todo01", ""] {
            assert!(bad.parse::<TodoId>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn ids_order_numerically() {
        let nine: TodoId = "todo9".parse().unwrap();
        let ten: TodoId = "todo10".parse().unwrap();
        assert!(ten > nine);
        assert_eq!(nine.next(), Some(ten));
    }

    #[test]
    fn todo_list_uses_ids_as_keys() {
        let mut list = TodoList::new();
        list.insert(TodoId::FIRST, Todo::with_status("build an API", "complete"));
        list.insert(TodoId::new(2).unwrap(), Todo::new("?????"));

        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["todo1"]["status"], "complete");
        assert!(json["todo2"].get("status").is_none());

        let back: TodoList = serde_json::from_value(json).unwrap();
        assert_eq!(back, list);
    }

    #[test]
    fn todo_view_flattens_the_record() {
        let view = TodoView {
            todo_id: TodoId::new(3).unwrap(),
            todo: Todo::with_status("profit!", "backlog"),
            operations: Operations::new(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["todo_id"], "todo3");
        assert_eq!(json["task"], "profit!");
        assert_eq!(json["status"], "backlog");
        assert!(json["operations"].as_object().unwrap().is_empty());
    }
}
