//! Storage abstraction for todos.
//!
//! The [`TodoStore`] trait is the contract between the HTTP handlers and the
//! data. Hypermedia and HTTP concerns live in the handlers; storage only
//! owns the records and id allocation.
//!
//! # Implementations
//!
//! | Type | When to use |
//! |------|-------------|
//! | [`MemoryStore`] | The only backend; data is lost on restart |
//!
//! [`MemoryStore`]: memory::MemoryStore

pub mod memory;

use async_trait::async_trait;
use hypertodo_api::{Todo, TodoId, TodoList};

// ---------------------------------------------------------------------------
// StorageError
// ---------------------------------------------------------------------------

/// Errors that storage operations can return.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No todo with this id exists.
    #[error("Todo {0} doesn't exist")]
    NotFound(TodoId),

    /// An unexpected error in the storage backend (poisoned lock, exhausted
    /// id space).
    #[error("internal storage error: {0}")]
    Internal(String),
}

// ---------------------------------------------------------------------------
// TodoStore trait
// ---------------------------------------------------------------------------

/// The persistence contract for todos.
///
/// Implementations must serialise mutations: two concurrent `create` calls
/// never receive the same id, and no update is lost.
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// Retrieve a todo. Returns [`StorageError::NotFound`] if absent.
    async fn get(&self, id: TodoId) -> Result<Todo, StorageError>;

    /// Return every todo keyed by id.
    async fn list(&self) -> Result<TodoList, StorageError>;

    /// Store a new todo with no status under the next free id.
    ///
    /// The new id is one past the highest existing id; on an empty store it
    /// is `todo1`.
    async fn create(&self, task: &str) -> Result<(TodoId, Todo), StorageError>;

    /// Set the status of an existing todo and return the updated record.
    async fn update_status(&self, id: TodoId, status: &str) -> Result<Todo, StorageError>;

    /// Replace an existing todo with a record holding only `task`.
    ///
    /// This is a full replace, not a merge: the previous status is dropped.
    async fn update_task(&self, id: TodoId, task: &str) -> Result<Todo, StorageError>;

    /// Remove a todo. Returns [`StorageError::NotFound`] if absent.
    async fn delete(&self, id: TodoId) -> Result<(), StorageError>;
}
