//! In-memory storage implementation.
//!
//! All data is held in RAM behind a single [`RwLock`] and is lost when the
//! process exits. Todos live in a [`BTreeMap`] keyed by [`TodoId`]; because
//! ids order numerically, the highest id is simply the last key.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use hypertodo_api::{Todo, TodoId, TodoList};

use super::{StorageError, TodoStore};

/// Thread-safe, in-memory implementation of [`TodoStore`].
pub struct MemoryStore {
    todos: RwLock<BTreeMap<TodoId, Todo>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            todos: RwLock::new(BTreeMap::new()),
        }
    }

    /// A store pre-populated with the demo data set:
    ///
    /// | id | task | status |
    /// |----|------|--------|
    /// | `todo1` | build an API | complete |
    /// | `todo2` | ????? | working |
    /// | `todo3` | profit! | backlog |
    pub fn seeded() -> Self {
        let seed = [
            ("build an API", "complete"),
            ("?????", "working"),
            ("profit!", "backlog"),
        ];
        let todos = (1u64..)
            .zip(seed)
            .filter_map(|(n, (task, status))| {
                TodoId::new(n).map(|id| (id, Todo::with_status(task, status)))
            })
            .collect();
        Self {
            todos: RwLock::new(todos),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<TodoId, Todo>>, StorageError> {
        self.todos
            .read()
            .map_err(|_| StorageError::Internal("todo store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<TodoId, Todo>>, StorageError> {
        self.todos
            .write()
            .map_err(|_| StorageError::Internal("todo store lock poisoned".into()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn get(&self, id: TodoId) -> Result<Todo, StorageError> {
        self.read()?
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound(id))
    }

    async fn list(&self) -> Result<TodoList, StorageError> {
        Ok(self.read()?.clone())
    }

    async fn create(&self, task: &str) -> Result<(TodoId, Todo), StorageError> {
        // Allocate the id under the same guard as the insert.
        let mut todos = self.write()?;
        let id = match todos.keys().next_back() {
            Some(max) => max
                .next()
                .ok_or_else(|| StorageError::Internal("todo id space exhausted".into()))?,
            None => TodoId::FIRST,
        };
        let todo = Todo::new(task);
        todos.insert(id, todo.clone());
        Ok((id, todo))
    }

    async fn update_status(&self, id: TodoId, status: &str) -> Result<Todo, StorageError> {
        let mut todos = self.write()?;
        let todo = todos.get_mut(&id).ok_or(StorageError::NotFound(id))?;
        todo.status = Some(status.to_string());
        Ok(todo.clone())
    }

    async fn update_task(&self, id: TodoId, task: &str) -> Result<Todo, StorageError> {
        let mut todos = self.write()?;
        let todo = todos.get_mut(&id).ok_or(StorageError::NotFound(id))?;
        *todo = Todo::new(task);
        Ok(todo.clone())
    }

    async fn delete(&self, id: TodoId) -> Result<(), StorageError> {
        self.write()?
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound(id))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
