//! Request and response types for the hypertodo API.
//!
//! Both the server and the client depend on this crate, so the hypermedia
//! contract between them (the `operations` map and its placeholder syntax)
//! is expressed once, as Rust types.
//!
//! # Endpoints covered
//!
//! | Method | Path | Type |
//! |--------|------|------|
//! | GET | `/` | → [`ResourceMap`] |
//! | GET | `/todos` | → [`TodoList`] |
//! | POST | `/todos` | [`TaskRequest`] → [`TodoView`] |
//! | GET | `/todos/{id}` | → [`TodoView`] |
//! | PUT | `/todos/{id}` | [`TaskRequest`] → [`TodoView`] |
//! | DELETE | `/todos/{id}` | → `204` |
//! | GET | `/todos/{id}/status` | → [`StatusView`] |
//! | PUT | `/todos/{id}/status` | [`StatusRequest`] → [`TodoView`] |
//!
//! Errors on any endpoint use [`ErrorResponse`].

pub mod error;
pub mod operation;
pub mod placeholder;
pub mod todo;

pub use error::ErrorResponse;
pub use operation::{
    DescriptorError, HasOperations, Method, OperationDescriptor, Operations, Payload,
};
pub use placeholder::{ClientPlaceholder, FieldValue};
pub use todo::{
    InvalidTodoId, ResourceMap, StatusRequest, StatusView, TaskRequest, Todo, TodoId, TodoList,
    TodoView, TODOS_RESOURCE,
};
