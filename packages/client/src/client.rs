//! Discovery and navigation.
//!
//! A [`TodoClient`] is built from a [`ClientConfig`] by fetching the resource
//! map at the server root. All further URLs come from that map or from the
//! `operations` of a fetched representation.

use hypertodo_api::{
    ResourceMap, StatusView, TaskRequest, TodoId, TodoList, TodoView, TODOS_RESOURCE,
};
use reqwest::blocking::Response;
use serde::de::DeserializeOwned;

use crate::{
    config::ClientConfig,
    error::ClientError,
    executor::{OpExecutor, Values},
};

/// A connected client: the discovered todo collection URL plus an executor.
#[derive(Debug, Clone)]
pub struct TodoClient {
    resources: ResourceMap,
    todos_url: String,
    executor: OpExecutor,
}

impl TodoClient {
    /// Fetch the resource map from `config.root_url` and build a client.
    pub fn discover(config: &ClientConfig) -> Result<Self, ClientError> {
        let executor = OpExecutor::new(config)?;
        let resources: ResourceMap =
            decode(executor.http().get(config.resources_url()).send()?)?;
        let todos_url = resources
            .get(TODOS_RESOURCE)
            .ok_or_else(|| ClientError::MissingResource(TODOS_RESOURCE.to_string()))?
            .clone();
        Ok(Self {
            todos_url: todos_url.trim_end_matches('/').to_string(),
            resources,
            executor,
        })
    }

    /// The resource map fetched at discovery.
    pub fn resources(&self) -> &ResourceMap {
        &self.resources
    }

    pub fn todos_url(&self) -> &str {
        &self.todos_url
    }

    pub fn executor(&self) -> &OpExecutor {
        &self.executor
    }

    /// `GET {todos}`
    pub fn list(&self) -> Result<TodoList, ClientError> {
        decode(self.executor.http().get(&self.todos_url).send()?)
    }

    /// `GET {todos}/{id}`
    pub fn get_todo(&self, id: TodoId) -> Result<TodoView, ClientError> {
        decode(self.executor.http().get(self.todo_url(id)).send()?)
    }

    /// `GET {todos}/{id}/status`
    pub fn get_status(&self, id: TodoId) -> Result<StatusView, ClientError> {
        let url = format!("{}/status", self.todo_url(id));
        decode(self.executor.http().get(url).send()?)
    }

    /// `POST {todos}` with `{task}`.
    pub fn create(&self, task: &str) -> Result<TodoView, ClientError> {
        let body = TaskRequest {
            task: task.to_string(),
        };
        decode(self.executor.http().post(&self.todos_url).json(&body).send()?)
    }

    /// Perform a named operation from `view`; see [`OpExecutor::perform`].
    pub fn perform(
        &self,
        view: &impl hypertodo_api::HasOperations,
        name: &str,
        values: &Values,
    ) -> Result<Response, ClientError> {
        self.executor.perform(view, name, values)
    }

    fn todo_url(&self, id: TodoId) -> String {
        format!("{}/{}", self.todos_url, id)
    }
}

/// Decode a success body, or turn a failure status into [`ClientError::Status`].
fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(resp.json()?)
}
