//! Executes hypermedia operations.
//!
//! Given a representation that carries an `operations` map, an operation
//! name, and caller-supplied values, the executor:
//!
//! 1. looks the operation up ([`ClientError::UnknownOperation`] if absent);
//! 2. builds the body: `data-fixed` as-is, `data-template` with every
//!    `<type:name>` placeholder replaced by the caller's value for `name`
//!    ([`ClientError::MissingSubstitution`] if absent, before sending);
//! 3. sends exactly one request and hands back the raw response.
//!
//! Status codes are not inspected and nothing is retried.

use std::collections::BTreeMap;

use hypertodo_api::{FieldValue, HasOperations, Method, Operations, Payload};
use serde_json::{Map, Value};

use crate::{config::ClientConfig, error::ClientError};

/// Caller-supplied values for client placeholders, keyed by placeholder name.
pub type Values = BTreeMap<String, String>;

/// A request assembled from an operation descriptor, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    /// JSON body; `None` for operations without a payload.
    pub body: Option<Value>,
}

/// Assemble the request for `name` without sending it.
pub fn prepare(
    operations: &Operations,
    name: &str,
    values: &Values,
) -> Result<PreparedRequest, ClientError> {
    let op = operations
        .get(name)
        .ok_or_else(|| ClientError::UnknownOperation(name.to_string()))?;

    let body = match &op.payload {
        Payload::None => None,
        Payload::Fixed(fields) => Some(string_object(
            fields.iter().map(|(k, v)| (k.clone(), v.clone())),
        )),
        Payload::Template(fields) => {
            let mut filled = Vec::with_capacity(fields.len());
            for (key, value) in fields {
                let resolved = match value {
                    FieldValue::Literal(literal) => literal.clone(),
                    FieldValue::Client(placeholder) => values
                        .get(&placeholder.name)
                        .cloned()
                        .ok_or_else(|| ClientError::MissingSubstitution {
                            operation: name.to_string(),
                            field: placeholder.name.clone(),
                        })?,
                };
                filled.push((key.clone(), resolved));
            }
            Some(string_object(filled))
        }
    };

    Ok(PreparedRequest {
        method: op.method,
        url: op.url.clone(),
        body,
    })
}

fn string_object(fields: impl IntoIterator<Item = (String, String)>) -> Value {
    Value::Object(
        fields
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect::<Map<String, Value>>(),
    )
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Sends prepared operations over a blocking HTTP client.
#[derive(Debug, Clone)]
pub struct OpExecutor {
    http: reqwest::blocking::Client,
}

impl OpExecutor {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http })
    }

    /// Reuse an existing HTTP client.
    pub fn with_client(http: reqwest::blocking::Client) -> Self {
        Self { http }
    }

    pub(crate) fn http(&self) -> &reqwest::blocking::Client {
        &self.http
    }

    /// Prepare and send operation `name` from `representation`.
    pub fn perform(
        &self,
        representation: &impl HasOperations,
        name: &str,
        values: &Values,
    ) -> Result<reqwest::blocking::Response, ClientError> {
        let request = prepare(representation.operations(), name, values)?;
        self.send(request)
    }

    /// Send a prepared request as-is.
    pub fn send(&self, request: PreparedRequest) -> Result<reqwest::blocking::Response, ClientError> {
        let mut builder = self
            .http
            .request(reqwest_method(request.method), &request.url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        Ok(builder.send()?)
    }
}
