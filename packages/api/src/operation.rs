//! Hypermedia operation descriptors.
//!
//! Every representation of a single todo carries an `operations` map. Each
//! entry tells the client how to make one follow-up request:
//!
//! ```json
//! "change-task": {
//!   "url": "http://localhost:5000/todos/todo3",
//!   "method": "PUT",
//!   "data-template": { "task": "<str:task>" }
//! }
//! ```
//!
//! `data-fixed` can be dropped into the request body unaltered.
//! `data-template` holds placeholders the client fills in first. A
//! descriptor carries at most one of the two.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::placeholder::FieldValue;

/// Operation name → descriptor. Ordered, so serialisation is deterministic.
pub type Operations = BTreeMap<String, OperationDescriptor>;

/// Anything that exposes an `operations` map the client can follow.
pub trait HasOperations {
    fn operations(&self) -> &Operations;
}

/// HTTP method of an operation. Serialises upper-case (`"PUT"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body carried by an operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Payload {
    /// No body (e.g. `delete-todo`).
    #[default]
    None,
    /// Sent unmodified.
    Fixed(BTreeMap<String, String>),
    /// Client placeholders must be substituted before sending.
    Template(BTreeMap<String, FieldValue>),
}

/// A fully resolved follow-up request, as delivered to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDescriptor", into = "RawDescriptor")]
pub struct OperationDescriptor {
    pub url: String,
    pub method: Method,
    pub payload: Payload,
}

/// A descriptor that cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("operation carries both data-fixed and data-template")]
    AmbiguousPayload,
}

/// Wire shape of [`OperationDescriptor`].
#[derive(Serialize, Deserialize)]
struct RawDescriptor {
    url: String,
    method: Method,
    #[serde(rename = "data-fixed", default, skip_serializing_if = "Option::is_none")]
    data_fixed: Option<BTreeMap<String, String>>,
    #[serde(rename = "data-template", default, skip_serializing_if = "Option::is_none")]
    data_template: Option<BTreeMap<String, FieldValue>>,
}

impl TryFrom<RawDescriptor> for OperationDescriptor {
    type Error = DescriptorError;

    fn try_from(raw: RawDescriptor) -> Result<Self, Self::Error> {
        let payload = match (raw.data_fixed, raw.data_template) {
            (Some(_), Some(_)) => return Err(DescriptorError::AmbiguousPayload),
            (Some(fixed), None) => Payload::Fixed(fixed),
            (None, Some(template)) => Payload::Template(template),
            (None, None) => Payload::None,
        };
        Ok(Self {
            url: raw.url,
            method: raw.method,
            payload,
        })
    }
}

impl From<OperationDescriptor> for RawDescriptor {
    fn from(op: OperationDescriptor) -> Self {
        let (data_fixed, data_template) = match op.payload {
            Payload::None => (None, None),
            Payload::Fixed(fixed) => (Some(fixed), None),
            Payload::Template(template) => (None, Some(template)),
        };
        Self {
            url: op.url,
            method: op.method,
            data_fixed,
            data_template,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::ClientPlaceholder;

    #[test]
    fn template_descriptor_wire_shape() {
        let op = OperationDescriptor {
            url: "http://localhost:5000/todos/todo3".into(),
            method: Method::Put,
            payload: Payload::Template(BTreeMap::from([(
                "task".to_string(),
                FieldValue::Client(ClientPlaceholder::new("str", "task")),
            )])),
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["method"], "PUT");
        assert_eq!(json["data-template"]["task"], "<str:task>");
        assert!(json.get("data-fixed").is_none());
    }

    #[test]
    fn descriptor_without_payload_decodes_to_none() {
        let op: OperationDescriptor = serde_json::from_str(
            r#"{ "url": "http://localhost:5000/todos/todo1", "method": "DELETE" }"#,
        )
        .unwrap();
        assert_eq!(op.method, Method::Delete);
        assert_eq!(op.payload, Payload::None);
    }

    #[test]
    fn descriptor_with_both_payloads_is_rejected() {
        let err = serde_json::from_str::<OperationDescriptor>(
            r#"{
                "url": "http://localhost:5000/todos/todo1",
                "method": "PUT",
                "data-fixed": { "status": "complete" },
                "data-template": { "task": "<str:task>" }
            }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("both data-fixed and data-template"));
    }
}
