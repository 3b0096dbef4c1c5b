//! Hypermedia operations attached to todo representations.
//!
//! The operation catalog is a static table of templates. String fields may
//! contain two kinds of placeholder:
//!
//! - `{name}` is resolved here, from the todo id and any values the caller
//!   just supplied. No `{...}` ever reaches a client.
//! - `<type:name>` as a whole value is a client placeholder. It is passed
//!   through untouched, even when a value of the same name was supplied, so
//!   the client knows what the next request needs.
//!
//! Every call to [`Hypermedia::operations`] builds a fresh [`Operations`]
//! map; the catalog itself is never written to.

use std::collections::BTreeMap;

use hypertodo_api::{
    ClientPlaceholder, FieldValue, Method, OperationDescriptor, Operations, Payload, TodoId,
};

/// Values supplied with the current request (e.g. `status`, `task`), made
/// available to `{name}` placeholders.
pub type Bindings = BTreeMap<String, String>;

/// Name of the binding that always holds the todo id.
pub const TODO_ID: &str = "todo_id";

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// One entry of the static operation catalog.
#[derive(Debug)]
pub struct OperationTemplate {
    pub name: &'static str,
    pub method: Method,
    /// Path relative to the public base URL.
    pub path: &'static str,
    pub payload: PayloadTemplate,
}

#[derive(Debug)]
pub enum PayloadTemplate {
    None,
    Fixed(&'static [(&'static str, &'static str)]),
    Template(&'static [(&'static str, &'static str)]),
}

pub const COMPLETE_TODO: &str = "complete-todo";
pub const WORK_TODO: &str = "work-todo";
pub const DELETE_TODO: &str = "delete-todo";
pub const CHANGE_TASK: &str = "change-task";

/// Operations offered on every single-todo representation.
pub static CATALOG: &[OperationTemplate] = &[
    OperationTemplate {
        name: COMPLETE_TODO,
        method: Method::Put,
        path: "/todos/{todo_id}/status",
        payload: PayloadTemplate::Fixed(&[("status", "complete")]),
    },
    OperationTemplate {
        name: WORK_TODO,
        method: Method::Put,
        path: "/todos/{todo_id}/status",
        payload: PayloadTemplate::Fixed(&[("status", "working")]),
    },
    OperationTemplate {
        name: DELETE_TODO,
        method: Method::Delete,
        path: "/todos/{todo_id}",
        payload: PayloadTemplate::None,
    },
    OperationTemplate {
        name: CHANGE_TASK,
        method: Method::Put,
        path: "/todos/{todo_id}",
        payload: PayloadTemplate::Template(&[("task", "<str:task>")]),
    },
];

// ---------------------------------------------------------------------------
// Template parsing
// ---------------------------------------------------------------------------

/// Errors raised while resolving the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// A `{name}` placeholder had no value in scope.
    #[error("no value bound for placeholder {{{0}}}")]
    Unbound(String),

    /// A `{` without a matching `}` (or an empty `{}`).
    #[error("malformed template {0:?}")]
    Malformed(String),
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Var(&'a str),
}

/// Split a server template into literal text and `{name}` variables.
fn parse_segments(template: &str) -> Result<Vec<Segment<'_>>, ResolveError> {
    let malformed = || ResolveError::Malformed(template.to_string());
    let mut segments = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        if open > 0 {
            segments.push(Segment::Text(&rest[..open]));
        }
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(malformed)?;
        let name = &after[..close];
        if name.is_empty() || name.contains('{') {
            return Err(malformed());
        }
        segments.push(Segment::Var(name));
        rest = &after[close + 1..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }
    Ok(segments)
}

/// How a template field is handled.
#[derive(Debug, PartialEq, Eq)]
enum FieldKind<'a> {
    /// `<type:name>`: left for the client.
    Client(ClientPlaceholder),
    /// Literal text with zero or more `{name}` variables.
    Server(Vec<Segment<'a>>),
}

fn classify(field: &str) -> Result<FieldKind<'_>, ResolveError> {
    match ClientPlaceholder::parse(field) {
        Some(p) => Ok(FieldKind::Client(p)),
        None => parse_segments(field).map(FieldKind::Server),
    }
}

// ---------------------------------------------------------------------------
// Hypermedia
// ---------------------------------------------------------------------------

/// Resolves the operation catalog against a public base URL.
#[derive(Debug, Clone)]
pub struct Hypermedia {
    base_url: String,
}

struct Scope<'a> {
    todo_id: String,
    bindings: &'a Bindings,
}

impl Scope<'_> {
    fn lookup(&self, name: &str) -> Result<&str, ResolveError> {
        if name == TODO_ID {
            return Ok(&self.todo_id);
        }
        self.bindings
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ResolveError::Unbound(name.to_string()))
    }
}

impl Hypermedia {
    /// `base_url` is the externally visible root, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `{base}/todos`
    pub fn todos_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    /// Build the `operations` map for one todo.
    ///
    /// `bindings` holds values the caller just supplied; they fill `{name}`
    /// placeholders but never client placeholders.
    pub fn operations(&self, id: TodoId, bindings: &Bindings) -> Result<Operations, ResolveError> {
        self.resolve_catalog(CATALOG, id, bindings)
    }

    fn resolve_catalog(
        &self,
        catalog: &[OperationTemplate],
        id: TodoId,
        bindings: &Bindings,
    ) -> Result<Operations, ResolveError> {
        let scope = Scope {
            todo_id: id.to_string(),
            bindings,
        };
        catalog
            .iter()
            .map(|op| {
                let descriptor = OperationDescriptor {
                    url: self.resolve_url(op.path, &scope)?,
                    method: op.method,
                    payload: resolve_payload(&op.payload, &scope)?,
                };
                Ok::<_, ResolveError>((op.name.to_string(), descriptor))
            })
            .collect()
    }

    fn resolve_url(&self, path: &str, scope: &Scope<'_>) -> Result<String, ResolveError> {
        let mut url = self.base_url.clone();
        for segment in parse_segments(path)? {
            match segment {
                Segment::Text(text) => url.push_str(text),
                Segment::Var(name) => url.push_str(&urlencoding::encode(scope.lookup(name)?)),
            }
        }
        Ok(url)
    }
}

fn resolve_text(segments: Vec<Segment<'_>>, scope: &Scope<'_>) -> Result<String, ResolveError> {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Var(name) => out.push_str(scope.lookup(name)?),
        }
    }
    Ok(out)
}

fn resolve_payload(payload: &PayloadTemplate, scope: &Scope<'_>) -> Result<Payload, ResolveError> {
    match payload {
        PayloadTemplate::None => Ok(Payload::None),
        PayloadTemplate::Fixed(fields) => fields
            .iter()
            .map(|&(key, value)| Ok((key.to_string(), resolve_text(parse_segments(value)?, scope)?)))
            .collect::<Result<BTreeMap<_, _>, ResolveError>>()
            .map(Payload::Fixed),
        PayloadTemplate::Template(fields) => fields
            .iter()
            .map(|&(key, value)| {
                let resolved = match classify(value)? {
                    FieldKind::Client(placeholder) => FieldValue::Client(placeholder),
                    FieldKind::Server(segments) => FieldValue::Literal(resolve_text(segments, scope)?),
                };
                Ok((key.to_string(), resolved))
            })
            .collect::<Result<BTreeMap<_, _>, ResolveError>>()
            .map(Payload::Template),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> TodoId {
        TodoId::new(n).unwrap()
    }

    fn hypermedia() -> Hypermedia {
        Hypermedia::new("http://localhost:5000/")
    }

    fn bindings(pairs: &[(&str, &str)]) -> Bindings {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn offers_the_full_catalog() {
        let ops = hypermedia().operations(id(3), &Bindings::new()).unwrap();
        let names: Vec<&str> = ops.keys().map(String::as_str).collect();
        assert_eq!(names, [CHANGE_TASK, COMPLETE_TODO, DELETE_TODO, WORK_TODO]);
    }

    #[test]
    fn urls_are_fully_resolved() {
        let ops = hypermedia().operations(id(3), &Bindings::new()).unwrap();
        assert_eq!(ops[COMPLETE_TODO].url, "http://localhost:5000/todos/todo3/status");
        assert_eq!(ops[WORK_TODO].url, "http://localhost:5000/todos/todo3/status");
        assert_eq!(ops[DELETE_TODO].url, "http://localhost:5000/todos/todo3");
        assert_eq!(ops[CHANGE_TASK].url, "http://localhost:5000/todos/todo3");
        assert!(ops.values().all(|op| !op.url.contains('{')));
    }

    #[test]
    fn methods_match_the_endpoints() {
        let ops = hypermedia().operations(id(1), &Bindings::new()).unwrap();
        assert_eq!(ops[COMPLETE_TODO].method, Method::Put);
        assert_eq!(ops[DELETE_TODO].method, Method::Delete);
        assert_eq!(ops[DELETE_TODO].payload, Payload::None);
    }

    #[test]
    fn change_task_keeps_client_placeholder_even_when_task_supplied() {
        let supplied = bindings(&[("task", "already here"), ("status", "working")]);
        let ops = hypermedia().operations(id(2), &supplied).unwrap();
        let Payload::Template(fields) = &ops[CHANGE_TASK].payload else {
            panic!("change-task must carry a template");
        };
        assert_eq!(
            fields["task"],
            FieldValue::Client(ClientPlaceholder::new("str", "task"))
        );
    }

    #[test]
    fn fixed_payloads_ignore_supplied_values() {
        let supplied = bindings(&[("status", "backlog")]);
        let ops = hypermedia().operations(id(2), &supplied).unwrap();
        assert_eq!(
            ops[COMPLETE_TODO].payload,
            Payload::Fixed(BTreeMap::from([("status".into(), "complete".into())]))
        );
        assert_eq!(
            ops[WORK_TODO].payload,
            Payload::Fixed(BTreeMap::from([("status".into(), "working".into())]))
        );
    }

    #[test]
    fn repeated_resolution_is_byte_identical() {
        let h = hypermedia();
        let first = serde_json::to_vec(&h.operations(id(1), &Bindings::new()).unwrap()).unwrap();

        // Resolve other ids, with supplied values, in between.
        h.operations(id(2), &bindings(&[("task", "x"), ("status", "y")]))
            .unwrap();
        h.operations(id(7), &Bindings::new()).unwrap();

        let second = serde_json::to_vec(&h.operations(id(1), &Bindings::new()).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn server_placeholders_use_bindings() {
        static CUSTOM: &[OperationTemplate] = &[OperationTemplate {
            name: "rename",
            method: Method::Post,
            path: "/todos/{todo_id}/rename",
            payload: PayloadTemplate::Template(&[
                ("previous", "{task}"),
                ("next", "<str:next>"),
                ("note", "renamed {todo_id}"),
            ]),
        }];
        let ops = hypermedia()
            .resolve_catalog(CUSTOM, id(5), &bindings(&[("task", "old")]))
            .unwrap();
        let Payload::Template(fields) = &ops["rename"].payload else {
            panic!("expected template");
        };
        assert_eq!(fields["previous"], FieldValue::Literal("old".into()));
        assert_eq!(fields["note"], FieldValue::Literal("renamed todo5".into()));
        assert!(fields["next"].is_client());
        assert_eq!(ops["rename"].url, "http://localhost:5000/todos/todo5/rename");
    }

    #[test]
    fn unbound_placeholder_is_an_error() {
        static CUSTOM: &[OperationTemplate] = &[OperationTemplate {
            name: "tag",
            method: Method::Put,
            path: "/todos/{todo_id}/tags/{tag}",
            payload: PayloadTemplate::None,
        }];
        let err = hypermedia()
            .resolve_catalog(CUSTOM, id(1), &Bindings::new())
            .unwrap_err();
        assert_eq!(err, ResolveError::Unbound("tag".into()));
    }

    #[test]
    fn url_substitutions_are_percent_encoded() {
        static CUSTOM: &[OperationTemplate] = &[OperationTemplate {
            name: "search",
            method: Method::Get,
            path: "/todos/search/{q}",
            payload: PayloadTemplate::None,
        }];
        let ops = hypermedia()
            .resolve_catalog(CUSTOM, id(1), &bindings(&[("q", "a b/c")]))
            .unwrap();
        assert_eq!(ops["search"].url, "http://localhost:5000/todos/search/a%20b%2Fc");
    }

    #[test]
    fn segment_parsing() {
        assert_eq!(
            parse_segments("/todos/{todo_id}/status").unwrap(),
            [
                Segment::Text("/todos/"),
                Segment::Var("todo_id"),
                Segment::Text("/status")
            ]
        );
        assert_eq!(parse_segments("plain").unwrap(), [Segment::Text("plain")]);
        assert!(parse_segments("/todos/{todo_id").is_err());
        assert!(parse_segments("/todos/{}").is_err());
    }

    #[test]
    fn classify_distinguishes_client_and_server_fields() {
        assert!(matches!(classify("<str:task>").unwrap(), FieldKind::Client(_)));
        assert!(matches!(classify("{task}").unwrap(), FieldKind::Server(_)));
        assert!(matches!(classify("complete").unwrap(), FieldKind::Server(_)));
    }
}
