//! Client placeholders in payload templates.
//!
//! A template value of the form `<type:name>` (for example `<str:task>`)
//! marks a field the client must fill in before sending the request. The
//! server never resolves these; it passes them through so the client knows
//! which values the next call needs.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A parsed `<type:name>` tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientPlaceholder {
    /// Declared value type, e.g. `str`. Informational only.
    pub kind: String,
    /// Name of the value the client must supply.
    pub name: String,
}

impl ClientPlaceholder {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Parse a whole string as a client placeholder.
    ///
    /// Returns `None` unless `s` is exactly `<kind:name>` with both parts
    /// non-empty and free of angle brackets.
    pub fn parse(s: &str) -> Option<Self> {
        let inner = s.strip_prefix('<')?.strip_suffix('>')?;
        if inner.contains(['<', '>']) {
            return None;
        }
        let (kind, name) = inner.split_once(':')?;
        if kind.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self::new(kind, name))
    }
}

impl fmt::Display for ClientPlaceholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}:{}>", self.kind, self.name)
    }
}

/// One value in a `data-template` payload.
///
/// On the wire both variants are plain JSON strings; the distinction is
/// recovered by [`FieldValue::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Already resolved; sent as-is.
    Literal(String),
    /// Must be replaced by a client-supplied value.
    Client(ClientPlaceholder),
}

impl FieldValue {
    pub fn parse(s: &str) -> Self {
        match ClientPlaceholder::parse(s) {
            Some(p) => FieldValue::Client(p),
            None => FieldValue::Literal(s.to_string()),
        }
    }

    pub fn is_client(&self) -> bool {
        matches!(self, FieldValue::Client(_))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Literal(s) => f.write_str(s),
            FieldValue::Client(p) => p.fmt(f),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(FieldValue::parse(&s))
    }
}
