// ── Entity references and resource paths ──
//
// Kong accepts either an entity's UUID or its unique name (username,
// group, target address, upstream name) anywhere a single entity is
// addressed. The client never tries to tell them apart; the Admin API
// does that server-side.

use std::fmt;

use uuid::Uuid;

use crate::error::Error;

// ── NameOrId ────────────────────────────────────────────────────────

/// A reference to one entity: its canonical id or its unique name.
///
/// Forwarded verbatim as a path segment. The only local check is that it
/// is not empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameOrId(String);

impl NameOrId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NameOrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NameOrId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NameOrId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<Uuid> for NameOrId {
    fn from(u: Uuid) -> Self {
        Self(u.to_string())
    }
}

impl From<&Uuid> for NameOrId {
    fn from(u: &Uuid) -> Self {
        Self(u.to_string())
    }
}

/// Reject an empty reference. `field` names it in the error.
pub(crate) fn require<'a>(
    field: &'static str,
    reference: &'a NameOrId,
) -> Result<&'a str, Error> {
    if reference.is_empty() {
        return Err(Error::empty(field));
    }
    Ok(reference.as_str())
}

/// Reject an absent or empty optional string field.
pub(crate) fn require_field<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, Error> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::empty(field)),
    }
}

// ── ResourcePath ────────────────────────────────────────────────────

/// Path below the Admin API root, kept as raw segments.
///
/// Segments are percent-encoded individually when joined onto the base
/// URL, so a name like `10.0.0.1:8080` or `a/b` stays one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// `/<collection>`
    pub fn collection(collection: &'static str) -> Self {
        Self {
            segments: vec![collection.to_owned()],
        }
    }

    /// `/<parent_collection>/<parent>/<child_collection>`
    ///
    /// Fails when `parent` is empty.
    pub fn scoped(
        parent_collection: &'static str,
        parent_field: &'static str,
        parent: &NameOrId,
        child_collection: &'static str,
    ) -> Result<Self, Error> {
        let parent = require(parent_field, parent)?;
        Ok(Self {
            segments: vec![
                parent_collection.to_owned(),
                parent.to_owned(),
                child_collection.to_owned(),
            ],
        })
    }

    /// Append a single-entity reference. Fails when it is empty.
    pub fn entity(mut self, field: &'static str, reference: &NameOrId) -> Result<Self, Error> {
        let reference = require(field, reference)?;
        self.segments.push(reference.to_owned());
        Ok(self)
    }

    /// Append a fixed action segment such as `healthy`.
    pub fn action(mut self, action: &'static str) -> Self {
        self.segments.push(action.to_owned());
        self
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}
