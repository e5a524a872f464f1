//! Edge declarations, the per-call edge catalog, and compiled traversal steps.

use crate::error::LocateError;
use crate::kind::{ResourceHandle, TypeDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A declared, kind-level relationship between two resource kinds.
///
/// Direction is not fixed by the declaration: a path may walk it from `src` to
/// `dst` or back, depending on where the traversal currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDeclaration {
    pub name: String,
    pub src: TypeDescriptor,
    pub dst: TypeDescriptor,
    pub connection: ConnectionSpec,
}

/// How a `src` object relates to `dst` objects. Interpreted only by the traversal engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum ConnectionSpec {
    /// `src` objects carry an owner reference to the `dst` object.
    OwnedBy,
    /// The field path on the `src` object holds names of `dst` objects.
    MatchName { name_path: String },
    /// The field path on the `src` object is a label map selecting `dst` objects.
    MatchSelector { selector_path: String },
}

impl fmt::Display for ConnectionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OwnedBy => write!(f, "OwnedBy"),
            Self::MatchName { name_path } => write!(f, "MatchName({})", name_path),
            Self::MatchSelector { selector_path } => {
                write!(f, "MatchSelector({})", selector_path)
            }
        }
    }
}

impl EdgeDeclaration {
    /// Check that the edge relates two distinct, non-blank kinds.
    pub fn validate(&self) -> Result<(), LocateError> {
        let invalid = |reason: &str| LocateError::InvalidEdge {
            edge: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("edge name is empty"));
        }
        if self.src.is_blank() {
            return Err(invalid("source kind is blank"));
        }
        if self.dst.is_blank() {
            return Err(invalid("destination kind is blank"));
        }
        if self.src == self.dst {
            return Err(invalid("source and destination kinds are the same"));
        }
        Ok(())
    }
}

/// Name-keyed index over the edge declarations supplied with one call.
#[derive(Debug, Clone, Default)]
pub struct EdgeCatalog {
    edges: HashMap<String, EdgeDeclaration>,
}

impl EdgeCatalog {
    /// Index declarations by name, rejecting invalid edges and duplicate names.
    pub fn build(declarations: &[EdgeDeclaration]) -> Result<Self, LocateError> {
        let mut edges = HashMap::with_capacity(declarations.len());
        for decl in declarations {
            decl.validate()?;
            if edges.insert(decl.name.clone(), decl.clone()).is_some() {
                return Err(LocateError::DuplicateEdge(decl.name.clone()));
            }
        }
        Ok(Self { edges })
    }

    pub fn get(&self, name: &str) -> Option<&EdgeDeclaration> {
        self.edges.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.edges.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// One directed application of an edge, oriented relative to the current position.
///
/// `from` is always the resource the traversal stands on and `to` the resource
/// it reaches. `Forward` walks the declaration `src → dst`; `Reverse` walks it
/// `dst → src`, so for a reverse step `from` is the declared destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "direction", rename_all = "lowercase")]
pub enum TraversalStep {
    Forward {
        from: ResourceHandle,
        to: ResourceHandle,
        connection: ConnectionSpec,
    },
    Reverse {
        from: ResourceHandle,
        to: ResourceHandle,
        connection: ConnectionSpec,
    },
}

impl TraversalStep {
    pub fn from(&self) -> &ResourceHandle {
        match self {
            Self::Forward { from, .. } | Self::Reverse { from, .. } => from,
        }
    }

    pub fn to(&self) -> &ResourceHandle {
        match self {
            Self::Forward { to, .. } | Self::Reverse { to, .. } => to,
        }
    }

    pub fn connection(&self) -> &ConnectionSpec {
        match self {
            Self::Forward { connection, .. } | Self::Reverse { connection, .. } => connection,
        }
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Self::Forward { .. })
    }
}

impl fmt::Display for TraversalStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.is_forward() { "forward" } else { "reverse" };
        write!(
            f,
            "{} -> {} ({}, {})",
            self.from(),
            self.to(),
            direction,
            self.connection()
        )
    }
}
