//! The locator document: a root selection, a named edge path, and the edge catalog.

use crate::edge::EdgeDeclaration;
use crate::kind::TypeDescriptor;
use crate::selector::LabelSelector;
use serde::{Deserialize, Serialize};

/// How the starting object is picked.
///
/// The namespace is not part of the selection; it comes from the invocation [`Scope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootSelection {
    pub target: TypeDescriptor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name_template: String,
}

/// The effective resolution mode of a [`RootSelection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode<'a> {
    BySelector(&'a LabelSelector),
    ByName(&'a str),
}

impl RootSelection {
    /// A selector with at least one requirement wins; an absent or empty selector
    /// falls back to the name template. `None` when neither is usable.
    pub fn mode(&self) -> Option<ResolutionMode<'_>> {
        match &self.selector {
            Some(selector) if !selector.is_empty() => Some(ResolutionMode::BySelector(selector)),
            _ if !self.name_template.trim().is_empty() => {
                Some(ResolutionMode::ByName(&self.name_template))
            }
            _ => None,
        }
    }
}

/// Invocation context shared by every lookup in one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub namespace: String,
}

impl Scope {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }
}

/// A complete locator document as supplied by the workflow definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectLocator {
    pub start: RootSelection,
    /// Ordered edge names, walked from the root.
    #[serde(default)]
    pub path: Vec<String>,
    /// Edge declarations the path names refer to.
    #[serde(default)]
    pub edges: Vec<EdgeDeclaration>,
}
