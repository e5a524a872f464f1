//! Error taxonomy shared by the resolver and its collaborators.

use crate::kind::{ResourceHandle, TypeDescriptor};
use crate::selector::SelectorOperator;

/// Errors from kind-to-resource resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KindError {
    #[error("no matches for kind \"{}\" in version \"{}\"", .0.kind, .0.api_version)]
    KindNotFound(TypeDescriptor),
    #[error("{kind} matches multiple resources: {}", .candidates.join(", "))]
    AmbiguousKind {
        kind: TypeDescriptor,
        candidates: Vec<String>,
    },
}

/// Errors from the object store (list/get) and the traversal engine built on it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{resource} \"{name}\" not found")]
    NotFound {
        resource: ResourceHandle,
        name: String,
    },
    #[error("access to {resource} forbidden: {reason}")]
    Forbidden {
        resource: ResourceHandle,
        reason: String,
    },
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("invalid request: {0}")]
    Invalid(String),
}

/// Errors from compiling a label selector into a predicate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("label selector key must not be empty")]
    EmptyKey,
    #[error("operator {operator:?} on key \"{key}\" requires at least one value")]
    MissingValues {
        key: String,
        operator: SelectorOperator,
    },
    #[error("operator {operator:?} on key \"{key}\" takes no values")]
    UnexpectedValues {
        key: String,
        operator: SelectorOperator,
    },
}

/// Errors surfaced by an object-location call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
    #[error(transparent)]
    Kind(#[from] KindError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid label selector: {0}")]
    InvalidSelector(#[from] SelectorError),
    #[error("{resource} not found")]
    NotFound { resource: ResourceHandle },
    #[error("found multiple {resource}: {}", .keys.join(", "))]
    AmbiguousResult {
        resource: ResourceHandle,
        keys: Vec<String>,
    },
    #[error("path edge \"{0}\" not found in edge catalog")]
    PathEdgeNotFound(String),
    #[error("edge \"{edge}\" does not connect to {from}")]
    DisconnectedEdge { edge: String, from: TypeDescriptor },
    #[error("edge \"{0}\" is declared more than once")]
    DuplicateEdge(String),
    #[error("edge \"{edge}\" is invalid: {reason}")]
    InvalidEdge { edge: String, reason: String },
    #[error("root selection needs a non-empty selector or a name template")]
    MissingRootCriterion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_message_lists_keys() {
        let err = LocateError::AmbiguousResult {
            resource: ResourceHandle::new("", "v1", "secrets"),
            keys: vec!["ns/bar".into(), "ns/baz".into()],
        };
        assert_eq!(err.to_string(), "found multiple secrets: ns/bar, ns/baz");
    }

    #[test]
    fn test_store_errors_pass_through_unchanged() {
        let store = StoreError::Unavailable("connection refused".into());
        let err: LocateError = store.clone().into();
        assert_eq!(err, LocateError::Store(store));
        assert_eq!(err.to_string(), "store unavailable: connection refused");
    }

    #[test]
    fn test_kind_not_found_message() {
        let err = KindError::KindNotFound(TypeDescriptor::new("example.com/v1", "Widget"));
        assert_eq!(
            err.to_string(),
            "no matches for kind \"Widget\" in version \"example.com/v1\""
        );
    }
}
