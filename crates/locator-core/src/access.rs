//! Collaborator seams: kind resolution, object storage, and graph traversal.
//!
//! The resolver only ever talks to these traits. Implementations may be networked
//! and may block; they own retries, timeouts and caching.

use crate::edge::TraversalStep;
use crate::error::{KindError, StoreError};
use crate::kind::{ResourceHandle, TypeDescriptor};
use crate::object::Object;
use crate::selector::Selector;

/// Maps a type descriptor to the versioned resource handle backing it.
pub trait KindResolver: Send + Sync {
    fn resolve(&self, kind: &TypeDescriptor) -> Result<ResourceHandle, KindError>;
}

/// List and point lookups against a resource handle.
pub trait ObjectStore: Send + Sync {
    /// List objects of `resource` in `namespace` matching `selector`.
    /// The namespace is ignored for cluster-scoped resources; an empty namespace
    /// lists a namespaced resource across all namespaces.
    fn list(
        &self,
        resource: &ResourceHandle,
        namespace: &str,
        selector: &Selector,
    ) -> Result<Vec<Object>, StoreError>;

    /// Fetch one object by name. Missing objects fail with [`StoreError::NotFound`].
    fn get(
        &self,
        resource: &ResourceHandle,
        namespace: &str,
        name: &str,
    ) -> Result<Object, StoreError>;
}

/// Executes a compiled step list from a root object.
pub trait GraphWalker: Send + Sync {
    /// Every object reachable by applying all `steps` in order starting at `root`.
    /// An empty result is a legal outcome meaning no path exists.
    fn walk(&self, root: &Object, steps: &[TraversalStep]) -> Result<Vec<Object>, StoreError>;
}

/// Borrowed set of collaborators handed to one location call.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub kinds: &'a dyn KindResolver,
    pub store: &'a dyn ObjectStore,
    pub walker: &'a dyn GraphWalker,
}
