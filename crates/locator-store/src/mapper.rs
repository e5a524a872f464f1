//! Static kind → resource mapping.

use locator_core::access::KindResolver;
use locator_core::error::KindError;
use locator_core::kind::{ResourceHandle, TypeDescriptor};
use std::collections::BTreeMap;

/// A fixed table of kind registrations.
///
/// Registering the same kind under two different resources makes it ambiguous.
#[derive(Debug, Clone, Default)]
pub struct StaticKindMapper {
    kinds: BTreeMap<TypeDescriptor, Vec<ResourceHandle>>,
}

impl StaticKindMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: TypeDescriptor, resource: ResourceHandle) {
        let handles = self.kinds.entry(kind).or_default();
        if !handles.contains(&resource) {
            handles.push(resource);
        }
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl KindResolver for StaticKindMapper {
    fn resolve(&self, kind: &TypeDescriptor) -> Result<ResourceHandle, KindError> {
        match self.kinds.get(kind).map(Vec::as_slice) {
            None | Some([]) => Err(KindError::KindNotFound(kind.clone())),
            Some([handle]) => Ok(handle.clone()),
            Some(handles) => {
                let mut candidates: Vec<String> = handles
                    .iter()
                    .map(|h| format!("{}/{}", h.api_version(), h.resource))
                    .collect();
                candidates.sort();
                Err(KindError::AmbiguousKind {
                    kind: kind.clone(),
                    candidates,
                })
            }
        }
    }
}
