//! In-memory object store keyed by resource and object key.

use locator_core::access::ObjectStore;
use locator_core::error::StoreError;
use locator_core::kind::ResourceHandle;
use locator_core::object::Object;
use locator_core::selector::Selector;
use std::collections::BTreeMap;

/// Objects grouped by resource handle, then by `namespace/name` key.
///
/// Listing returns objects in key order, so results are deterministic. An empty
/// namespace lists namespaced resources across every namespace.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: BTreeMap<ResourceHandle, BTreeMap<String, Object>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an object under `resource`.
    pub fn insert(&mut self, resource: ResourceHandle, object: Object) {
        self.objects
            .entry(resource)
            .or_default()
            .insert(object.key(), object);
    }

    /// Total number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup_key(resource: &ResourceHandle, namespace: &str, name: &str) -> String {
        if resource.namespaced && !namespace.is_empty() {
            format!("{}/{}", namespace, name)
        } else {
            name.to_string()
        }
    }
}

impl ObjectStore for MemoryStore {
    fn list(
        &self,
        resource: &ResourceHandle,
        namespace: &str,
        selector: &Selector,
    ) -> Result<Vec<Object>, StoreError> {
        let Some(objects) = self.objects.get(resource) else {
            return Ok(Vec::new());
        };
        Ok(objects
            .values()
            .filter(|o| {
                !resource.namespaced || namespace.is_empty() || o.namespace() == Some(namespace)
            })
            .filter(|o| selector.matches(&o.metadata.labels))
            .cloned()
            .collect())
    }

    fn get(
        &self,
        resource: &ResourceHandle,
        namespace: &str,
        name: &str,
    ) -> Result<Object, StoreError> {
        self.objects
            .get(resource)
            .and_then(|objects| objects.get(&Self::lookup_key(resource, namespace, name)))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                resource: resource.clone(),
                name: name.to_string(),
            })
    }
}
