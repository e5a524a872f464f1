//! Read/write cluster snapshot files and load them into in-memory collaborators.

use crate::mapper::StaticKindMapper;
use crate::store::MemoryStore;
use crate::walk::StoreWalker;
use anyhow::{Context, Result};
use locator_core::access::KindResolver;
use locator_core::kind::{ResourceHandle, TypeDescriptor};
use locator_core::object::Object;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A point-in-time dump of a cluster: which kinds exist and the objects in it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    #[serde(default)]
    pub resources: Vec<ResourceMapping>,
    #[serde(default)]
    pub objects: Vec<Object>,
}

/// One kind registration: `(apiVersion, kind)` served by a plural resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMapping {
    pub api_version: String,
    pub kind: String,
    pub resource: String,
    #[serde(default = "default_namespaced")]
    pub namespaced: bool,
}

fn default_namespaced() -> bool {
    true
}

impl ResourceMapping {
    pub fn type_descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::new(self.api_version.clone(), self.kind.clone())
    }

    pub fn handle(&self) -> ResourceHandle {
        let kind = self.type_descriptor();
        let handle = ResourceHandle::new(kind.group(), kind.version(), self.resource.clone());
        if self.namespaced {
            handle
        } else {
            handle.cluster_scoped()
        }
    }
}

/// Load a snapshot from disk.
pub fn load(path: &Path) -> Result<ClusterSnapshot> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot from {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))
}

/// Save a snapshot to disk, creating parent directories if needed.
pub fn save(path: &Path, snapshot: &ClusterSnapshot) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(snapshot).context("failed to serialize snapshot")?;
    fs::write(path, json)
        .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
    Ok(())
}

/// A snapshot loaded into a kind mapper and an object store.
#[derive(Debug, Clone, Default)]
pub struct Cluster {
    pub kinds: StaticKindMapper,
    pub store: MemoryStore,
}

impl Cluster {
    /// Register every mapping, then file every object under its kind's resource.
    /// Objects of unmapped or ambiguous kinds are rejected.
    pub fn from_snapshot(snapshot: ClusterSnapshot) -> Result<Self> {
        let mut kinds = StaticKindMapper::new();
        for mapping in &snapshot.resources {
            kinds.register(mapping.type_descriptor(), mapping.handle());
        }

        let mut store = MemoryStore::new();
        for object in snapshot.objects {
            let resource = kinds
                .resolve(&object.type_descriptor())
                .with_context(|| format!("cannot store object {}", object.key()))?;
            if resource.namespaced && object.namespace().is_none() {
                anyhow::bail!(
                    "object {} of namespaced resource {} has no namespace",
                    object.key(),
                    resource
                );
            }
            store.insert(resource, object);
        }

        tracing::debug!(
            "loaded snapshot: {} kind(s), {} object(s)",
            kinds.len(),
            store.len()
        );
        Ok(Self { kinds, store })
    }

    /// Read and load a snapshot file.
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_snapshot(load(path)?)
    }

    /// Graph walker over this cluster's store.
    pub fn walker(&self) -> StoreWalker<'_> {
        StoreWalker::new(&self.store)
    }
}
