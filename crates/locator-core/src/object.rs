//! Stored objects and their identity.

use crate::kind::TypeDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// An object instance as returned by the store.
///
/// `metadata` is typed; every other top-level field (`spec`, `data`, `status`, ...)
/// is kept verbatim in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Object {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owner_references: Vec<OwnerReference>,
}

/// A back-pointer from an owned object to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerReference {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,
    #[serde(default)]
    pub controller: bool,
}

impl Object {
    pub fn new(type_meta: &TypeDescriptor, namespace: Option<&str>, name: &str) -> Self {
        Self {
            api_version: type_meta.api_version.clone(),
            kind: type_meta.kind.clone(),
            metadata: ObjectMeta {
                name: name.to_string(),
                namespace: namespace.map(str::to_string),
                ..ObjectMeta::default()
            },
            fields: Map::new(),
        }
    }

    pub fn type_descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::new(self.api_version.clone(), self.kind.clone())
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata.namespace.as_deref().filter(|ns| !ns.is_empty())
    }

    /// Stable identifier: `namespace/name`, or `name` for cluster-scoped objects.
    pub fn key(&self) -> String {
        match self.namespace() {
            Some(ns) => format!("{}/{}", ns, self.metadata.name),
            None => self.metadata.name.clone(),
        }
    }

    /// True if `owner` is listed among this object's owner references.
    /// The uid is compared only when both sides carry one.
    pub fn is_owned_by(&self, owner: &Object) -> bool {
        self.metadata.owner_references.iter().any(|r| {
            r.kind == owner.kind
                && r.name == owner.metadata.name
                && (r.uid.is_empty()
                    || owner.metadata.uid.is_empty()
                    || r.uid == owner.metadata.uid)
        })
    }

    /// Collect the values found at a dotted field path below the top level.
    ///
    /// A segment ending in `[]` fans out over an array; missing fields yield nothing.
    /// Example: `spec.template.spec.volumes[].secret.secretName`.
    pub fn field_values(&self, path: &str) -> Vec<&Value> {
        let mut segments = path.split('.').filter(|s| !s.is_empty());
        let Some(first) = segments.next() else {
            return Vec::new();
        };
        let (first, fan_out) = split_segment(first);
        let mut current: Vec<&Value> = self.fields.get(first).into_iter().collect();
        if fan_out {
            current = expand_arrays(current);
        }
        for segment in segments {
            let (name, fan_out) = split_segment(segment);
            current = current
                .into_iter()
                .filter_map(|v| v.as_object().and_then(|m| m.get(name)))
                .collect();
            if fan_out {
                current = expand_arrays(current);
            }
        }
        current
    }

    /// String values at a field path; non-string leaves are skipped.
    pub fn field_strings(&self, path: &str) -> Vec<String> {
        let mut values: Vec<String> = self
            .field_values(path)
            .into_iter()
            .filter_map(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        values.sort();
        values.dedup();
        values
    }

    /// String maps at a field path (e.g. a `spec.selector` label map).
    pub fn field_string_maps(&self, path: &str) -> Vec<BTreeMap<String, String>> {
        self.field_values(path)
            .into_iter()
            .filter_map(|v| v.as_object())
            .map(|m| {
                m.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .collect()
    }
}

fn split_segment(segment: &str) -> (&str, bool) {
    match segment.strip_suffix("[]") {
        Some(name) => (name, true),
        None => (segment, false),
    }
}

fn expand_arrays(values: Vec<&Value>) -> Vec<&Value> {
    values
        .into_iter()
        .flat_map(|v| v.as_array().into_iter().flatten())
        .collect()
}
