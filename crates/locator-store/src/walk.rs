//! Graph walker: applies compiled traversal steps through an object store.

use locator_core::access::{GraphWalker, ObjectStore};
use locator_core::edge::{ConnectionSpec, TraversalStep};
use locator_core::error::StoreError;
use locator_core::kind::ResourceHandle;
use locator_core::object::Object;
use locator_core::selector::{LabelSelector, Selector};
use std::collections::BTreeMap;

/// Walks steps hop by hop, using only `list`/`get` on the wrapped store.
///
/// Each hop expands every object in the frontier and deduplicates the reached
/// objects by key. Dangling name or owner references are skipped. A hop from a
/// cluster-scoped object searches namespaced targets in every namespace.
pub struct StoreWalker<'a> {
    store: &'a dyn ObjectStore,
}

impl<'a> StoreWalker<'a> {
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self { store }
    }

    fn neighbors(&self, current: &Object, step: &TraversalStep) -> Result<Vec<Object>, StoreError> {
        let ns = current.namespace().unwrap_or_default();
        let to = step.to();

        match (step, step.connection()) {
            // Owned object -> its owners.
            (TraversalStep::Forward { .. }, ConnectionSpec::OwnedBy) => {
                let mut owners = Vec::new();
                for owner_ref in &current.metadata.owner_references {
                    if owner_ref.api_version != to.api_version() {
                        continue;
                    }
                    owners.extend(
                        self.lookup(to, ns, &owner_ref.name)?
                            .into_iter()
                            .filter(|owner| current.is_owned_by(owner)),
                    );
                }
                Ok(owners)
            }
            // Owner -> the objects it owns.
            (TraversalStep::Reverse { .. }, ConnectionSpec::OwnedBy) => Ok(self
                .store
                .list(to, ns, &Selector::everything())?
                .into_iter()
                .filter(|o| o.is_owned_by(current))
                .collect()),
            (TraversalStep::Forward { .. }, ConnectionSpec::MatchName { name_path }) => {
                let mut found = Vec::new();
                for name in current.field_strings(name_path) {
                    found.extend(self.lookup(to, ns, &name)?);
                }
                Ok(found)
            }
            (TraversalStep::Reverse { .. }, ConnectionSpec::MatchName { name_path }) => Ok(self
                .store
                .list(to, ns, &Selector::everything())?
                .into_iter()
                .filter(|o| o.field_strings(name_path).iter().any(|n| n == current.name()))
                .collect()),
            (TraversalStep::Forward { .. }, ConnectionSpec::MatchSelector { selector_path }) => {
                let mut found = Vec::new();
                for labels in current.field_string_maps(selector_path) {
                    // An empty selector map selects nothing.
                    if labels.is_empty() {
                        continue;
                    }
                    let selector = LabelSelector::from_labels(labels)
                        .to_selector()
                        .map_err(|e| StoreError::Invalid(e.to_string()))?;
                    found.extend(self.store.list(to, ns, &selector)?);
                }
                Ok(found)
            }
            (TraversalStep::Reverse { .. }, ConnectionSpec::MatchSelector { selector_path }) => {
                Ok(self
                    .store
                    .list(to, ns, &Selector::everything())?
                    .into_iter()
                    .filter(|o| {
                        o.field_string_maps(selector_path).iter().any(|labels| {
                            !labels.is_empty()
                                && labels
                                    .iter()
                                    .all(|(k, v)| current.metadata.labels.get(k) == Some(v))
                        })
                    })
                    .collect())
            }
        }
    }

    /// Objects of `resource` called `name`. Without a namespace a namespaced
    /// resource is searched everywhere, so several objects may come back.
    fn lookup(
        &self,
        resource: &ResourceHandle,
        namespace: &str,
        name: &str,
    ) -> Result<Vec<Object>, StoreError> {
        if resource.namespaced && namespace.is_empty() {
            return Ok(self
                .store
                .list(resource, "", &Selector::everything())?
                .into_iter()
                .filter(|o| o.name() == name)
                .collect());
        }
        match self.store.get(resource, namespace, name) {
            Ok(obj) => Ok(vec![obj]),
            Err(StoreError::NotFound { .. }) => {
                tracing::debug!("dangling reference to {} {}/{}", resource, namespace, name);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

impl GraphWalker for StoreWalker<'_> {
    fn walk(&self, root: &Object, steps: &[TraversalStep]) -> Result<Vec<Object>, StoreError> {
        let mut frontier = vec![root.clone()];

        for (i, step) in steps.iter().enumerate() {
            let mut reached: BTreeMap<String, Object> = BTreeMap::new();
            for current in &frontier {
                for obj in self.neighbors(current, step)? {
                    reached.entry(obj.key()).or_insert(obj);
                }
            }
            tracing::debug!("hop {} ({}): {} object(s)", i + 1, step, reached.len());
            frontier = reached.into_values().collect();
            if frontier.is_empty() {
                break;
            }
        }

        Ok(frontier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use locator_core::kind::TypeDescriptor;
    use locator_core::object::OwnerReference;
    use serde_json::json;

    fn deployments() -> ResourceHandle {
        ResourceHandle::new("apps", "v1", "deployments")
    }

    fn replicasets() -> ResourceHandle {
        ResourceHandle::new("apps", "v1", "replicasets")
    }

    fn services() -> ResourceHandle {
        ResourceHandle::new("", "v1", "services")
    }

    fn pods() -> ResourceHandle {
        ResourceHandle::new("", "v1", "pods")
    }

    fn owned(kind: &str, name: &str, owner_kind: &str, owner: &str) -> Object {
        let mut obj = Object::new(&TypeDescriptor::new("apps/v1", kind), Some("prod"), name);
        obj.metadata.owner_references.push(OwnerReference {
            api_version: "apps/v1".into(),
            kind: owner_kind.into(),
            name: owner.into(),
            uid: String::new(),
            controller: true,
        });
        obj
    }

    fn pod(name: &str, app: &str) -> Object {
        let mut obj = Object::new(&TypeDescriptor::new("v1", "Pod"), Some("prod"), name);
        obj.metadata.labels.insert("app".into(), app.into());
        obj
    }

    fn service(name: &str, app: &str) -> Object {
        serde_json::from_value(json!({
            "apiVersion": "v1",
            "kind": "Service",
            "metadata": {"name": name, "namespace": "prod"},
            "spec": {"selector": {"app": app}}
        }))
        .unwrap()
    }

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert(
            deployments(),
            Object::new(&TypeDescriptor::new("apps/v1", "Deployment"), Some("prod"), "web"),
        );
        store.insert(replicasets(), owned("ReplicaSet", "web-1", "Deployment", "web"));
        store.insert(replicasets(), owned("ReplicaSet", "web-2", "Deployment", "web"));
        store.insert(replicasets(), owned("ReplicaSet", "api-1", "Deployment", "api"));
        store.insert(pods(), pod("web-a", "web"));
        store.insert(pods(), pod("web-b", "web"));
        store.insert(pods(), pod("db-a", "db"));
        store.insert(services(), service("web-svc", "web"));
        store.insert(services(), service("db-svc", "db"));
        store
    }

    fn owned_by() -> ConnectionSpec {
        ConnectionSpec::OwnedBy
    }

    fn select_pods() -> ConnectionSpec {
        ConnectionSpec::MatchSelector {
            selector_path: "spec.selector".into(),
        }
    }

    fn keys(objects: &[Object]) -> Vec<String> {
        objects.iter().map(Object::key).collect()
    }

    #[test]
    fn test_owned_by_forward_reaches_owner() {
        let store = store();
        let walker = StoreWalker::new(&store);
        let root = owned("ReplicaSet", "web-1", "Deployment", "web");
        let steps = [TraversalStep::Forward {
            from: replicasets(),
            to: deployments(),
            connection: owned_by(),
        }];
        assert_eq!(keys(&walker.walk(&root, &steps).unwrap()), vec!["prod/web"]);
    }

    #[test]
    fn test_owned_by_reverse_reaches_owned_objects() {
        let store = store();
        let walker = StoreWalker::new(&store);
        let root = store.get(&deployments(), "prod", "web").unwrap();
        let steps = [TraversalStep::Reverse {
            from: deployments(),
            to: replicasets(),
            connection: owned_by(),
        }];
        assert_eq!(
            keys(&walker.walk(&root, &steps).unwrap()),
            vec!["prod/web-1", "prod/web-2"]
        );
    }

    #[test]
    fn test_match_selector_both_directions() {
        let store = store();
        let walker = StoreWalker::new(&store);

        let svc = service("web-svc", "web");
        let forward = [TraversalStep::Forward {
            from: services(),
            to: pods(),
            connection: select_pods(),
        }];
        assert_eq!(
            keys(&walker.walk(&svc, &forward).unwrap()),
            vec!["prod/web-a", "prod/web-b"]
        );

        let reverse = [TraversalStep::Reverse {
            from: pods(),
            to: services(),
            connection: select_pods(),
        }];
        assert_eq!(
            keys(&walker.walk(&pod("db-a", "db"), &reverse).unwrap()),
            vec!["prod/db-svc"]
        );
    }

    #[test]
    fn test_match_name_skips_dangling_references() {
        let secrets = ResourceHandle::new("", "v1", "secrets");
        let mut store = store();
        store.insert(
            secrets.clone(),
            Object::new(&TypeDescriptor::new("v1", "Secret"), Some("prod"), "db-creds"),
        );
        let walker = StoreWalker::new(&store);
        let root: Object = serde_json::from_value(json!({
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": {"name": "web-a", "namespace": "prod"},
            "spec": {"volumes": [
                {"secret": {"secretName": "db-creds"}},
                {"secret": {"secretName": "gone"}}
            ]}
        }))
        .unwrap();
        let steps = [TraversalStep::Forward {
            from: pods(),
            to: secrets,
            connection: ConnectionSpec::MatchName {
                name_path: "spec.volumes[].secret.secretName".into(),
            },
        }];
        assert_eq!(keys(&walker.walk(&root, &steps).unwrap()), vec!["prod/db-creds"]);
    }

    fn cluster(name: &str) -> Object {
        Object::new(&TypeDescriptor::new("example.com/v1", "Cluster"), None, name)
    }

    fn clusters() -> ResourceHandle {
        ResourceHandle::new("example.com", "v1", "clusters").cluster_scoped()
    }

    #[test]
    fn test_cluster_scoped_root_reaches_namespaced_objects() {
        let secrets = ResourceHandle::new("", "v1", "secrets");
        let mut store = store();
        store.insert(clusters(), cluster("c1"));
        let mut kubeconfig: Object = serde_json::from_value(json!({
            "apiVersion": "v1",
            "kind": "Secret",
            "metadata": {
                "name": "kubeconfig",
                "namespace": "prod",
                "ownerReferences": [
                    {"apiVersion": "example.com/v1", "kind": "Cluster", "name": "c1"}
                ]
            }
        }))
        .unwrap();
        store.insert(secrets.clone(), kubeconfig.clone());
        kubeconfig.metadata.name = "unrelated".into();
        kubeconfig.metadata.owner_references.clear();
        store.insert(secrets.clone(), kubeconfig);
        let walker = StoreWalker::new(&store);

        let owned = [TraversalStep::Reverse {
            from: clusters(),
            to: secrets.clone(),
            connection: owned_by(),
        }];
        assert_eq!(
            keys(&walker.walk(&cluster("c1"), &owned).unwrap()),
            vec!["prod/kubeconfig"]
        );

        let mut root = cluster("c2");
        root.fields.insert(
            "spec".into(),
            json!({"credentials": {"secretName": "kubeconfig"}}),
        );
        let named = [TraversalStep::Forward {
            from: clusters(),
            to: secrets,
            connection: ConnectionSpec::MatchName {
                name_path: "spec.credentials.secretName".into(),
            },
        }];
        assert_eq!(keys(&walker.walk(&root, &named).unwrap()), vec!["prod/kubeconfig"]);

        let mut selecting = cluster("c3");
        selecting
            .fields
            .insert("spec".into(), json!({"selector": {"app": "db"}}));
        let selected = [TraversalStep::Forward {
            from: clusters(),
            to: pods(),
            connection: select_pods(),
        }];
        assert_eq!(keys(&walker.walk(&selecting, &selected).unwrap()), vec!["prod/db-a"]);
    }

    #[test]
    fn test_namespaced_object_reaches_cluster_scoped_owner() {
        let mut store = store();
        store.insert(clusters(), cluster("c1"));
        let walker = StoreWalker::new(&store);
        let mut secret = Object::new(&TypeDescriptor::new("v1", "Secret"), Some("prod"), "kc");
        secret.metadata.owner_references.push(OwnerReference {
            api_version: "example.com/v1".into(),
            kind: "Cluster".into(),
            name: "c1".into(),
            uid: String::new(),
            controller: false,
        });
        let steps = [TraversalStep::Forward {
            from: ResourceHandle::new("", "v1", "secrets"),
            to: clusters(),
            connection: owned_by(),
        }];
        assert_eq!(keys(&walker.walk(&secret, &steps).unwrap()), vec!["c1"]);
    }

    #[test]
    fn test_multi_hop_dedups_and_stops_when_empty() {
        let store = store();
        let walker = StoreWalker::new(&store);

        // Both web pods reach the same service exactly once.
        let svc = service("web-svc", "web");
        let round_trip = [
            TraversalStep::Forward {
                from: services(),
                to: pods(),
                connection: select_pods(),
            },
            TraversalStep::Reverse {
                from: pods(),
                to: services(),
                connection: select_pods(),
            },
        ];
        assert_eq!(keys(&walker.walk(&svc, &round_trip).unwrap()), vec!["prod/web-svc"]);

        // No replica set owns anything here, so the second hop finds nothing.
        let root = store.get(&deployments(), "prod", "web").unwrap();
        let dead_end = [
            TraversalStep::Reverse {
                from: deployments(),
                to: replicasets(),
                connection: owned_by(),
            },
            TraversalStep::Reverse {
                from: replicasets(),
                to: pods(),
                connection: owned_by(),
            },
        ];
        assert!(walker.walk(&root, &dead_end).unwrap().is_empty());
    }
}
