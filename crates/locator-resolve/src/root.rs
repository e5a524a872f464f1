//! Resolve the starting object of a locator.

use crate::disambiguate::reduce;
use crate::template::expand_name_template;
use locator_core::access::{KindResolver, ObjectStore};
use locator_core::error::LocateError;
use locator_core::locator::{ResolutionMode, RootSelection, Scope};
use locator_core::object::Object;

/// Resolve `root` to exactly one object in the scope's namespace.
///
/// By selector, the listing goes through [`reduce`]; by name, a point lookup is
/// made and its failure (not-found included) propagates as a store error.
pub fn resolve_root(
    root: &RootSelection,
    scope: &Scope,
    kinds: &dyn KindResolver,
    store: &dyn ObjectStore,
) -> Result<Object, LocateError> {
    let resource = kinds.resolve(&root.target)?;

    match root.mode() {
        Some(ResolutionMode::BySelector(selector)) => {
            let selector = selector.to_selector()?;
            tracing::debug!(
                "listing {} in {} with selector {}",
                resource,
                scope.namespace,
                selector
            );
            let objects = store.list(&resource, &scope.namespace, &selector)?;
            reduce(objects, &resource)
        }
        Some(ResolutionMode::ByName(template)) => {
            let name = expand_name_template(template, scope)?;
            tracing::debug!("fetching {} {}/{}", resource, scope.namespace, name);
            Ok(store.get(&resource, &scope.namespace, &name)?)
        }
        None => Err(LocateError::MissingRootCriterion),
    }
}
