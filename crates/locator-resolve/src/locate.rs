//! End-to-end object location: catalog → plan → root → walk → one object.

use crate::disambiguate::reduce;
use crate::plan::compile_plan;
use crate::root::resolve_root;
use locator_core::access::Collaborators;
use locator_core::edge::EdgeCatalog;
use locator_core::error::LocateError;
use locator_core::locator::{ObjectLocator, Scope};
use locator_core::object::Object;

/// Resolve `locator` to exactly one object.
///
/// The plan is compiled from the root's declared target kind before the store
/// is touched, so a malformed path fails without any list or get call. An empty
/// path returns the root object without invoking the walker. Errors are returned
/// as soon as they occur; nothing is retried.
pub fn locate(
    locator: &ObjectLocator,
    scope: &Scope,
    collab: Collaborators<'_>,
) -> Result<Object, LocateError> {
    let catalog = EdgeCatalog::build(&locator.edges)?;
    let plan = compile_plan(&locator.path, &catalog, &locator.start.target, collab.kinds)?;
    tracing::debug!(
        "compiled {} step(s) from {} to {}",
        plan.steps.len(),
        locator.start.target,
        plan.end
    );

    let root = resolve_root(&locator.start, scope, collab.kinds, collab.store)?;
    tracing::debug!("root resolved to {} {}", root.kind, root.key());

    let Some(last) = plan.steps.last() else {
        return Ok(root);
    };

    let candidates = collab.walker.walk(&root, &plan.steps)?;
    tracing::debug!("walk produced {} candidate(s)", candidates.len());

    let found = reduce(candidates, last.to())?;
    tracing::info!("located {} {} from {}", found.kind, found.key(), root.key());
    Ok(found)
}
