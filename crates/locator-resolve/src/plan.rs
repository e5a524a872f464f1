//! Compile a named edge path into oriented traversal steps.

use locator_core::access::KindResolver;
use locator_core::edge::{EdgeCatalog, TraversalStep};
use locator_core::error::LocateError;
use locator_core::kind::TypeDescriptor;

/// Compiled path: the steps in path order and the kind the path ends at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalPlan {
    pub steps: Vec<TraversalStep>,
    pub end: TypeDescriptor,
}

impl TraversalPlan {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Orient each named edge relative to the cursor kind, starting at `start`.
///
/// An edge whose `src` is the cursor is walked forward and moves the cursor to
/// `dst`; an edge whose `dst` is the cursor is walked in reverse and moves it to
/// `src`. An edge touching neither endpoint breaks the path.
pub fn compile_plan(
    path: &[String],
    catalog: &EdgeCatalog,
    start: &TypeDescriptor,
    kinds: &dyn KindResolver,
) -> Result<TraversalPlan, LocateError> {
    let mut from = start.clone();
    let mut steps = Vec::with_capacity(path.len());

    for name in path {
        let decl = catalog
            .get(name)
            .ok_or_else(|| LocateError::PathEdgeNotFound(name.clone()))?;

        let src = kinds.resolve(&decl.src)?;
        let dst = kinds.resolve(&decl.dst)?;

        let step = if decl.src == from {
            from = decl.dst.clone();
            TraversalStep::Forward {
                from: src,
                to: dst,
                connection: decl.connection.clone(),
            }
        } else if decl.dst == from {
            from = decl.src.clone();
            TraversalStep::Reverse {
                from: dst,
                to: src,
                connection: decl.connection.clone(),
            }
        } else {
            return Err(LocateError::DisconnectedEdge {
                edge: name.clone(),
                from,
            });
        };

        tracing::debug!("edge {}: {}", name, step);
        steps.push(step);
    }

    Ok(TraversalPlan { steps, end: from })
}
