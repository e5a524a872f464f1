//! Relationship-path object location.
//!
//! Resolves a root object ([`root`]), compiles a named edge path into oriented
//! traversal steps ([`plan`]), hands the plan to a graph walker, and reduces the
//! candidates to exactly one object ([`disambiguate`]). [`locate`] composes the
//! pieces into a single call.

pub mod disambiguate;
pub mod locate;
pub mod plan;
pub mod root;
pub mod template;

pub use disambiguate::reduce;
pub use locate::locate;
pub use plan::{TraversalPlan, compile_plan};
pub use root::resolve_root;
pub use template::expand_name_template;
