//! Name template expansion for by-name root resolution.

use locator_core::error::LocateError;
use locator_core::locator::Scope;

/// Expand a root name template into a literal object name.
///
/// Templates are taken literally for now; the scope is accepted so that
/// variable substitution can be added here without touching root resolution.
pub fn expand_name_template(template: &str, _scope: &Scope) -> Result<String, LocateError> {
    if template.trim().is_empty() {
        return Err(LocateError::MissingRootCriterion);
    }
    Ok(template.to_string())
}
