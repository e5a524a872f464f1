//! JSON reading, writing and offline validation of locator documents.

use crate::edge::EdgeCatalog;
use crate::error::LocateError;
use crate::locator::{ObjectLocator, ResolutionMode};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Check everything about a locator that does not need a store or a kind mapping:
/// catalog validity, root criterion, selector syntax, and path membership.
pub fn validate(locator: &ObjectLocator) -> Result<(), LocateError> {
    let catalog = EdgeCatalog::build(&locator.edges)?;
    match locator.start.mode() {
        Some(ResolutionMode::BySelector(selector)) => {
            selector.to_selector()?;
        }
        Some(ResolutionMode::ByName(_)) => {}
        None => return Err(LocateError::MissingRootCriterion),
    }
    if let Some(missing) = locator.path.iter().find(|name| !catalog.contains(name)) {
        return Err(LocateError::PathEdgeNotFound(missing.clone()));
    }
    Ok(())
}

/// Serialize a locator to a pretty-printed JSON string.
pub fn to_json(locator: &ObjectLocator) -> Result<String> {
    serde_json::to_string_pretty(locator).context("failed to serialize locator to JSON")
}

/// Deserialize a locator from a JSON string.
pub fn from_json(json: &str) -> Result<ObjectLocator> {
    serde_json::from_str(json).context("failed to deserialize locator from JSON")
}

/// Read a locator document from disk.
pub fn load(path: &Path) -> Result<ObjectLocator> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read locator from {}", path.display()))?;
    from_json(&json)
}
