//! Reduce a candidate set to exactly one object.
//!
//! Shared by root lookup-by-selector and by the final traversal result so the
//! found / not found / ambiguous policy lives in one place.

use locator_core::error::LocateError;
use locator_core::kind::ResourceHandle;
use locator_core::object::Object;

/// Zero candidates is `NotFound`, more than one is `AmbiguousResult` carrying the
/// lexicographically sorted object keys, and a single candidate is returned.
pub fn reduce(mut objects: Vec<Object>, subject: &ResourceHandle) -> Result<Object, LocateError> {
    match objects.len() {
        0 => Err(LocateError::NotFound {
            resource: subject.clone(),
        }),
        1 => Ok(objects.remove(0)),
        _ => {
            let mut keys: Vec<String> = objects.iter().map(Object::key).collect();
            keys.sort();
            Err(LocateError::AmbiguousResult {
                resource: subject.clone(),
                keys,
            })
        }
    }
}
