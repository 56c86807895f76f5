use indexmap::IndexMap;
use tracing::trace;

use super::{compare_impl, Mismatch, Path};
use crate::Node;

pub(super) fn compare_objects(
    expected_node: &Node,
    expected: &IndexMap<String, Node>,
    actual_node: &Node,
    actual: &IndexMap<String, Node>,
    path: &Path,
) -> Result<(), Mismatch> {
    trace!(%path, keys = expected.len(), "comparing objects");

    // Equal counts plus every expected key present rules out extra actual keys.
    if expected.len() != actual.len() {
        return Err(Mismatch::KeyCount {
            path: path.clone(),
            expected_len: expected.len(),
            actual_len: actual.len(),
            expected: expected_node.to_pretty_string(),
            actual: actual_node.to_pretty_string(),
        });
    }

    for (key, value) in expected {
        let Some(other) = actual.get(key) else {
            return Err(Mismatch::MissingKey {
                path: path.key(key.as_str()),
                key: key.clone(),
                expected: expected_node.to_pretty_string(),
                actual: actual_node.to_pretty_string(),
            });
        };
        compare_impl(value, other, &path.key(key.as_str()))?;
    }

    Ok(())
}
