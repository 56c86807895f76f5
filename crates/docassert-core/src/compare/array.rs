use tracing::trace;

use super::{compare_impl, Mismatch, Path};
use crate::Node;

pub(super) fn compare_arrays(
    expected_node: &Node,
    expected: &[Node],
    actual_node: &Node,
    actual: &[Node],
    path: &Path,
) -> Result<(), Mismatch> {
    trace!(%path, len = expected.len(), "comparing arrays");

    if expected.len() != actual.len() {
        return Err(Mismatch::ArrayLength {
            path: path.clone(),
            expected_len: expected.len(),
            actual_len: actual.len(),
            expected: expected_node.to_pretty_string(),
            actual: actual_node.to_pretty_string(),
        });
    }

    for (index, (left, right)) in expected.iter().zip(actual).enumerate() {
        compare_impl(left, right, &path.index(index))?;
    }

    Ok(())
}
