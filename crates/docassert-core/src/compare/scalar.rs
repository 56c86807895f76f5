use super::{Mismatch, Path};
use crate::Node;

/// Compares two non-container nodes of the same kind.
pub(super) fn compare_scalars(expected: &Node, actual: &Node, path: &Path) -> Result<(), Mismatch> {
    if expected == actual {
        return Ok(());
    }
    Err(Mismatch::Value {
        path: path.clone(),
        expected: expected.to_compact_string(),
        actual: actual.to_compact_string(),
    })
}
