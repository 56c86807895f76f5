use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Path;
use crate::NodeKind;

/// Category of a [`Mismatch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    /// The nodes have different logical types.
    TypeMismatch,
    /// Two objects have a different number of keys.
    KeyCountMismatch,
    /// An expected key is absent from the actual object.
    MissingKey,
    /// Two arrays have different lengths.
    ArrayLengthMismatch,
    /// Two scalars differ.
    ValueMismatch,
}

/// The first divergence found between an expected and an actual document.
///
/// The `Display` output is the diagnostic text meant for a test failure
/// log. Snapshots are pretty-printed JSON of the sub-documents at the point
/// of divergence.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Mismatch {
    /// The nodes have different logical types.
    #[error("Token of path '{path}' of type {expected} is different from '{path}' of type {actual}")]
    Type {
        /// Location of both nodes.
        path: Path,
        /// Kind of the expected node.
        expected: NodeKind,
        /// Kind of the actual node.
        actual: NodeKind,
    },
    /// Two objects have a different number of keys.
    #[error(
        "Objects for path '{path}' are different (expected {expected_len} keys, actual {actual_len} keys).\nExpected:\n{expected}\nActual:\n{actual}"
    )]
    KeyCount {
        /// Location of both objects.
        path: Path,
        /// Key count of the expected object.
        expected_len: usize,
        /// Key count of the actual object.
        actual_len: usize,
        /// Rendered expected object.
        expected: String,
        /// Rendered actual object.
        actual: String,
    },
    /// An expected key is absent from the actual object.
    #[error("Property: '{path}' is missing in actual object\nExpected:\n{expected}\nActual:\n{actual}")]
    MissingKey {
        /// Location of the missing property, including the key.
        path: Path,
        /// The missing key.
        key: String,
        /// Rendered expected object.
        expected: String,
        /// Rendered actual object.
        actual: String,
    },
    /// Two arrays have different lengths.
    #[error(
        "Arrays for path '{path}' have different length (expected {expected_len}, actual {actual_len}).\nExpected:\n{expected}\nActual:\n{actual}"
    )]
    ArrayLength {
        /// Location of both arrays.
        path: Path,
        /// Length of the expected array.
        expected_len: usize,
        /// Length of the actual array.
        actual_len: usize,
        /// Rendered expected array.
        expected: String,
        /// Rendered actual array.
        actual: String,
    },
    /// Two scalars differ.
    #[error("Values for path '{path}' are different.\nExpected: {expected}\nActual: {actual}")]
    Value {
        /// Location of both scalars.
        path: Path,
        /// Rendered expected value.
        expected: String,
        /// Rendered actual value.
        actual: String,
    },
}

impl Mismatch {
    /// Returns the category of the mismatch.
    #[must_use]
    pub fn kind(&self) -> MismatchKind {
        match self {
            Self::Type { .. } => MismatchKind::TypeMismatch,
            Self::KeyCount { .. } => MismatchKind::KeyCountMismatch,
            Self::MissingKey { .. } => MismatchKind::MissingKey,
            Self::ArrayLength { .. } => MismatchKind::ArrayLengthMismatch,
            Self::Value { .. } => MismatchKind::ValueMismatch,
        }
    }

    /// Returns the location of the divergence.
    ///
    /// For [`Mismatch::MissingKey`] this is the path of the missing property.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Type { path, .. }
            | Self::KeyCount { path, .. }
            | Self::MissingKey { path, .. }
            | Self::ArrayLength { path, .. }
            | Self::Value { path, .. } => path,
        }
    }
}
