//! Benchmark corpora for the `docassert` semantic comparator.
//!
//! Each corpus synthesizes a pair of documents: an expected tree and an
//! actual tree that is either identical (full traversal) or diverges at its
//! very last leaf (worst case for the first-mismatch walk).
//!
//! # Examples
//!
//! ```
//! let corpus = docassert_benches::available_corpora()
//!     .iter()
//!     .find(|c| c.name() == "booking-list")
//!     .expect("registered corpus");
//! let dataset = corpus.load().expect("corpus builds");
//! assert!(dataset.compare().is_err());
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use docassert_core::{compare, Mismatch, Node, ParseError};
use serde_json::{json, Value as JsonValue};

/// A named, reproducible pair of documents.
#[derive(Clone, Copy, Debug)]
pub struct Corpus {
    name: &'static str,
    items: usize,
    diverge: bool,
}

const CORPORA: [Corpus; 4] = [
    Corpus { name: "booking-list", items: 200, diverge: true },
    Corpus { name: "booking-list-equal", items: 200, diverge: false },
    Corpus { name: "availability-grid", items: 2_000, diverge: true },
    Corpus { name: "availability-grid-equal", items: 2_000, diverge: false },
];

/// Returns every registered corpus.
#[must_use]
pub fn available_corpora() -> &'static [Corpus] {
    &CORPORA
}

impl Corpus {
    /// Returns the corpus identifier used in benchmark ids.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Indicates whether the actual document differs from the expected one.
    #[must_use]
    pub fn diverges(&self) -> bool {
        self.diverge
    }

    /// Builds both documents and parses them into trees.
    pub fn load(&self) -> Result<Dataset, ParseError> {
        let expected = self.document(false);
        let actual = self.document(self.diverge);
        let expected_text = expected.to_string();
        Ok(Dataset {
            expected: Node::from_json_str(&expected_text)?,
            actual: Node::try_from(actual)?,
            expected_bytes: expected_text.len(),
        })
    }

    fn document(&self, mutate_last: bool) -> JsonValue {
        let items: Vec<JsonValue> = (0..self.items)
            .map(|i| {
                let last = mutate_last && i + 1 == self.items;
                let single_available = if last { i % 2 != 0 } else { i % 2 == 0 };
                json!({
                    "id": i,
                    "code": format!("H{i:05}"),
                    "price": { "amount": (i as f64) * 1.25, "currency": "EUR" },
                    "rooms": [
                        { "type": "DBL", "beds": 2, "available": i % 3 != 0 },
                        { "type": "SGL", "beds": 1, "available": single_available },
                    ],
                    "tags": ["pool", "wifi", null],
                })
            })
            .collect();
        json!({ "corpus": self.name, "items": items })
    }
}

/// Parsed documents of a [`Corpus`].
#[derive(Clone, Debug)]
pub struct Dataset {
    expected: Node,
    actual: Node,
    expected_bytes: usize,
}

impl Dataset {
    /// Runs the semantic comparator over the pair.
    pub fn compare(&self) -> Result<(), Mismatch> {
        compare(&self.expected, &self.actual)
    }

    /// Returns the expected tree.
    #[must_use]
    pub fn expected(&self) -> &Node {
        &self.expected
    }

    /// Returns the actual tree.
    #[must_use]
    pub fn actual(&self) -> &Node {
        &self.actual
    }

    /// Size of the compact expected document in bytes.
    #[must_use]
    pub fn expected_bytes(&self) -> usize {
        self.expected_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpora_verdicts_match_their_flag() {
        for corpus in available_corpora() {
            let dataset = corpus.load().unwrap();
            assert_eq!(dataset.compare().is_err(), corpus.diverges(), "{}", corpus.name());
        }
    }

    #[test]
    fn equal_corpora_build_identical_trees() {
        for corpus in available_corpora() {
            let dataset = corpus.load().unwrap();
            let identical = dataset.expected() == dataset.actual();
            assert_eq!(identical, !corpus.diverges(), "{}", corpus.name());
        }
    }

    #[test]
    fn divergence_sits_at_the_last_item() {
        let dataset = available_corpora()[0].load().unwrap();
        let mismatch = dataset.compare().unwrap_err();
        assert_eq!(mismatch.path().to_string(), "items[199].rooms[1].available");
    }
}
