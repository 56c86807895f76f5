use std::fs;
use std::path::Path;

use docassert_core::{compare, MismatchKind, Node};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Fixture {
    expected: String,
    actual: String,
    kind: Option<MismatchKind>,
    path: Option<String>,
}

fn load_fixture(path: &Path) -> Fixture {
    let data = fs::read_to_string(path).expect("fixture should be readable");
    serde_json::from_str(&data).expect("fixture should deserialize")
}

#[test]
fn semantic_golden_parity() {
    let fixtures_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/semantic");
    let mut entries: Vec<_> = fs::read_dir(&fixtures_root)
        .expect("fixtures directory must exist")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    entries.sort();

    assert!(
        !entries.is_empty(),
        "expected at least one fixture under tests/fixtures/semantic",
    );

    for path in entries {
        let fixture = load_fixture(&path);
        let expected = Node::from_json_str(&fixture.expected).expect("expected parses");
        let actual = Node::from_json_str(&fixture.actual).expect("actual parses");
        let result = compare(&expected, &actual);
        match (result, fixture.kind) {
            (Ok(()), None) => {}
            (Err(mismatch), Some(kind)) => {
                assert_eq!(mismatch.kind(), kind, "fixture {path:?}");
                let want = fixture.path.as_deref().unwrap_or_default();
                assert_eq!(mismatch.path().to_string(), want, "fixture {path:?}");
            }
            (result, kind) => panic!("fixture {path:?}: got {result:?}, wanted {kind:?}"),
        }
    }
}
