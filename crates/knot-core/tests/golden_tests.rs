//! Golden corpus: every file in `tests/corpus/inputs/` is parsed; when a
//! matching file exists in `tests/corpus/expected/`, the canonical rendering
//! must match it byte for byte, and when it does not, the input must fail to
//! parse.

use std::fs;
use std::path::Path;

use knot_core::parse;

#[test]
fn corpus() {
    let corpus = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/corpus");
    let inputs = corpus.join("inputs");
    let mut checked = 0;
    let mut entries: Vec<_> = fs::read_dir(&inputs)
        .expect("corpus inputs dir")
        .map(|entry| entry.expect("corpus dir entry").path())
        .collect();
    entries.sort();
    for path in entries {
        let name = path.file_name().unwrap().to_str().unwrap();
        let input = fs::read_to_string(&path).expect("corpus input");
        let expected = corpus.join("expected").join(name);
        match fs::read_to_string(&expected) {
            Ok(expected) => {
                let doc = parse(&input).unwrap_or_else(|err| panic!("{name}: {err}"));
                assert_eq!(doc.to_text(), expected, "{name}: canonical mismatch");
            }
            Err(_) => {
                assert!(
                    parse(&input).is_err(),
                    "{name}: expected a parse error, but parsing succeeded"
                );
            }
        }
        checked += 1;
    }
    assert!(checked >= 10, "corpus looks incomplete ({checked} files)");
}
