//! Round-trip properties of diff construction and application.

use proptest::prelude::*;

use redraft_core::Difference;
use redraft_diff::{build_line_diff, DiffOptions};

/// Small documents built from a tiny line alphabet so generated pairs share
/// plenty of common lines, mixed terminators included.
fn document() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        Just("alpha"),
        Just("beta"),
        Just("gamma"),
        Just("delta"),
        Just(""),
    ];
    let terminator = prop_oneof![Just("\n"), Just("\r\n"), Just("\r")];
    (
        proptest::collection::vec(line, 0..10),
        terminator,
        proptest::bool::ANY,
    )
        .prop_map(|(lines, term, trailing)| {
            let mut text = lines.join(term);
            if trailing && !text.is_empty() {
                text.push_str(term);
            }
            text
        })
}

fn build(original: &str, updated: &str) -> Difference {
    let diff = Difference::new("doc.txt");
    build_line_diff(&diff, original, updated, &DiffOptions::default())
        .expect("diff construction failed");
    diff
}

proptest! {
    #[test]
    fn accept_all_reproduces_updated(original in document(), updated in document()) {
        let diff = build(&original, &updated);
        diff.accept_all();
        prop_assert_eq!(diff.apply(&original).unwrap(), updated);
    }

    #[test]
    fn reject_all_reproduces_original(original in document(), updated in document()) {
        let diff = build(&original, &updated);
        diff.discard_all();
        prop_assert_eq!(diff.apply(&original).unwrap(), original.clone());
    }

    #[test]
    fn identity_diff_is_empty(text in document()) {
        let diff = build(&text, &text);
        prop_assert_eq!(diff.total_changes(), 0);
    }

    #[test]
    fn apply_is_idempotent_against_original(original in document(), updated in document()) {
        let diff = build(&original, &updated);
        diff.accept_all();
        let once = diff.apply(&original).unwrap();
        let twice = diff.apply(&original).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn built_changes_always_validate(original in document(), updated in document()) {
        let diff = build(&original, &updated);
        prop_assert!(diff.validate_against(&original).is_ok());
    }
}
