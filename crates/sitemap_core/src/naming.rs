//! Output file naming.
//!
//! Files are created under provisional names while the session runs, because
//! the total count is only known at close:
//!
//! ```text
//! creation index   provisional     final (total = N > 1)
//! 0                b.xml           b-N.xml
//! 1                b-1.xml         b-1.xml
//! k                b-k.xml         b-k.xml
//! ```
//!
//! With a single file the provisional and final name coincide (`b.xml`).
//! When N > 1 the freed base name is taken by the sitemap index.

use crate::envelope::EXTENSION;

/// Returns `{base}.xml` or `{base}-{suffix}.xml`.
#[must_use]
pub fn file_name(base: &str, suffix: Option<usize>) -> String {
    match suffix {
        Some(n) => format!("{base}-{n}.{EXTENSION}"),
        None => format!("{base}.{EXTENSION}"),
    }
}

/// Name a file receives when it is created during the session.
#[must_use]
pub fn provisional_name(base: &str, creation_index: usize) -> String {
    file_name(base, (creation_index > 0).then_some(creation_index))
}

/// Name a file ends up with once `total` files have been produced.
///
/// The first-created file moves to the last suffix slot; every file created
/// by rollover keeps its suffix.
#[must_use]
pub fn final_name(base: &str, creation_index: usize, total: usize) -> String {
    debug_assert!(creation_index < total);
    match (creation_index, total) {
        (_, 1) => file_name(base, None),
        (0, n) => file_name(base, Some(n)),
        (k, _) => file_name(base, Some(k)),
    }
}

/// Renames needed to go from provisional to final names, in a safe order.
///
/// Every target is computed before any rename is performed. The only
/// target that differs from its provisional name is `{base}-N.xml`, which
/// rollover never produces, so applying the plan in order cannot overwrite
/// another file of the session.
#[must_use]
pub fn rename_plan(base: &str, total: usize) -> Vec<(String, String)> {
    (0..total)
        .map(|i| (provisional_name(base, i), final_name(base, i, total)))
        .filter(|(from, to)| from != to)
        .collect()
}

/// Recognizes a name produced for `base`.
///
/// Returns `Some(None)` for `{base}.xml`, `Some(Some(n))` for
/// `{base}-{n}.xml`, and `None` for anything else.
#[must_use]
pub fn parse_name(base: &str, name: &str) -> Option<Option<usize>> {
    let stem = name
        .strip_prefix(base)?
        .strip_suffix(EXTENSION)?
        .strip_suffix('.')?;
    if stem.is_empty() {
        return Some(None);
    }
    let digits = stem.strip_prefix('-')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    #[test]
    fn names_with_and_without_suffix() {
        assert_eq!(file_name("a", None), "a.xml");
        assert_eq!(file_name("a", Some(3)), "a-3.xml");
    }

    #[test]
    fn provisional_names_follow_creation_order() {
        assert_eq!(provisional_name("b", 0), "b.xml");
        assert_eq!(provisional_name("b", 1), "b-1.xml");
        assert_eq!(provisional_name("b", 2), "b-2.xml");
    }

    #[test]
    fn single_file_keeps_base_name() {
        assert_eq!(final_name("a", 0, 1), "a.xml");
        assert!(rename_plan("a", 1).is_empty());
    }

    #[test]
    fn first_file_moves_to_last_slot() {
        assert_eq!(final_name("b", 0, 2), "b-2.xml");
        assert_eq!(final_name("b", 1, 2), "b-1.xml");
        assert_eq!(
            rename_plan("b", 2),
            vec![("b.xml".to_string(), "b-2.xml".to_string())]
        );
    }

    #[test]
    fn empty_session_needs_no_renames() {
        assert!(rename_plan("b", 0).is_empty());
    }

    #[test]
    fn parse_name_recognizes_session_files() {
        assert_eq!(parse_name("b", "b.xml"), Some(None));
        assert_eq!(parse_name("b", "b-1.xml"), Some(Some(1)));
        assert_eq!(parse_name("b", "b-12.xml"), Some(Some(12)));

        assert_eq!(parse_name("b", "a.xml"), None);
        assert_eq!(parse_name("b", "bb.xml"), None);
        assert_eq!(parse_name("b", "b-.xml"), None);
        assert_eq!(parse_name("b", "b-x.xml"), None);
        assert_eq!(parse_name("b", "b-1.xml.gz"), None);
        assert_eq!(parse_name("b", "b-+1.xml"), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn final_names_are_a_suffix_permutation(total in 2usize..200) {
            let names: BTreeSet<String> =
                (0..total).map(|i| final_name("s", i, total)).collect();
            let expected: BTreeSet<String> =
                (1..=total).map(|n| file_name("s", Some(n))).collect();
            prop_assert_eq!(names, expected);
        }

        #[test]
        fn rename_targets_never_collide_with_provisional_names(total in 2usize..200) {
            let provisional: BTreeSet<String> =
                (0..total).map(|i| provisional_name("s", i)).collect();
            for (_, to) in rename_plan("s", total) {
                prop_assert!(!provisional.contains(&to));
            }
        }

        #[test]
        fn parse_name_inverts_file_name(suffix in proptest::option::of(1usize..10_000)) {
            prop_assert_eq!(parse_name("site", &file_name("site", suffix)), Some(suffix));
        }
    }
}
