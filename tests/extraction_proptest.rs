//! Property tests for block normalization and the tree fold.

use proptest::prelude::*;
use styledoc::parser::blocks::{extract, normalize};
use styledoc::parser::fragment::Fragment;
use styledoc::parser::tags::TagKind;
use styledoc::tree::{build, BuildOptions};

/// Comment-ish text: stars, slashes, whitespace, tags and words.
fn block_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("*".to_string()),
            Just(" ".to_string()),
            Just("\n".to_string()),
            Just("\t".to_string()),
            Just("/".to_string()),
            Just("@section".to_string()),
            "[a-z]{1,6}",
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("a"), Just("b"), Just("c")].prop_map(str::to_string)
}

/// A fragment naming a component and optionally a section and variation.
fn fragment_strategy() -> impl Strategy<Value = Fragment> {
    (
        key_strategy(),
        prop::option::of(key_strategy()),
        prop::option::of(key_strategy()),
    )
        .prop_map(|(component, section, variation)| {
            let mut fragment = Fragment::new(1, 1).with_text(TagKind::Component, &component);
            if let Some(section) = section {
                fragment = fragment.with_text(TagKind::Section, &section);
            }
            if let Some(variation) = variation {
                fragment = fragment.with_text(TagKind::Variation, &variation);
            }
            fragment
        })
}

fn has_duplicates<'a>(keys: impl Iterator<Item = &'a str>) -> bool {
    let mut seen = std::collections::HashSet::new();
    keys.into_iter().any(|key| !seen.insert(key))
}

proptest! {
    #[test]
    fn normalize_is_idempotent(text in block_text_strategy()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn extracted_blocks_are_normalized(text in block_text_strategy()) {
        let source = format!("/**\n{text}\n */\ncode();\n");
        for block in extract(&source) {
            prop_assert_eq!(normalize(&block.text), block.text.clone());
            prop_assert!(block.start_line <= block.end_line);
        }
    }

    #[test]
    fn tree_identities_are_unique(fragments in prop::collection::vec(fragment_strategy(), 0..24)) {
        let tree = build([fragments.as_slice()], &BuildOptions::default());
        for category in &tree.categories {
            prop_assert!(!has_duplicates(category.components.iter().map(|c| c.component.as_str())));
            for component in &category.components {
                prop_assert!(!has_duplicates(component.sections.iter().map(|s| s.section.as_str())));
                for section in &component.sections {
                    prop_assert!(!has_duplicates(section.variations.iter().map(|v| v.variation.as_str())));
                }
            }
        }
    }
}
