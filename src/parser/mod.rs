//! Parser module — comment blocks in, tag fragments out.

pub mod blocks;
pub mod fragment;
pub mod tags;

use fragment::Fragment;
use std::path::Path;

/// Prop library used when nothing else is configured.
pub const DEFAULT_PROP_LIBRARY: &str = "react";

/// Options handed to every tag handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Library name recorded on each `@prop`
    pub prop_library: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            prop_library: DEFAULT_PROP_LIBRARY.to_string(),
        }
    }
}

/// Extract and parse every annotated block of one source file.
///
/// Blocks without a recognized tag are dropped.
pub fn parse_source(source: &str, file: Option<&Path>, options: &ParseOptions) -> Vec<Fragment> {
    let fragments: Vec<Fragment> = blocks::extract(source)
        .iter()
        .map(|block| fragment::parse_block(block, file, options))
        .filter(|fragment| !fragment.is_empty())
        .collect();

    tracing::debug!(
        file = %file.map(|f| f.display().to_string()).unwrap_or_default(),
        fragments = fragments.len(),
        "parsed source"
    );
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tags::TagKind;

    #[test]
    fn untagged_blocks_are_dropped() {
        let source = "/* eslint-disable */\n/**\n * @component Button\n */\n// just a note\nconst a = 1;\n";
        let fragments = parse_source(source, None, &ParseOptions::default());
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text(TagKind::Component), Some("Button"));
    }

    #[test]
    fn fragments_follow_source_order() {
        let source = "/** @component A */\nx();\n/** @component B */\n";
        let fragments = parse_source(source, None, &ParseOptions::default());
        let names: Vec<_> = fragments.iter().filter_map(|f| f.text(TagKind::Component)).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn inline_prop_comment_keeps_next_block_intact() {
        let source = "/** @component A */\n/** @prop Label */ label: PropTypes.string,\n/**\n * @component B\n */\n";
        let fragments = parse_source(source, None, &ParseOptions::default());
        assert_eq!(fragments.len(), 3);
        let prop = fragments[1].props().next().unwrap();
        assert_eq!((prop.name.as_str(), prop.ty.as_str()), ("label", "string"));
        assert_eq!(prop.description, "Label");
        assert_eq!(fragments[2].text(TagKind::Component), Some("B"));
        assert_eq!((fragments[2].start_line, fragments[2].end_line), (3, 5));
    }
}
