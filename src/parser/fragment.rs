//! Tag splitting: one normalized comment block → one [`Fragment`].
//!
//! A block line is a tag line when the detector accepts it and, once its comment
//! markers are stripped, it starts with `@name`. The tag's content runs from the
//! marker to the next tag line (or the end of the block); continuation lines lose
//! their leading `*` so multi-line examples and descriptions survive intact.

use crate::model::{Example, Modifier, Prop};
use crate::parser::blocks::{normalize, CommentBlock};
use crate::parser::tags::{BlockSpan, LineSpan, TagContext, TagKind, TagValue};
use crate::parser::ParseOptions;
use std::path::Path;

/// Leading `*` markers further in than this are treated as content.
const MARKER_COLUMN_LIMIT: usize = 10;

/// Decides whether a block line may carry a tag.
pub type Detector = fn(&str) -> bool;

/// Default detector: the last `\n\n`-separated segment contains an `@`.
pub fn default_detector(line: &str) -> bool {
    line.rsplit("\n\n").next().is_some_and(|segment| segment.contains('@'))
}

/// Parsed tags of one block, in first-seen order.
///
/// Every tag keeps a list of values so repeated tags accumulate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    entries: Vec<(TagKind, Vec<TagValue>)>,
    pub start_line: usize,
    pub end_line: usize,
}

impl Fragment {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            entries: Vec::new(),
            start_line,
            end_line,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, kind: TagKind, value: TagValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((kind, vec![value])),
        }
    }

    /// Builder-style [`Fragment::push`] for text tags.
    pub fn with_text(mut self, kind: TagKind, text: &str) -> Self {
        self.push(kind, TagValue::Text(text.to_string()));
        self
    }

    pub fn kinds(&self) -> impl Iterator<Item = TagKind> + '_ {
        self.entries.iter().map(|(kind, _)| *kind)
    }

    pub fn has(&self, kind: TagKind) -> bool {
        self.entries.iter().any(|(k, _)| *k == kind)
    }

    pub fn values(&self, kind: TagKind) -> &[TagValue] {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, values)| values.as_slice())
            .unwrap_or_default()
    }

    /// First text value of a tag, if non-empty.
    pub fn text(&self, kind: TagKind) -> Option<&str> {
        self.values(kind)
            .iter()
            .find_map(TagValue::as_text)
            .filter(|text| !text.is_empty())
    }

    pub fn example(&self, kind: TagKind) -> Option<&Example> {
        self.values(kind).iter().find_map(TagValue::as_example)
    }

    pub fn modifiers(&self, kind: TagKind) -> Vec<Modifier> {
        self.values(kind)
            .iter()
            .filter_map(TagValue::as_modifier)
            .cloned()
            .collect()
    }

    pub fn props(&self) -> impl Iterator<Item = &Prop> {
        self.values(TagKind::Prop).iter().filter_map(TagValue::as_prop)
    }
}

/// Parse a block with the default detector.
pub fn parse_block(block: &CommentBlock, file: Option<&Path>, options: &ParseOptions) -> Fragment {
    parse_block_with(block, default_detector, file, options)
}

/// Parse a block, using `detector` to pick candidate tag lines.
pub fn parse_block_with(
    block: &CommentBlock,
    detector: Detector,
    file: Option<&Path>,
    options: &ParseOptions,
) -> Fragment {
    let text = compact(&block.text);
    let tag_lines = locate_tags(&text, detector);
    let mut fragment = Fragment::new(block.start_line, block.end_line);

    for (idx, (offset, name)) in tag_lines.iter().enumerate() {
        let Some(kind) = TagKind::from_name(name) else {
            tracing::trace!(tag = %name, line = block.start_line, "ignoring unregistered tag");
            continue;
        };

        let end = tag_lines
            .get(idx + 1)
            .map_or(text.len(), |(next, _)| *next);
        let contents = recover_contents(&text[*offset..end], name);

        let ctx = TagContext {
            name,
            line: LineSpan {
                contents,
                from: *offset,
                to: end,
            },
            block: BlockSpan {
                contents: &text,
                from: block.start_line,
                to: block.end_line,
            },
            file,
            options,
        };
        fragment.push(kind, kind.parse(&ctx));
    }

    fragment
}

/// Drop lines that hold nothing but comment markers or whitespace.
fn compact(text: &str) -> String {
    text.lines()
        .filter(|line| !normalize(line).is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Byte offset of each tag marker and the tag name, in block order.
fn locate_tags(text: &str, detector: Detector) -> Vec<(usize, &str)> {
    let mut found = Vec::new();
    let mut line_start = 0;
    for line in text.split('\n') {
        if detector(line) {
            let stripped = line.trim_start_matches(|c: char| c.is_whitespace() || c == '*');
            if let Some(rest) = stripped.strip_prefix('@') {
                let name_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
                if name_len > 0 {
                    let offset = line_start + (line.len() - stripped.len());
                    found.push((offset, &rest[..name_len]));
                }
            }
        }
        line_start += line.len() + 1;
    }
    found
}

/// Turn the raw span of one tag into its content.
///
/// Removes the `@name` marker, strips a leading `*` from continuation lines,
/// trims the first line and drops blank lines.
fn recover_contents(span: &str, name: &str) -> String {
    let marker = format!("@{name}");
    let span = span.replacen(&marker, "", 1);

    let mut lines = Vec::new();
    for (i, line) in span.split('\n').enumerate() {
        let mut line = strip_star(line);
        if i == 0 {
            line = line.trim();
        }
        if line.trim().is_empty() {
            continue;
        }
        lines.push(line);
    }
    lines.join("\n").trim_end().to_string()
}

fn strip_star(line: &str) -> &str {
    let rest = line.trim_start();
    let indent = line.len() - rest.len();
    match rest.strip_prefix('*') {
        Some(after) if indent < MARKER_COLUMN_LIMIT => after,
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(text: &str) -> CommentBlock {
        CommentBlock {
            text: text.to_string(),
            start_line: 1,
            end_line: 5,
        }
    }

    fn parse(text: &str) -> Fragment {
        parse_block(&block(text), None, &ParseOptions::default())
    }

    #[test]
    fn detector_looks_at_last_segment() {
        assert!(default_detector(" * @component Button"));
        assert!(!default_detector("@old\n\nno tag here"));
        assert!(!default_detector("plain text"));
    }

    #[test]
    fn simple_tags() {
        let fragment = parse("@component Button\n * @section default\n * @description A clickable thing");
        assert_eq!(fragment.text(TagKind::Component), Some("Button"));
        assert_eq!(fragment.text(TagKind::Section), Some("default"));
        assert_eq!(fragment.text(TagKind::Description), Some("A clickable thing"));
        assert_eq!(
            fragment.kinds().collect::<Vec<_>>(),
            vec![TagKind::Component, TagKind::Section, TagKind::Description]
        );
    }

    #[test]
    fn multi_line_description() {
        let fragment = parse("@description\n * First line\n * Second line\n *\n * @section x");
        assert_eq!(fragment.text(TagKind::Description), Some("First line\n Second line"));
    }

    #[test]
    fn multi_line_example_keeps_indentation() {
        let fragment = parse("@html\n *   <ul>\n *     <li>One</li>\n *   </ul>\n * @section list");
        let example = fragment.example(TagKind::Html).unwrap();
        assert_eq!(example.example, "   <ul>\n     <li>One</li>\n   </ul>");
        assert!(example.escaped.starts_with("   &lt;ul&gt;"));
    }

    #[test]
    fn repeated_tags_accumulate_in_order() {
        let fragment = parse("@section states\n * @state :hover - Hovered\n * @state .is-active - Pressed");
        let states = fragment.modifiers(TagKind::State);
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].name, ":hover");
        assert_eq!(states[1].name, ".is-active");
    }

    #[test]
    fn unknown_tags_are_ignored() {
        let fragment = parse("@author Someone\n * @component Card");
        assert_eq!(fragment.kinds().collect::<Vec<_>>(), vec![TagKind::Component]);
    }

    #[test]
    fn block_without_tags_is_empty() {
        assert!(parse("Just a regular comment.\n * Nothing to see").is_empty());
        assert!(parse("Mail me@example.com").is_empty());
    }

    #[test]
    fn alias_lands_on_canonical_kind() {
        let fragment = parse("@react <Button />");
        assert_eq!(fragment.example(TagKind::Js).unwrap().example, "<Button />");
    }

    #[test]
    fn prop_block_from_extractor() {
        let source = "/**\n * @prop Label text | 'OK'\n */\nlabel: PropTypes.string,\n";
        let blocks = crate::parser::blocks::extract(source);
        let fragment = parse_block(&blocks[0], None, &ParseOptions::default());
        let props: Vec<_> = fragment.props().collect();
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].name, "label");
        assert_eq!(props[0].ty, "string");
        assert_eq!(props[0].default.as_deref(), Some("'OK'"));
    }

    #[test]
    fn custom_detector_filters_lines() {
        fn never(_: &str) -> bool {
            false
        }
        let fragment = parse_block_with(&block("@component X"), never, None, &ParseOptions::default());
        assert!(fragment.is_empty());
    }

    #[test]
    fn fragment_keeps_block_span() {
        let fragment = parse("@component X");
        assert_eq!((fragment.start_line, fragment.end_line), (1, 5));
    }
}
