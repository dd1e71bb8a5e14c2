//! Comment block extraction — line-by-line state machine.
//!
//! Groups runs of comment lines into raw blocks. Besides `/* ... */` and `//`
//! comments it follows `@prop` declarations out of the comment and into the
//! code that follows, so the prop's type annotation ends up in the same block:
//!
//! ```text
//! /**
//!  * @prop Size of the button | 'md'
//!  */
//! size: PropTypes.oneOf([
//!   'sm', 'md', 'lg',
//! ]),
//! ```
//!
//! Every line captured outside the comment is followed by [`PROP_SEPARATOR`]
//! so the prop parser can tell the description half from the declaration half.

use regex::Regex;
use std::sync::LazyLock;

/// Separator written after each captured line of a prop declaration.
pub const PROP_SEPARATOR: &str = "split-here";

// -- Regex patterns -----------------------------------------------------------

static RE_LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*//").unwrap());

static RE_BLOCK_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*/\*").unwrap());

static RE_BLOCK_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*/").unwrap());

static RE_PROP_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@prop\b").unwrap());

static RE_BALANCED_PARENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.*?\)").unwrap());

static RE_LINE_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*//+").unwrap());

static RE_LEADING_STARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\s*]+").unwrap());

// -- Types --------------------------------------------------------------------

/// A raw comment block with its 1-based line span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    pub text: String,
    pub start_line: usize,
    pub end_line: usize,
}

/// Where a prop declaration is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropPhase {
    /// Waiting for the line with the terminating comma
    Open,
    /// Inside a parenthesized option list, waiting for the closing paren
    MultiOption,
}

/// Scanner state between two lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Outside,
    /// Inside a run of `//` lines
    LineComment,
    /// Inside `/* ... */`, possibly with a prop declaration pending
    BlockComment(Option<PropPhase>),
    /// In code after a `@prop` comment, collecting the declaration
    PropDeclaration(PropPhase),
}

impl ScanState {
    fn prop(self) -> Option<PropPhase> {
        match self {
            ScanState::BlockComment(prop) => prop,
            ScanState::PropDeclaration(phase) => Some(phase),
            ScanState::Outside | ScanState::LineComment => None,
        }
    }
}

/// Incremental block extractor; feed it lines in order.
#[derive(Debug, Default)]
pub struct BlockExtractor {
    state: ScanState,
    buffer: String,
    start_line: usize,
    line_no: usize,
    blocks: Vec<CommentBlock>,
}

// -- Public API ---------------------------------------------------------------

/// Extract all comment blocks from a source text.
pub fn extract(source: &str) -> Vec<CommentBlock> {
    let mut extractor = BlockExtractor::default();
    for line in source.lines() {
        extractor.push_line(line);
    }
    extractor.finish()
}

/// Strip the leading star/whitespace run and surrounding whitespace from a block.
///
/// Idempotent: the result never starts with whitespace or `*`.
pub fn normalize(text: &str) -> String {
    RE_LEADING_STARS.replace(text, "").trim().to_string()
}

impl BlockExtractor {
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Process the next line of the file.
    pub fn push_line(&mut self, line: &str) {
        self.line_no += 1;

        if let ScanState::PropDeclaration(phase) = self.state {
            if declaration_interrupted(line, phase) {
                tracing::trace!(line = self.line_no, "prop declaration cut short");
                self.flush(self.line_no - 1);
            }
        }

        let single = RE_LINE_COMMENT.is_match(line);
        let opens = RE_BLOCK_OPEN.is_match(line);
        let closes = !single && RE_BLOCK_CLOSE.is_match(line);

        let commented = opens || matches!(self.state, ScanState::BlockComment(_));
        let mut in_comment = commented;
        let mut prop = self.state.prop();

        if RE_PROP_TAG.is_match(line) && prop.is_none() {
            prop = Some(PropPhase::Open);
        }

        // 1. Collect the comment part; `code` is whatever lies outside a comment
        let code = if commented {
            let (comment, rest) = match line.split_once("*/") {
                Some((comment, rest)) if closes => (comment, Some(rest)),
                _ => (line, None),
            };
            self.append(&RE_BLOCK_OPEN.replace(comment, ""));
            in_comment = !closes;
            rest
        } else if single {
            self.append(&strip_line_marker(line));
            None
        } else {
            Some(line)
        };

        // 2. Advance the prop declaration on code only
        if let (Some(phase), Some(code)) = (prop, code.filter(|c| !c.trim().is_empty())) {
            if commented {
                self.push_separator();
            }
            self.append(code);
            prop = match phase {
                _ if opens_option_list(code) => Some(PropPhase::MultiOption),
                PropPhase::MultiOption if closes_option_list(code) => None,
                PropPhase::Open if code.contains(',') => None,
                phase => Some(phase),
            };
        }

        if !in_comment && prop.is_some() {
            self.push_separator();
        }

        self.state = match (in_comment, prop) {
            (true, prop) => ScanState::BlockComment(prop),
            (false, Some(phase)) => ScanState::PropDeclaration(phase),
            (false, None) if single => ScanState::LineComment,
            (false, None) => ScanState::Outside,
        };

        if self.state == ScanState::Outside {
            self.flush(self.line_no);
        }
    }

    /// Flush any block still open at end of input and return all blocks.
    pub fn finish(mut self) -> Vec<CommentBlock> {
        if self.state != ScanState::Outside {
            tracing::trace!(state = ?self.state, "flushing block left open at end of input");
            self.flush(self.line_no);
        }
        self.blocks
    }

    fn append(&mut self, text: &str) {
        if self.start_line == 0 {
            self.start_line = self.line_no;
        } else if !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
        self.buffer.push_str(text);
    }

    fn push_separator(&mut self) {
        self.buffer.push('\n');
        self.buffer.push_str(PROP_SEPARATOR);
        self.buffer.push('\n');
    }

    fn flush(&mut self, end_line: usize) {
        self.state = ScanState::Outside;
        let start_line = std::mem::take(&mut self.start_line);
        if self.buffer.is_empty() {
            return;
        }
        let text = normalize(&std::mem::take(&mut self.buffer));
        if text.is_empty() {
            return;
        }
        self.blocks.push(CommentBlock {
            text,
            start_line,
            end_line,
        });
    }
}

// -- Line classification ------------------------------------------------------

/// An open paren with no matching close on the same line.
fn opens_option_list(line: &str) -> bool {
    line.contains('(') && !RE_BALANCED_PARENS.is_match(line)
}

/// A close paren with no matching open on the same line.
fn closes_option_list(line: &str) -> bool {
    line.contains(')') && !RE_BALANCED_PARENS.is_match(line)
}

/// A new comment, or the closing brace of the enclosing object, ends a pending
/// declaration that never reached its comma.
fn declaration_interrupted(line: &str, phase: PropPhase) -> bool {
    RE_BLOCK_OPEN.is_match(line) || (phase == PropPhase::Open && line.trim_start().starts_with('}'))
}

fn strip_line_marker(line: &str) -> String {
    RE_LINE_MARKER.replace(line, "").to_string()
}
