//! Tag vocabulary and handlers.
//!
//! Every recognized `@tag` maps to one [`TagKind`]; aliases collapse onto the
//! same kind (`@markup` → `Html`, `@react` → `Js`, `@angular` → `Ts`). Each kind
//! has one pure handler turning the tag's recovered content into a [`TagValue`].

use crate::model::{Example, Modifier, Prop};
use crate::parser::blocks::PROP_SEPARATOR;
use crate::parser::ParseOptions;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Type annotation in a prop declaration, e.g. `size: PropTypes.oneOf([...]),`
static RE_PROP_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PropTypes\.([^.].*[^,])").unwrap());

/// Every tag the parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Name,
    Description,
    Category,
    Component,
    Section,
    Variation,
    Hidecode,
    Html,
    Js,
    Ts,
    AngularJs,
    Scss,
    State,
    Param,
    Variable,
    Prop,
}

/// Handler signature shared by every tag kind.
pub type Handler = fn(&TagContext) -> TagValue;

impl TagKind {
    pub const ALL: [TagKind; 16] = [
        TagKind::Name,
        TagKind::Description,
        TagKind::Category,
        TagKind::Component,
        TagKind::Section,
        TagKind::Variation,
        TagKind::Hidecode,
        TagKind::Html,
        TagKind::Js,
        TagKind::Ts,
        TagKind::AngularJs,
        TagKind::Scss,
        TagKind::State,
        TagKind::Param,
        TagKind::Variable,
        TagKind::Prop,
    ];

    /// Look up a tag by the name written after `@`. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<TagKind> {
        let kind = match name {
            "name" => TagKind::Name,
            "description" => TagKind::Description,
            "category" => TagKind::Category,
            "component" => TagKind::Component,
            "section" => TagKind::Section,
            "variation" => TagKind::Variation,
            "hidecode" => TagKind::Hidecode,
            "html" | "markup" => TagKind::Html,
            "js" | "react" => TagKind::Js,
            "ts" | "angular" => TagKind::Ts,
            "angularjs" => TagKind::AngularJs,
            "scss" => TagKind::Scss,
            "state" => TagKind::State,
            "param" => TagKind::Param,
            "variable" => TagKind::Variable,
            "prop" => TagKind::Prop,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical tag name.
    pub fn as_str(self) -> &'static str {
        match self {
            TagKind::Name => "name",
            TagKind::Description => "description",
            TagKind::Category => "category",
            TagKind::Component => "component",
            TagKind::Section => "section",
            TagKind::Variation => "variation",
            TagKind::Hidecode => "hidecode",
            TagKind::Html => "html",
            TagKind::Js => "js",
            TagKind::Ts => "ts",
            TagKind::AngularJs => "angularjs",
            TagKind::Scss => "scss",
            TagKind::State => "state",
            TagKind::Param => "param",
            TagKind::Variable => "variable",
            TagKind::Prop => "prop",
        }
    }

    pub fn handler(self) -> Handler {
        match self {
            TagKind::Name
            | TagKind::Category
            | TagKind::Component
            | TagKind::Section
            | TagKind::Variation => parse_identifier,
            TagKind::Description | TagKind::Hidecode => parse_text,
            TagKind::Html | TagKind::Js | TagKind::Ts | TagKind::AngularJs | TagKind::Scss => {
                parse_example
            }
            TagKind::State | TagKind::Param => parse_modifier,
            TagKind::Variable => parse_variable,
            TagKind::Prop => parse_prop,
        }
    }

    pub fn parse(self, ctx: &TagContext) -> TagValue {
        (self.handler())(ctx)
    }
}

/// Parsed value of a single tag occurrence.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Text(String),
    Example(Example),
    Modifier(Modifier),
    Prop(Prop),
}

impl TagValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_example(&self) -> Option<&Example> {
        match self {
            TagValue::Example(example) => Some(example),
            _ => None,
        }
    }

    pub fn as_modifier(&self) -> Option<&Modifier> {
        match self {
            TagValue::Modifier(modifier) => Some(modifier),
            _ => None,
        }
    }

    pub fn as_prop(&self) -> Option<&Prop> {
        match self {
            TagValue::Prop(prop) => Some(prop),
            _ => None,
        }
    }
}

/// Everything a handler may look at.
#[derive(Debug)]
pub struct TagContext<'a> {
    /// Tag name as written, e.g. "react" for a `@react` tag
    pub name: &'a str,
    pub line: LineSpan,
    pub block: BlockSpan<'a>,
    pub file: Option<&'a Path>,
    pub options: &'a ParseOptions,
}

/// The tag's recovered content and its byte span inside the block text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSpan {
    pub contents: String,
    pub from: usize,
    pub to: usize,
}

/// The whole block text and its line span in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan<'a> {
    pub contents: &'a str,
    pub from: usize,
    pub to: usize,
}

// -- Handlers -----------------------------------------------------------------

/// Single-line value with whitespace runs squeezed.
fn parse_identifier(ctx: &TagContext) -> TagValue {
    TagValue::Text(squeeze(&ctx.line.contents))
}

/// Free text; line breaks are kept.
fn parse_text(ctx: &TagContext) -> TagValue {
    TagValue::Text(ctx.line.contents.trim().to_string())
}

fn parse_example(ctx: &TagContext) -> TagValue {
    TagValue::Example(Example::new(ctx.line.contents.trim_end()))
}

/// `@state .is-active - Active state`
fn parse_modifier(ctx: &TagContext) -> TagValue {
    let mut parts = ctx.line.contents.split(" - ");
    let name = parts.next().unwrap_or_default().trim();
    let description = parts.next().unwrap_or_default().trim();
    TagValue::Modifier(modifier(name, description))
}

/// `@variable $button-padding: Inner spacing`
fn parse_variable(ctx: &TagContext) -> TagValue {
    let (name, description) = ctx
        .line
        .contents
        .split_once(':')
        .unwrap_or((ctx.line.contents.as_str(), ""));
    TagValue::Modifier(modifier(name.trim(), description.trim()))
}

/// `@prop Description | default` followed by the captured declaration.
///
/// The first separated half carries the description and optional default,
/// the rest is the declaration `name: PropTypes.type,`. An unrecognized type
/// annotation leaves the type empty.
fn parse_prop(ctx: &TagContext) -> TagValue {
    let mut halves = ctx.line.contents.split(PROP_SEPARATOR);
    let head = halves.next().unwrap_or_default();
    let declaration: String = halves.map(str::trim).collect();

    let mut head_parts = head.split(" | ");
    let description = head_parts.next().unwrap_or_default().trim().to_string();
    let default = head_parts
        .next()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    let name = declaration
        .split(':')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    let ty = RE_PROP_TYPE
        .captures(&declaration)
        .map(|caps| caps[1].replace(".isRequired", "").trim().to_string())
        .unwrap_or_default();

    TagValue::Prop(Prop {
        name,
        ty,
        description,
        required: default.is_none(),
        default,
        library: ctx.options.prop_library.clone(),
    })
}

// -- Helpers ------------------------------------------------------------------

fn modifier(name: &str, description: &str) -> Modifier {
    Modifier {
        name: name.to_string(),
        escaped: name
            .replace('.', " ")
            .replace(':', " pseudo-class-")
            .trim()
            .to_string(),
        description: description.to_string(),
    }
}

/// Collapse every whitespace run into one space and trim.
fn squeeze(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
