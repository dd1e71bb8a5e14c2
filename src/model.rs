//! Data model for extracted style-guide documentation — format-agnostic.
//!
//! The tree is `Category → Component → Section → Variation`, with a per-component
//! prop table grouped by UI library. Every collection is a `Vec` so iteration
//! always follows first-seen order.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Complete document tree built from every parsed source file.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocTree {
    pub categories: Vec<Category>,
}

impl DocTree {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn category_mut(&mut self, name: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.name == name)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub components: Vec<Component>,
}

impl Category {
    pub fn component(&self, key: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.component == key)
    }

    pub fn component_mut(&mut self, key: &str) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.component == key)
    }
}

/// A documented component. `component` is the identity key, `name` the display name.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub component: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "PropTable::is_empty")]
    pub props: PropTable,
}

impl Component {
    pub fn section(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.section == key)
    }

    pub fn section_mut(&mut self, key: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.section == key)
    }
}

/// A section of a component page, keyed by `section`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub section: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Belongs to the primary design-system library (exempt from content filtering)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub core: bool,
    #[serde(default, skip_serializing_if = "Examples::is_empty")]
    pub examples: Examples,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<Variation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Modifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<Modifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<Modifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidecode: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Prop>,
}

impl Section {
    pub fn variation(&self, key: &str) -> Option<&Variation> {
        self.variations.iter().find(|v| v.variation == key)
    }

    /// True when any example kind or named variation carries a non-blank example.
    pub fn has_examples(&self) -> bool {
        self.examples.has_content() || self.variations.iter().any(Variation::has_content)
    }
}

/// One example payload per variation kind.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Examples {
    /// From `@html` / `@markup`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core: Option<Example>,
    /// From `@js` / `@react`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub react: Option<Example>,
    /// From `@ts` / `@angular`, falling back to `@angularjs`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angular: Option<Example>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scss: Option<Example>,
}

impl Examples {
    pub fn is_empty(&self) -> bool {
        self.core.is_none() && self.react.is_none() && self.angular.is_none() && self.scss.is_none()
    }

    pub fn get(&self, kind: ExampleKind) -> Option<&Example> {
        match kind {
            ExampleKind::Core => self.core.as_ref(),
            ExampleKind::React => self.react.as_ref(),
            ExampleKind::Angular => self.angular.as_ref(),
            ExampleKind::Scss => self.scss.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, kind: ExampleKind) -> &mut Option<Example> {
        match kind {
            ExampleKind::Core => &mut self.core,
            ExampleKind::React => &mut self.react,
            ExampleKind::Angular => &mut self.angular,
            ExampleKind::Scss => &mut self.scss,
        }
    }

    pub fn has_content(&self) -> bool {
        ExampleKind::ALL
            .iter()
            .any(|kind| self.get(*kind).is_some_and(Example::has_content))
    }
}

/// The recognized variation kinds of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleKind {
    Core,
    React,
    Angular,
    Scss,
}

impl ExampleKind {
    pub const ALL: [ExampleKind; 4] = [
        ExampleKind::Core,
        ExampleKind::React,
        ExampleKind::Angular,
        ExampleKind::Scss,
    ];
}

/// A code example together with its entity-escaped form.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub example: String,
    pub escaped: String,
}

impl Example {
    pub fn new(example: impl Into<String>) -> Self {
        let example = example.into();
        let escaped = escape_markup(&example);
        Self { example, escaped }
    }

    pub fn has_content(&self) -> bool {
        !self.example.trim().is_empty()
    }
}

/// Escape `<` and `>` so markup renders as text.
pub fn escape_markup(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

/// A named sub-variant of a section.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    pub variation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<Example>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub js: Option<Example>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scss: Option<Example>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Modifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<Modifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<Modifier>,
}

impl Variation {
    pub fn has_content(&self) -> bool {
        [&self.html, &self.js, &self.scss]
            .into_iter()
            .flatten()
            .any(Example::has_content)
    }
}

/// Parsed `@state`, `@param` or `@variable` entry.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub name: String,
    /// Name with `.` and `:` turned into class-friendly words
    pub escaped: String,
    pub description: String,
}

/// Parsed `@prop` entry.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prop {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub required: bool,
    /// UI library the prop belongs to, e.g. "react"
    #[serde(default, skip_serializing)]
    pub library: String,
}

/// Props grouped by UI library, in first-seen order.
///
/// Serializes as a JSON object whose keys keep insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PropTable {
    libraries: Vec<(String, Vec<Prop>)>,
}

impl PropTable {
    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    pub fn get(&self, library: &str) -> Option<&[Prop]> {
        self.libraries
            .iter()
            .find(|(name, _)| name == library)
            .map(|(_, props)| props.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Prop])> {
        self.libraries
            .iter()
            .map(|(name, props)| (name.as_str(), props.as_slice()))
    }

    /// Add a prop to its library list unless one with the same name is already there.
    /// Returns whether the prop was added.
    pub fn insert(&mut self, prop: Prop) -> bool {
        let list = match self.libraries.iter().position(|(name, _)| *name == prop.library) {
            Some(idx) => &mut self.libraries[idx].1,
            None => {
                self.libraries.push((prop.library.clone(), Vec::new()));
                let last = self.libraries.len() - 1;
                &mut self.libraries[last].1
            }
        };
        if list.iter().any(|p| p.name == prop.name) {
            return false;
        }
        list.push(prop);
        true
    }

    /// Replace (or append) the whole list for one library.
    pub fn set_library(&mut self, library: &str, props: Vec<Prop>) {
        match self.libraries.iter_mut().find(|(name, _)| name == library) {
            Some((_, list)) => *list = props,
            None => self.libraries.push((library.to_string(), props)),
        }
    }
}

impl Serialize for PropTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.libraries.len()))?;
        for (library, props) in &self.libraries {
            map.serialize_entry(library, props)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PropTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropTableVisitor;

        impl<'de> Visitor<'de> for PropTableVisitor {
            type Value = PropTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of library name to prop list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<PropTable, A::Error> {
                let mut table = PropTable::default();
                while let Some((library, mut props)) = access.next_entry::<String, Vec<Prop>>()? {
                    for prop in &mut props {
                        prop.library.clone_from(&library);
                    }
                    table.set_library(&library, props);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(PropTableVisitor)
    }
}
