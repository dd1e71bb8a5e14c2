//! Document tree builder — folds parsed fragments into `Category → Component → Section`.
//!
//! The fold is single-pass and order-sensitive:
//!
//! - the first fragment naming a component, section or variation creates it;
//!   later fragments never recreate or rewrite it
//! - a component-level fragment (component, no section) refreshes the
//!   component's `name` and `description`
//! - props are filed per library and deduplicated by name
//!
//! Fragments that carry props but no `@component` attach to the component most
//! recently established in the same file.

use crate::model::{Category, Component, DocTree, Examples, Prop, Section, Variation};
use crate::parser::fragment::Fragment;
use crate::parser::tags::TagKind;

/// Category used for components that do not declare one.
pub const DEFAULT_CATEGORY: &str = "components";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub default_category: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

/// Last component established in the current file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Cursor {
    category: String,
    component: String,
}

/// Fold accumulator: each step takes the builder by value and returns it.
#[derive(Debug, Default, Clone)]
pub struct TreeBuilder {
    tree: DocTree,
    cursor: Option<Cursor>,
    options: BuildOptions,
}

/// Build a tree from per-file fragment lists, in file order.
pub fn build<'a, I>(files: I, options: &BuildOptions) -> DocTree
where
    I: IntoIterator<Item = &'a [Fragment]>,
{
    files
        .into_iter()
        .fold(TreeBuilder::new(options.clone()), TreeBuilder::fold_file)
        .finish()
}

impl TreeBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            tree: DocTree::default(),
            cursor: None,
            options,
        }
    }

    /// Fold all fragments of one file, starting with a fresh cursor.
    pub fn fold_file(self, fragments: &[Fragment]) -> Self {
        let start = Self { cursor: None, ..self };
        fragments.iter().fold(start, Self::apply)
    }

    /// Apply one fragment.
    pub fn apply(mut self, fragment: &Fragment) -> Self {
        let Some(component_key) = fragment.text(TagKind::Component) else {
            self.attach_orphan_props(fragment);
            return self;
        };

        let category_name = fragment
            .text(TagKind::Category)
            .unwrap_or(&self.options.default_category)
            .to_string();

        let category = ensure_category(&mut self.tree, &category_name);
        let component = upsert_component(category, component_key, fragment);

        if let Some(section_key) = fragment.text(TagKind::Section) {
            if component.section(section_key).is_none() {
                component.sections.push(new_section(section_key, fragment));
            } else {
                tracing::trace!(
                    component = component_key,
                    section = section_key,
                    "section already documented; keeping first"
                );
            }

            if let Some(variation_key) = fragment.text(TagKind::Variation) {
                if let Some(section) = component.section_mut(section_key) {
                    if section.variation(variation_key).is_none() {
                        section.variations.push(new_variation(variation_key, fragment));
                    }
                }
            }
        } else if fragment.has(TagKind::Variation) {
            tracing::debug!(
                component = component_key,
                line = fragment.start_line,
                "variation without a section; ignoring"
            );
        }

        file_props(component, fragment);

        self.cursor = Some(Cursor {
            category: category_name,
            component: component_key.to_string(),
        });
        self
    }

    pub fn finish(self) -> DocTree {
        self.tree
    }

    fn attach_orphan_props(&mut self, fragment: &Fragment) {
        if !fragment.has(TagKind::Prop) {
            tracing::debug!(line = fragment.start_line, "fragment without a component; skipping");
            return;
        }
        let component = self.cursor.as_ref().and_then(|cursor| {
            self.tree
                .category_mut(&cursor.category)
                .and_then(|category| category.component_mut(&cursor.component))
        });
        match component {
            Some(component) => file_props(component, fragment),
            None => tracing::debug!(
                line = fragment.start_line,
                "prop declared before any component; ignoring"
            ),
        }
    }
}

// -- Helpers ------------------------------------------------------------------

fn ensure_category<'t>(tree: &'t mut DocTree, name: &str) -> &'t mut Category {
    let idx = match tree.categories.iter().position(|c| c.name == name) {
        Some(idx) => idx,
        None => {
            tree.categories.push(Category {
                name: name.to_string(),
                components: Vec::new(),
            });
            tree.categories.len() - 1
        }
    };
    &mut tree.categories[idx]
}

/// Create the component on first sighting; refresh name and description on a
/// later component-level fragment.
fn upsert_component<'c>(category: &'c mut Category, key: &str, fragment: &Fragment) -> &'c mut Component {
    let name = fragment.text(TagKind::Name);
    let description = fragment.text(TagKind::Description);

    let idx = match category.components.iter().position(|c| c.component == key) {
        Some(idx) => {
            if !fragment.has(TagKind::Section) {
                let existing = &mut category.components[idx];
                if let Some(name) = name {
                    existing.name = name.to_string();
                }
                if let Some(description) = description {
                    existing.description = description.to_string();
                }
            }
            idx
        }
        None => {
            category.components.push(Component {
                component: key.to_string(),
                name: name.unwrap_or_default().to_string(),
                description: description.unwrap_or_default().to_string(),
                ..Default::default()
            });
            category.components.len() - 1
        }
    };
    &mut category.components[idx]
}

fn new_section(key: &str, fragment: &Fragment) -> Section {
    Section {
        section: key.to_string(),
        name: fragment.text(TagKind::Name).unwrap_or_default().to_string(),
        description: fragment
            .text(TagKind::Description)
            .unwrap_or_default()
            .to_string(),
        core: false,
        examples: Examples {
            core: fragment.example(TagKind::Html).cloned(),
            react: fragment.example(TagKind::Js).cloned(),
            angular: fragment
                .example(TagKind::Ts)
                .or_else(|| fragment.example(TagKind::AngularJs))
                .cloned(),
            scss: fragment.example(TagKind::Scss).cloned(),
        },
        variations: Vec::new(),
        params: fragment.modifiers(TagKind::Param),
        states: fragment.modifiers(TagKind::State),
        variables: fragment.modifiers(TagKind::Variable),
        hidecode: fragment.text(TagKind::Hidecode).map(str::to_string),
        props: named_props(fragment).cloned().collect(),
    }
}

fn new_variation(key: &str, fragment: &Fragment) -> Variation {
    Variation {
        variation: key.to_string(),
        html: fragment.example(TagKind::Html).cloned(),
        js: fragment.example(TagKind::Js).cloned(),
        scss: fragment.example(TagKind::Scss).cloned(),
        params: fragment.modifiers(TagKind::Param),
        states: fragment.modifiers(TagKind::State),
        variables: fragment.modifiers(TagKind::Variable),
    }
}

fn file_props(component: &mut Component, fragment: &Fragment) {
    for prop in named_props(fragment) {
        if !component.props.insert(prop.clone()) {
            tracing::trace!(
                component = %component.component,
                prop = %prop.name,
                "duplicate prop; keeping first"
            );
        }
    }
}

/// Props with an identifier; a declaration that could not be read has none.
fn named_props(fragment: &Fragment) -> impl Iterator<Item = &Prop> {
    fragment.props().filter(|prop| !prop.name.is_empty())
}
