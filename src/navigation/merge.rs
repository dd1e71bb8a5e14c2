//! Template merge: overlay the extracted document tree onto the navigation template.
//!
//! The template decides what is shown and in which order; the document tree
//! supplies content. Entries are matched by exact key: (category, component),
//! then section. Template entries with no match pass through unchanged.

use super::{NavCategory, NavComponent, NavSection, Navigation};
use crate::model::{Component, DocTree, ExampleKind, Section};

/// Merge `doc` into a copy of `nav`.
///
/// Pure and idempotent: merging the same document twice gives the same result
/// as merging it once.
pub fn merge(nav: &Navigation, doc: &DocTree) -> Navigation {
    let categories = nav
        .categories
        .iter()
        .map(|category| merge_category(category, doc))
        .collect();
    Navigation { categories }
}

fn merge_category(nav: &NavCategory, doc: &DocTree) -> NavCategory {
    let doc_category = doc.category(&nav.category);
    let children = nav
        .children
        .iter()
        .map(|child| match doc_category.and_then(|c| c.component(&child.component)) {
            Some(component) => merge_component(child, component),
            None => {
                tracing::debug!(
                    category = %nav.category,
                    component = %child.component,
                    "no documentation for template entry"
                );
                child.clone()
            }
        })
        .collect();

    NavCategory {
        children,
        ..nav.clone()
    }
}

fn merge_component(nav: &NavComponent, doc: &Component) -> NavComponent {
    let mut merged = nav.clone();
    overlay_text(&mut merged.name, &doc.name);
    overlay_text(&mut merged.description, &doc.description);

    for (library, props) in doc.props.iter() {
        merged.props.set_library(library, props.to_vec());
    }

    merged.sections = Some(match &nav.sections {
        // Template lists sections: keep its selection and order
        Some(sections) => sections
            .iter()
            .map(|section| match doc.section(&section.section.section) {
                Some(doc_section) => merge_section(section, doc_section),
                None => section.clone(),
            })
            .collect(),
        None => doc.sections.iter().cloned().map(NavSection::from).collect(),
    });

    merged
}

/// Document values win where the document has them; `core` and any extra
/// template fields always come from the template.
fn merge_section(nav: &NavSection, doc: &Section) -> NavSection {
    let mut merged = nav.clone();
    let section = &mut merged.section;

    overlay_text(&mut section.name, &doc.name);
    overlay_text(&mut section.description, &doc.description);

    for kind in ExampleKind::ALL {
        if let Some(example) = doc.examples.get(kind) {
            *section.examples.slot_mut(kind) = Some(example.clone());
        }
    }

    for variation in &doc.variations {
        match section
            .variations
            .iter_mut()
            .find(|v| v.variation == variation.variation)
        {
            Some(existing) => *existing = variation.clone(),
            None => section.variations.push(variation.clone()),
        }
    }

    overlay_list(&mut section.params, &doc.params);
    overlay_list(&mut section.states, &doc.states);
    overlay_list(&mut section.variables, &doc.variables);
    overlay_list(&mut section.props, &doc.props);
    if doc.hidecode.is_some() {
        section.hidecode.clone_from(&doc.hidecode);
    }

    merged
}

fn overlay_text(target: &mut String, doc: &str) {
    if !doc.is_empty() {
        *target = doc.to_string();
    }
}

fn overlay_list<T: Clone>(target: &mut Vec<T>, doc: &[T]) {
    if !doc.is_empty() {
        *target = doc.to_vec();
    }
}
