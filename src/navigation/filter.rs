//! Output filter: drop navigation entries with nothing to render.
//!
//! Static categories pass unconditionally. Elsewhere a section survives when it
//! is `core` or has example content; components without surviving sections and
//! categories without surviving components are removed.

use super::{NavCategory, NavComponent, Navigation};

/// Categories kept even when they hold no documented components.
pub const DEFAULT_STATIC_CATEGORIES: [&str; 3] = ["overview", "develop", "styles"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub static_categories: Vec<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            static_categories: DEFAULT_STATIC_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FilterOptions {
    fn is_static(&self, category: &str) -> bool {
        self.static_categories.iter().any(|c| c == category)
    }
}

pub fn filter(nav: Navigation, options: &FilterOptions) -> Navigation {
    let categories = nav
        .categories
        .into_iter()
        .filter_map(|category| {
            if options.is_static(&category.category) {
                return Some(category);
            }
            filter_category(category)
        })
        .collect();
    Navigation { categories }
}

fn filter_category(mut category: NavCategory) -> Option<NavCategory> {
    category.children = std::mem::take(&mut category.children)
        .into_iter()
        .filter_map(filter_component)
        .collect();
    if category.children.is_empty() {
        tracing::debug!(category = %category.category, "no renderable components; dropping");
        return None;
    }
    Some(category)
}

fn filter_component(mut component: NavComponent) -> Option<NavComponent> {
    let sections: Vec<_> = component
        .sections
        .take()?
        .into_iter()
        .filter(|s| s.section.core || s.section.has_examples())
        .collect();
    if sections.is_empty() {
        tracing::debug!(component = %component.component, "no renderable sections; dropping");
        return None;
    }
    component.sections = Some(sections);
    Some(component)
}
