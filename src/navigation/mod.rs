//! Navigation template — the externally authored site structure.
//!
//! The template is a JSON array of categories, each listing its components and,
//! optionally, the sections to show in order:
//!
//! ```json
//! [
//!   { "category": "overview", "name": "Overview", "children": [] },
//!   {
//!     "category": "components",
//!     "children": [
//!       {
//!         "component": "Button",
//!         "name": "Button",
//!         "sections": [{ "section": "default", "name": "Default", "core": true }]
//!       }
//!     ]
//!   }
//! ]
//! ```
//!
//! Fields the template carries beyond the ones modelled here are kept in
//! `extra` and written back out untouched.

pub mod filter;
pub mod merge;

pub use filter::{filter, FilterOptions, DEFAULT_STATIC_CATEGORIES};
pub use merge::merge;

use crate::model::{DocTree, PropTable, Section};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Navigation {
    pub categories: Vec<NavCategory>,
}

/// Skeleton template listing every documented category and component, in
/// document order, with no section selection.
impl From<&DocTree> for Navigation {
    fn from(doc: &DocTree) -> Self {
        let categories = doc
            .categories
            .iter()
            .map(|category| NavCategory {
                category: category.name.clone(),
                children: category
                    .components
                    .iter()
                    .map(|component| NavComponent {
                        component: component.component.clone(),
                        ..Default::default()
                    })
                    .collect(),
                ..Default::default()
            })
            .collect();
        Self { categories }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavCategory {
    pub category: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub children: Vec<NavComponent>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavComponent {
    pub component: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// `None` means "show whatever the sources document".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<NavSection>>,
    #[serde(default, skip_serializing_if = "PropTable::is_empty")]
    pub props: PropTable,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A template section: the regular section shape plus any extra fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavSection {
    #[serde(flatten)]
    pub section: Section,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Section> for NavSection {
    fn from(section: Section) -> Self {
        Self {
            section,
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"[
      { "category": "overview", "name": "Overview", "children": [], "icon": "home" },
      {
        "category": "components",
        "children": [
          {
            "component": "Button",
            "name": "Button",
            "status": "stable",
            "sections": [{ "section": "default", "name": "Default", "core": true, "order": 1 }]
          },
          { "component": "Card" }
        ]
      }
    ]"#;

    #[test]
    fn template_deserializes() {
        let nav: Navigation = serde_json::from_str(TEMPLATE).unwrap();
        assert_eq!(nav.categories.len(), 2);

        let button = &nav.categories[1].children[0];
        assert_eq!(button.component, "Button");
        let sections = button.sections.as_ref().unwrap();
        assert_eq!(sections[0].section.section, "default");
        assert!(sections[0].section.core);
        assert_eq!(sections[0].extra["order"], 1);
        assert_eq!(button.extra["status"], "stable");

        let card = &nav.categories[1].children[1];
        assert_eq!(card.component, "Card");
        assert!(card.sections.is_none());
        assert!(card.name.is_empty());
    }

    #[test]
    fn skeleton_lists_document_components() {
        let doc: DocTree = serde_json::from_str(
            r#"[{"name": "components", "components": [{"component": "Button", "name": "Button"}]}]"#,
        )
        .unwrap();
        let nav = Navigation::from(&doc);
        assert_eq!(nav.categories[0].category, "components");
        let child = &nav.categories[0].children[0];
        assert_eq!(child.component, "Button");
        assert!(child.sections.is_none());
        assert!(child.name.is_empty());
    }

    #[test]
    fn extra_fields_survive_a_round_trip() {
        let nav: Navigation = serde_json::from_str(TEMPLATE).unwrap();
        let json = serde_json::to_value(&nav).unwrap();
        assert_eq!(json[0]["icon"], "home");
        assert_eq!(json[1]["children"][0]["status"], "stable");
        assert_eq!(json[1]["children"][0]["sections"][0]["order"], 1);
        assert!(json[1]["children"][1].get("sections").is_none());
    }
}
