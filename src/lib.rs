//! styledoc — build style-guide documentation from `@tag` comment blocks.
//!
//! Source files (JS/TS/SCSS/...) carry annotations such as
//!
//! ```text
//! /**
//!  * @component Button
//!  * @section default
//!  * @html <button>Click</button>
//!  */
//! ```
//!
//! which are extracted per file ([`parser`]), folded into a
//! `Category → Component → Section` tree ([`tree`]), merged into a navigation
//! template and filtered ([`navigation`]). [`Pipeline`] runs the whole chain.

pub mod config;
pub mod error;
pub mod model;
pub mod navigation;
pub mod parser;
pub mod tree;

pub use config::Config;
pub use error::{Error, Result};

use model::DocTree;
use navigation::{FilterOptions, Navigation};
use parser::fragment::Fragment;
use parser::ParseOptions;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tree::BuildOptions;

/// Extensions picked up when a directory is given as input.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "ts", "tsx", "scss", "css"];

/// One loaded input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    pub text: String,
}

impl Source {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

// -- Pipeline -----------------------------------------------------------------

/// Extraction → tree → merge → filter, with the options for each stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub parse: ParseOptions,
    pub build: BuildOptions,
    /// `None` disables filtering
    pub filter: Option<FilterOptions>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Pipeline {
    pub fn from_config(config: &Config) -> Self {
        Self {
            parse: config.parse_options(),
            build: config.build_options(),
            filter: config.filter_options(),
        }
    }

    /// Parse every source, in parallel. Results keep input order.
    pub fn extract(&self, sources: &[Source]) -> Vec<Vec<Fragment>> {
        sources
            .par_iter()
            .map(|source| parser::parse_source(&source.text, Some(source.path.as_path()), &self.parse))
            .collect()
    }

    /// Build the document tree from all sources.
    pub fn build(&self, sources: &[Source]) -> DocTree {
        let fragments = self.extract(sources);
        let tree = tree::build(fragments.iter().map(Vec::as_slice), &self.build);
        if tree.is_empty() {
            tracing::warn!(files = sources.len(), "no documented components found");
        }
        tree
    }

    /// Merge `tree` into `nav` (or into a skeleton of the tree itself) and filter.
    pub fn compile(&self, tree: &DocTree, nav: Option<&Navigation>) -> Navigation {
        let merged = match nav {
            Some(nav) => navigation::merge(nav, tree),
            None => navigation::merge(&Navigation::from(tree), tree),
        };
        match &self.filter {
            Some(options) => navigation::filter(merged, options),
            None => merged,
        }
    }

    pub fn run(&self, sources: &[Source], nav: Option<&Navigation>) -> Navigation {
        self.compile(&self.build(sources), nav)
    }
}

// -- I/O ----------------------------------------------------------------------

/// Expand files, directories (non-recursive, [`SOURCE_EXTENSIONS`] only) and
/// glob patterns into a sorted, deduplicated file list.
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path).map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })?;
            for entry in entries.flatten() {
                let p = entry.path();
                let supported = p
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext));
                if p.is_file() && supported {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .map_err(|source| Error::Glob {
                pattern: pattern.clone(),
                source,
            })?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!(%pattern, "no files matched");
        }
        files.extend(matches);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

pub fn read_sources(paths: &[PathBuf]) -> Result<Vec<Source>> {
    paths
        .iter()
        .map(|path| {
            let text = fs::read_to_string(path).map_err(|source| Error::Read {
                path: path.clone(),
                source,
            })?;
            tracing::trace!(path = %path.display(), bytes = text.len(), "read source");
            Ok(Source::new(path, text))
        })
        .collect()
}

pub fn load_navigation(path: &Path) -> Result<Navigation> {
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| Error::Navigation {
        path: path.to_path_buf(),
        source,
    })
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let mut json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    json.push('\n');
    Ok(json)
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, contents).map_err(write_err)?;
    tracing::info!(path = %path.display(), "wrote document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BUTTON: &str = "/**\n * @component Button\n * @section default\n * @html <button>Click</button>\n */\n";

    #[test]
    fn end_to_end_single_file() {
        let tree = Pipeline::default().build(&[Source::new("button.jsx", BUTTON)]);

        let category = &tree.categories[0];
        assert_eq!(category.name, "components");
        let component = category.component("Button").unwrap();
        let section = component.section("default").unwrap();
        let core = section.examples.core.as_ref().unwrap();
        assert_eq!(core.example, "<button>Click</button>");
        assert_eq!(core.escaped, "&lt;button&gt;Click&lt;/button&gt;");
    }

    #[test]
    fn prop_without_comma_stays_with_its_component() {
        let source = "/** @component A */\nA.propTypes = {\n  /** @prop Size */\n  size: PropTypes.string\n};\n\
                      /**\n * @component B\n * @section default\n * @html <b>x</b>\n */\n";
        let tree = Pipeline::default().build(&[Source::new("a.jsx", source)]);
        let category = &tree.categories[0];

        let a = category.component("A").unwrap();
        let props = a.props.get("react").unwrap();
        assert_eq!(props.len(), 1);
        assert_eq!((props[0].name.as_str(), props[0].ty.as_str()), ("size", "string"));

        let b = category.component("B").unwrap();
        assert!(b.props.is_empty());
        let html = b.section("default").unwrap().examples.core.as_ref().unwrap();
        assert_eq!(html.example, "<b>x</b>");
    }

    #[test]
    fn extraction_keeps_file_order() {
        let sources: Vec<_> = (0..16)
            .map(|i| Source::new(format!("c{i}.js"), format!("/** @component C{i} */\n")))
            .collect();
        let tree = Pipeline::default().build(&sources);
        let keys: Vec<_> = tree.categories[0]
            .components
            .iter()
            .map(|c| c.component.clone())
            .collect();
        let expected: Vec<_> = (0..16).map(|i| format!("C{i}")).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let pipeline = Pipeline::default();
        let nav = pipeline.run(&[Source::new("plain.js", "const a = 1;\n")], None);
        assert!(nav.categories.is_empty());
    }

    #[test]
    fn run_without_template_filters_undocumented_sections() {
        let source = format!("{BUTTON}/**\n * @component Button\n * @section empty\n */\n");
        let nav = Pipeline::default().run(&[Source::new("button.jsx", source)], None);
        let sections = nav.categories[0].children[0].sections.as_ref().unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section.section, "default");
    }

    #[test]
    fn disabled_filter_keeps_everything() {
        let pipeline = Pipeline {
            filter: None,
            ..Pipeline::default()
        };
        let nav = pipeline.run(&[Source::new("a.js", "/** @component Bare */\n")], None);
        assert_eq!(nav.categories[0].children[0].component, "Bare");
    }

    #[test]
    fn expand_inputs_scans_directories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.jsx"), "").unwrap();
        fs::write(dir.path().join("a.scss"), "").unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();

        let files = expand_inputs(&[dir.path().to_string_lossy().to_string()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.scss", "b.jsx"]);
    }

    #[test]
    fn expand_inputs_rejects_bad_glob() {
        let err = expand_inputs(&["src/[".to_string()]).unwrap_err();
        assert!(matches!(err, Error::Glob { .. }));
    }

    #[test]
    fn write_output_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/docs/styleguide.json");
        write_output(&path, "[]\n").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "[]\n");
    }

    #[test]
    fn bad_navigation_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nav.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_navigation(&path).unwrap_err();
        assert!(matches!(err, Error::Navigation { .. }));
        assert!(err.to_string().contains("nav.json"));
    }
}
