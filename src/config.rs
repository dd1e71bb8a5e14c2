//! Configuration file (`styledoc.toml`).
//!
//! Every key is optional; missing keys keep their built-in defaults and the
//! command line overrides whatever the file sets.
//!
//! ```toml
//! prop_library = "react"
//! default_category = "components"
//! navigation = "docs/nav.json"
//! filter = true
//! static_categories = ["overview", "develop", "styles"]
//! pretty = true
//! ```

use crate::error::{Error, Result};
use crate::navigation::{FilterOptions, DEFAULT_STATIC_CATEGORIES};
use crate::parser::{ParseOptions, DEFAULT_PROP_LIBRARY};
use crate::tree::{BuildOptions, DEFAULT_CATEGORY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no config is given.
pub const CONFIG_FILE_NAME: &str = "styledoc.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Library name recorded on every `@prop`
    pub prop_library: String,
    /// Category for components without `@category`
    pub default_category: String,
    /// Navigation template to merge into, relative to the config file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<PathBuf>,
    /// Drop entries with nothing to render
    pub filter: bool,
    pub static_categories: Vec<String>,
    /// Pretty-print the output JSON
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prop_library: DEFAULT_PROP_LIBRARY.to_string(),
            default_category: DEFAULT_CATEGORY.to_string(),
            navigation: None,
            filter: true,
            static_categories: DEFAULT_STATIC_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            pretty: true,
        }
    }
}

impl Config {
    /// Load a config file; `Ok(None)` when it does not exist.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| Error::Read {
            path: config_path.to_path_buf(),
            source,
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|source| Error::Config {
            path: config_path.to_path_buf(),
            source,
        })?;

        // Relative paths in the file are relative to the file itself
        if let (Some(navigation), Some(base)) = (config.navigation.as_mut(), config_path.parent()) {
            if navigation.is_relative() {
                *navigation = base.join(&*navigation);
            }
        }

        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(Some(config))
    }

    /// Look for [`CONFIG_FILE_NAME`] in `dir`.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        Self::load_from_path(dir.join(CONFIG_FILE_NAME))
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            prop_library: self.prop_library.clone(),
        }
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            default_category: self.default_category.clone(),
        }
    }

    /// `None` when filtering is switched off.
    pub fn filter_options(&self) -> Option<FilterOptions> {
        self.filter.then(|| FilterOptions {
            static_categories: self.static_categories.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(Config::discover(dir.path()).unwrap().is_none());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "prop_library = \"angular\"\nfilter = false\n",
        )
        .unwrap();

        let config = Config::discover(dir.path()).unwrap().unwrap();
        assert_eq!(config.prop_library, "angular");
        assert!(!config.filter);
        assert_eq!(config.default_category, DEFAULT_CATEGORY);
        assert_eq!(config.static_categories, vec!["overview", "develop", "styles"]);
        assert!(config.filter_options().is_none());
        assert_eq!(config.parse_options().prop_library, "angular");
    }

    #[test]
    fn navigation_path_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "navigation = \"nav.json\"\nstatic_categories = [\"intro\"]\n").unwrap();

        let config = Config::load_from_path(&path).unwrap().unwrap();
        assert_eq!(config.navigation, Some(dir.path().join("nav.json")));
        assert_eq!(
            config.filter_options().unwrap().static_categories,
            vec!["intro".to_string()]
        );
    }

    #[test]
    fn absolute_navigation_path_is_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "navigation = \"/srv/docs/nav.json\"\n").unwrap();

        let config = Config::load_from_path(&path).unwrap().unwrap();
        assert_eq!(config.navigation, Some(PathBuf::from("/srv/docs/nav.json")));
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "prop_library = [").unwrap();

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "prop_libary = \"vue\"\n").unwrap();
        assert!(Config::load_from_path(&path).is_err());
    }
}
