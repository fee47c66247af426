//! View configuration.
//!
//! The resolver asks a [`ConfigurationProvider`] which layout to use when a
//! request does not name one. [`ViewConfig`] is the plain, deserializable
//! configuration; [`ConfigFile`] re-reads a YAML file on every query so that
//! edits are picked up without restarting.
//!
//! # Format
//!
//! ```yaml
//! # name of the layout, or `false` for none
//! default_layout: main
//! # directories searched for views, in order
//! view_paths:
//!   - views
//!   - shared/views
//! ```
//!
//! `default_layout` may also be omitted or `null`, which means no layout.
//! `true` and the empty string are rejected.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::directive::DefaultLayout;
use crate::engine::MiniJinjaEngine;
use crate::error::ViewError;

/// Supplies the default layout.
pub trait ConfigurationProvider: Send + Sync {
    /// Returns the configured default layout.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::ConfigurationUnavailable`] if the configuration
    /// cannot be read.
    fn default_layout(&self) -> Result<DefaultLayout, ViewError>;
}

/// A fixed answer, handy when the layout is decided in code.
impl ConfigurationProvider for DefaultLayout {
    fn default_layout(&self) -> Result<DefaultLayout, ViewError> {
        Ok(self.clone())
    }
}

impl<C: ConfigurationProvider + ?Sized> ConfigurationProvider for Box<C> {
    fn default_layout(&self) -> Result<DefaultLayout, ViewError> {
        (**self).default_layout()
    }
}

impl<C: ConfigurationProvider + ?Sized> ConfigurationProvider for Arc<C> {
    fn default_layout(&self) -> Result<DefaultLayout, ViewError> {
        (**self).default_layout()
    }
}

/// Raw `default_layout` value as written in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutSetting {
    Name(String),
    Enabled(bool),
}

/// Deserializable view configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub default_layout: Option<LayoutSetting>,

    #[serde(default)]
    pub view_paths: Vec<PathBuf>,
}

impl ViewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default layout name.
    pub fn with_default_layout(mut self, name: impl Into<String>) -> Self {
        self.default_layout = Some(LayoutSetting::Name(name.into()));
        self
    }

    /// Appends a view directory.
    pub fn with_view_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.view_paths.push(path.into());
        self
    }

    /// Parses and validates a YAML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::InvalidConfiguration`] on malformed YAML or a
    /// `default_layout` of the wrong shape.
    pub fn from_yaml(source: &str) -> Result<Self, ViewError> {
        let config: ViewConfig = serde_yaml::from_str(source)?;
        config.resolve_default_layout()?;
        Ok(config)
    }

    /// Loads a YAML configuration file.
    ///
    /// Relative `view_paths` are resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Io`] if the file cannot be read, otherwise the
    /// errors of [`from_yaml`](Self::from_yaml).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ViewError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        debug!("view config read from {}", path.display());
        let mut config = Self::from_yaml(&source)?;
        if let Some(base) = path.parent() {
            config.view_paths = config
                .view_paths
                .into_iter()
                .map(|p| if p.is_relative() { base.join(p) } else { p })
                .collect();
        }
        Ok(config)
    }

    /// Converts the raw setting into a [`DefaultLayout`].
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::InvalidConfiguration`] for `true` or an empty name.
    pub fn resolve_default_layout(&self) -> Result<DefaultLayout, ViewError> {
        match &self.default_layout {
            None | Some(LayoutSetting::Enabled(false)) => Ok(DefaultLayout::Suppressed),
            Some(LayoutSetting::Name(name)) if name.trim().is_empty() => Err(
                ViewError::InvalidConfiguration("default_layout must not be empty".into()),
            ),
            Some(LayoutSetting::Name(name)) => Ok(DefaultLayout::Named(name.clone())),
            Some(LayoutSetting::Enabled(true)) => Err(ViewError::InvalidConfiguration(
                "default_layout must be a layout name or false".into(),
            )),
        }
    }

    /// Builds a [`MiniJinjaEngine`] over the configured view paths.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Io`] if a view path does not exist.
    pub fn build_engine(&self) -> Result<MiniJinjaEngine, ViewError> {
        MiniJinjaEngine::with_view_dirs(&self.view_paths)
    }
}

impl ConfigurationProvider for ViewConfig {
    fn default_layout(&self) -> Result<DefaultLayout, ViewError> {
        self.resolve_default_layout()
    }
}

/// A configuration file read on every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigurationProvider for ConfigFile {
    fn default_layout(&self) -> Result<DefaultLayout, ViewError> {
        let source = std::fs::read_to_string(&self.path).map_err(|err| {
            ViewError::config_unavailable(format!("{}: {}", self.path.display(), err))
        })?;
        let config: ViewConfig = serde_yaml::from_str(&source).map_err(|err| {
            ViewError::config_unavailable(format!("{}: {}", self.path.display(), err))
        })?;
        config.resolve_default_layout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_named_layout() {
        let config = ViewConfig::from_yaml("default_layout: main").unwrap();
        assert_eq!(config.default_layout().unwrap(), DefaultLayout::named("main"));
    }

    #[test]
    fn test_false_and_missing_suppress() {
        let config = ViewConfig::from_yaml("default_layout: false").unwrap();
        assert_eq!(config.default_layout().unwrap(), DefaultLayout::Suppressed);

        let config = ViewConfig::from_yaml("default_layout: null").unwrap();
        assert_eq!(config.default_layout().unwrap(), DefaultLayout::Suppressed);

        let config = ViewConfig::from_yaml("view_paths: []").unwrap();
        assert_eq!(config.default_layout().unwrap(), DefaultLayout::Suppressed);
    }

    #[test]
    fn test_true_rejected() {
        let err = ViewConfig::from_yaml("default_layout: true").unwrap_err();
        assert!(matches!(err, ViewError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = ViewConfig::from_yaml("default_layout: ''").unwrap_err();
        assert!(matches!(err, ViewError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = ViewConfig::from_yaml("default_layout: [unclosed").unwrap_err();
        assert!(matches!(err, ViewError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_builder() {
        let config = ViewConfig::new()
            .with_default_layout("main")
            .with_view_path("views");
        assert_eq!(config.default_layout().unwrap(), DefaultLayout::named("main"));
        assert_eq!(config.view_paths, vec![PathBuf::from("views")]);
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("views")).unwrap();
        let path = dir.path().join("views.yaml");
        fs::write(&path, "default_layout: main\nview_paths:\n  - views\n").unwrap();

        let config = ViewConfig::load(&path).unwrap();
        assert_eq!(config.view_paths, vec![dir.path().join("views")]);
        assert!(config.build_engine().is_ok());
    }

    #[test]
    fn test_config_file_rereads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("views.yaml");
        fs::write(&path, "default_layout: main\n").unwrap();

        let provider = ConfigFile::new(&path);
        assert_eq!(provider.default_layout().unwrap(), DefaultLayout::named("main"));

        fs::write(&path, "default_layout: false\n").unwrap();
        assert_eq!(provider.default_layout().unwrap(), DefaultLayout::Suppressed);
    }

    #[test]
    fn test_config_file_missing_is_unavailable() {
        let provider = ConfigFile::new("/no/such/views.yaml");
        let err = provider.default_layout().unwrap_err();
        assert!(matches!(err, ViewError::ConfigurationUnavailable(_)));
    }

    #[test]
    fn test_fixed_provider() {
        let provider = DefaultLayout::named("main");
        assert_eq!(provider.default_layout().unwrap(), DefaultLayout::named("main"));
    }
}
