//! Declarative component configuration for weave.
//!
//! Parses `weave.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ```toml
//! [[components]]
//! selector = "custom-tag"
//! template = "<div>custom-tag</div>"
//!
//! [[components]]
//! selector = "x-card"
//! template_file = "templates/card.html"
//! ```
//!
//! Components are registered in declaration order. `template_file` paths are
//! resolved relative to the directory containing the config file.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use weave_renderer::{Component, HtmlComponentRenderer, HtmlHost};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "weave.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Component entries as parsed from TOML.
    components: Vec<ComponentConfigRaw>,

    /// Resolved components in declaration order (set after loading).
    #[serde(skip)]
    pub components_resolved: Vec<ComponentConfig>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw component entry as parsed from TOML.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ComponentConfigRaw {
    selector: String,
    template: Option<String>,
    template_file: Option<String>,
}

/// Template-only component with its markup loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentConfig {
    /// CSS selector the component is registered under.
    pub selector: String,
    /// Replacement markup for matched elements.
    pub template: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Template file could not be read.
    #[error("Failed to read template {}: {source}", .path.display())]
    Template {
        /// Resolved template path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `weave.toml` in current directory and parents.
    /// Without a config file, an empty configuration is returned.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a template file cannot be read.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        match std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd))
        {
            Some(discovered) => Self::load_from_file(&discovered),
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from TOML content.
    ///
    /// `config_dir` is the base for resolving `template_file` paths.
    pub fn from_toml_str(content: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.resolve_templates(config_dir)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolved components in declaration order.
    #[must_use]
    pub fn components(&self) -> &[ComponentConfig] {
        &self.components_resolved
    }

    /// Register every configured component with `renderer`, in declaration order.
    ///
    /// A selector declared twice keeps the last template, as with
    /// [`HtmlComponentRenderer::register_component`].
    pub fn register_into<H: HtmlHost>(&self, renderer: &mut HtmlComponentRenderer<H>) {
        for component in &self.components_resolved {
            renderer.register_component(
                component.selector.clone(),
                Component::new().with_template(component.template.clone()),
            );
        }
        tracing::debug!(
            components = self.components_resolved.len(),
            "Registered configured components"
        );
    }

    /// Validate configuration values.
    ///
    /// Selectors must be non-empty. Selector syntax is checked by the
    /// renderer at render time, not here.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, component) in self.components_resolved.iter().enumerate() {
            if component.selector.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "components[{index}].selector cannot be empty"
                )));
            }
        }
        Ok(())
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));

        let mut config = Self::from_toml_str(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());

        tracing::debug!(
            path = %path.display(),
            components = config.components_resolved.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load templates, reading `template_file` entries relative to `config_dir`.
    fn resolve_templates(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        self.components_resolved = self
            .components
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let template = match (&raw.template, &raw.template_file) {
                    (Some(template), None) => template.clone(),
                    (None, Some(file)) => {
                        let path = config_dir.join(file);
                        std::fs::read_to_string(&path)
                            .map_err(|source| ConfigError::Template { path, source })?
                    }
                    (Some(_), Some(_)) => {
                        return Err(ConfigError::Validation(format!(
                            "components[{index}] cannot set both template and template_file"
                        )));
                    }
                    (None, None) => {
                        return Err(ConfigError::Validation(format!(
                            "components[{index}] requires template or template_file"
                        )));
                    }
                };
                Ok(ComponentConfig {
                    selector: raw.selector.clone(),
                    template,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(())
    }
}
