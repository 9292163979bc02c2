//! Environment configuration

use std::ffi::OsString;
use std::path::PathBuf;

use crate::registry::Registry;
use crate::resolve::NodeModulesResolver;
use crate::transform::NodeTransformer;
use crate::Result;

/// Node.js executable
pub const NODE_VAR: &str = "BABELX_NODE";
/// Babel core module name
pub const BABEL_VAR: &str = "BABELX_BABEL";
/// Additional plugin search directories
pub const PLUGIN_PATH_VAR: &str = "BABELX_PLUGIN_PATH";
/// JSON registry replacing the builtin one
pub const REGISTRY_VAR: &str = "BABELX_REGISTRY";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Node.js executable
    pub node: OsString,
    /// Babel core module name
    pub babel: String,
    /// Additional plugin search directories
    pub plugin_path: Vec<PathBuf>,
    /// Registry file, the builtin registry is used if `None`
    pub registry: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node: OsString::from("node"),
            babel: "babel-core".to_owned(),
            plugin_path: Vec::new(),
            registry: None,
        }
    }
}

impl Config {
    /// Read the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var_os(name))
    }

    /// Read the configuration from a variable lookup function
    pub fn from_vars(var: impl Fn(&str) -> Option<OsString>) -> Self {
        let mut config = Self::default();

        if let Some(node) = var(NODE_VAR).filter(|v| !v.is_empty()) {
            config.node = node;
        }

        if let Some(babel) = var(BABEL_VAR).and_then(|v| v.into_string().ok()) {
            if !babel.is_empty() {
                config.babel = babel;
            }
        }

        if let Some(path) = var(PLUGIN_PATH_VAR) {
            config.plugin_path = std::env::split_paths(&path)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
        }

        config.registry = var(REGISTRY_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        config
    }

    /// Load the configured registry
    pub fn load_registry(&self) -> Result<Registry> {
        match &self.registry {
            Some(path) => Registry::from_path(path),
            None => Ok(Registry::builtin()),
        }
    }

    /// Where [Config::load_registry] reads the registry from, for logging
    pub fn registry_source(&self) -> String {
        match &self.registry {
            Some(path) => path.display().to_string(),
            None => "builtin".to_owned(),
        }
    }

    /// Plugin resolver searching the current directory, its ancestors and the plugin path
    pub fn resolver(&self) -> Result<NodeModulesResolver> {
        let cwd = std::env::current_dir()?;
        Ok(NodeModulesResolver::from_dir(
            &cwd,
            self.plugin_path.iter().cloned(),
        ))
    }

    /// Transformer running the configured Babel through the configured Node.js
    pub fn transformer(&self) -> NodeTransformer {
        NodeTransformer::new(self.node.clone(), self.babel.clone())
    }
}
