//! Known plugins, presets and plugin option schemas

use std::fmt;
use std::io::Read;
use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

mod builtin;

/// Expected type of a plugin option value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// `true` or `false`
    Boolean,
    /// Integer or floating-point number
    Number,
    /// Free-form string
    String,
    /// List of strings
    #[serde(rename = "string[]")]
    StringArray,
    /// Nested object. Option keys the plugin schema does not know about are collected here.
    #[serde(alias = "splat")]
    Object,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::StringArray => "string list",
            Self::Object => "object",
        })
    }
}

/// Plugin reference within a preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PresetEntry {
    /// Plugin enabled with its default configuration
    Plugin(String),
    /// Plugin enabled with the given configuration
    Configured(String, Map<String, Value>),
}

impl PresetEntry {
    /// Name of the plugin
    pub fn name(&self) -> &str {
        match self {
            Self::Plugin(name) | Self::Configured(name, _) => name,
        }
    }

    /// Default configuration of the plugin within this preset
    pub fn config(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Plugin(_) => None,
            Self::Configured(_, config) => Some(config),
        }
    }
}

/// Ordering constraint between two plugins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRule {
    /// Plugin to move
    pub plugin: String,
    /// Plugin that has to run first when both are selected
    pub after: String,
}

/// Plugin and preset registry
///
/// This is pure data: the driver builds its option schema from it and looks names up in it.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Registry {
    /// Known plugin names
    plugins: IndexSet<String>,
    /// Preset name to ordered plugin entries
    presets: IndexMap<String, Vec<PresetEntry>>,
    /// Plugin name to accepted option keys and their value types
    options: IndexMap<String, IndexMap<String, ValueType>>,
    /// Ordering constraints applied when assembling the plugin list
    order: Vec<OrderRule>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry of the Babel 6 plugin ecosystem
    pub fn builtin() -> Self {
        builtin::registry()
    }

    /// Load a registry from its JSON representation
    pub fn from_reader(reader: impl Read) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }

    /// Load a registry from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|source| Error::Input {
            path: path.to_owned(),
            source,
        })?;

        Self::from_reader(std::io::BufReader::new(file)).map_err(|source| Error::Registry {
            path: path.to_owned(),
            source,
        })
    }

    /// Declare a plugin
    pub fn add_plugin(&mut self, name: impl Into<String>) -> &mut Self {
        self.plugins.insert(name.into());
        self
    }

    /// Declare a preset
    pub fn add_preset(
        &mut self,
        name: impl Into<String>,
        entries: impl IntoIterator<Item = PresetEntry>,
    ) -> &mut Self {
        self.presets
            .insert(name.into(), entries.into_iter().collect());
        self
    }

    /// Declare the option schema of a plugin
    pub fn add_plugin_options<K: Into<String>>(
        &mut self,
        plugin: impl Into<String>,
        options: impl IntoIterator<Item = (K, ValueType)>,
    ) -> &mut Self {
        self.options.insert(
            plugin.into(),
            options.into_iter().map(|(k, t)| (k.into(), t)).collect(),
        );
        self
    }

    /// Declare that `plugin` has to run after `after`
    pub fn add_order_rule(
        &mut self,
        plugin: impl Into<String>,
        after: impl Into<String>,
    ) -> &mut Self {
        self.order.push(OrderRule {
            plugin: plugin.into(),
            after: after.into(),
        });
        self
    }

    /// Return `true` if `name` is a known plugin
    pub fn is_plugin(&self, name: &str) -> bool {
        self.plugins.contains(name)
    }

    /// Resolve a command-line plugin name, which may omit the `transform-` prefix
    pub fn canonical_plugin(&self, name: &str) -> Option<&str> {
        self.plugins
            .get(name)
            .or_else(|| self.plugins.get(format!("transform-{}", name).as_str()))
            .map(String::as_str)
    }

    /// Plugin entries of a preset
    pub fn preset(&self, name: &str) -> Option<&[PresetEntry]> {
        self.presets.get(name).map(Vec::as_slice)
    }

    /// Option schema of a plugin
    pub fn plugin_options(&self, plugin: &str) -> Option<&IndexMap<String, ValueType>> {
        self.options.get(plugin)
    }

    /// Ordering constraints
    pub fn order_rules(&self) -> &[OrderRule] {
        &self.order
    }

    /// Known plugin names, sorted
    pub fn plugin_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.plugins.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Known preset names, sorted
    pub fn preset_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.presets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterate over presets in declaration order
    pub fn presets(&self) -> impl Iterator<Item = (&str, &[PresetEntry])> {
        self.presets
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }
}
