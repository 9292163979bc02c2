//! Plugin selection accumulated from the command line

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use crate::getsubopt::SubOptions;
use crate::registry::{OrderRule, PresetEntry, ValueType};
use crate::{Error, Result};

/// Configuration of a selected plugin
#[derive(Debug, Clone, PartialEq)]
pub enum PluginSetting {
    /// Explicitly turned off
    Disabled,
    /// Turned on, with optional plugin options
    Enabled(Option<Map<String, Value>>),
}

/// Insertion-ordered plugin selection
///
/// The order in which plugins are first enabled is the order in which they are handed to the
/// transformer, subject to the registry's ordering rules.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Selection {
    plugins: IndexMap<String, PluginSetting>,
}

impl Selection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable a plugin
    ///
    /// Options are merged into the plugin's current options. A plugin which was disabled before
    /// is moved to the end of the selection.
    ///
    /// # Parameters
    ///
    /// * `name`: plugin name
    /// * `config`: plugin options, if any
    pub fn enable(&mut self, name: &str, config: Option<Map<String, Value>>) {
        if let Some(PluginSetting::Disabled) = self.plugins.get(name) {
            self.plugins.shift_remove(name);
        }

        let setting = self
            .plugins
            .entry(name.to_owned())
            .or_insert(PluginSetting::Enabled(None));

        if let (PluginSetting::Enabled(current), Some(config)) = (setting, config) {
            if let Some(existing) = current.as_mut() {
                existing.extend(config);
            } else {
                *current = Some(config);
            }
        }
    }

    /// Disable a plugin
    pub fn disable(&mut self, name: &str) {
        if let Some(setting) = self.plugins.get_mut(name) {
            *setting = PluginSetting::Disabled;
        } else {
            self.plugins.insert(name.to_owned(), PluginSetting::Disabled);
        }
    }

    /// Enable every plugin of a preset with the preset's default options
    pub fn apply_preset(&mut self, entries: &[PresetEntry]) {
        for entry in entries {
            self.enable(entry.name(), entry.config().cloned());
        }
    }

    /// Current setting of a plugin
    pub fn get(&self, name: &str) -> Option<&PluginSetting> {
        self.plugins.get(name)
    }

    /// Return `true` if nothing was selected
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Iterate over all settings, in selection order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PluginSetting)> {
        self.plugins.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Enabled plugins in selection order
    pub fn enabled(&self) -> impl Iterator<Item = (&str, Option<&Map<String, Value>>)> {
        self.plugins.iter().filter_map(|(name, setting)| match setting {
            PluginSetting::Enabled(config) => Some((name.as_str(), config.as_ref())),
            PluginSetting::Disabled => None,
        })
    }

    /// Enabled plugins with the ordering rules applied
    ///
    /// For each rule whose plugins are both enabled, `rule.plugin` is moved right after
    /// `rule.after` if it currently comes first. Rules are applied in order.
    pub fn ordered(&self, rules: &[OrderRule]) -> Vec<(&str, Option<&Map<String, Value>>)> {
        let mut plugins: Vec<_> = self.enabled().collect();

        for rule in rules {
            let position = |name: &str| plugins.iter().position(|(n, _)| *n == name);

            if let (Some(from), Some(after)) =
                (position(rule.plugin.as_str()), position(rule.after.as_str()))
            {
                if from < after {
                    trace!("moving {} after {}", rule.plugin, rule.after);
                    let plugin = plugins.remove(from);
                    plugins.insert(after, plugin);
                }
            }
        }

        plugins
    }
}

/// Coerce command-line sub-options to a plugin's option schema
///
/// # Parameters
///
/// * `plugin`: plugin name, for error messages
/// * `options`: parsed sub-options
/// * `schema`: plugin option schema from the registry
///
/// # Returns
///
/// The plugin options object. Keys the schema does not know about are collected into its
/// object-typed key, if it has one.
pub fn coerce_options(
    plugin: &str,
    options: &SubOptions,
    schema: Option<&IndexMap<String, ValueType>>,
) -> Result<Map<String, Value>> {
    let schema = match schema {
        Some(schema) => schema,
        None if options.is_empty() => return Ok(Map::new()),
        None => return Err(Error::PluginTakesNoOptions(plugin.to_owned())),
    };

    let splat = schema
        .iter()
        .find(|(_, t)| **t == ValueType::Object)
        .map(|(k, _)| k.as_str());

    let mut rv = Map::new();

    for (key, value) in options {
        match schema.get(key) {
            Some(ValueType::Object) => {
                return Err(Error::InvalidPluginOption {
                    plugin: plugin.to_owned(),
                    key: key.to_owned(),
                    expected: ValueType::Object,
                    value: value.clone().unwrap_or_default(),
                })
            }
            Some(&expected) => {
                let value = coerce_value(expected, value.as_deref())
                    .ok_or_else(|| match value {
                        Some(value) => Error::InvalidPluginOption {
                            plugin: plugin.to_owned(),
                            key: key.to_owned(),
                            expected,
                            value: value.to_owned(),
                        },
                        None => Error::MissingPluginOptionValue {
                            plugin: plugin.to_owned(),
                            key: key.to_owned(),
                        },
                    })?;

                rv.insert(key.to_owned(), value);
            }
            None => match splat {
                Some(splat) => {
                    let object = rv
                        .entry(splat)
                        .or_insert_with(|| Value::Object(Map::new()));

                    if let Value::Object(object) = object {
                        object.insert(
                            key.to_owned(),
                            value.clone().map_or(Value::Bool(true), Value::String),
                        );
                    }
                }
                None => {
                    return Err(Error::UnknownPluginOption {
                        plugin: plugin.to_owned(),
                        key: key.to_owned(),
                    })
                }
            },
        }
    }

    Ok(rv)
}

fn coerce_value(expected: ValueType, value: Option<&str>) -> Option<Value> {
    match (expected, value) {
        (ValueType::Boolean, None) => Some(Value::Bool(true)),
        (ValueType::Boolean, Some(value)) => parse_bool(value).map(Value::Bool),
        (_, None) => None,
        (ValueType::Number, Some(value)) => {
            if let Ok(i) = value.parse::<i64>() {
                Some(Value::Number(i.into()))
            } else {
                value
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
            }
        }
        (ValueType::String, Some(value)) => Some(Value::String(value.to_owned())),
        (ValueType::StringArray, Some(value)) => Some(Value::Array(
            value
                .split(':')
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_owned()))
                .collect(),
        )),
        (ValueType::Object, Some(_)) => None,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
