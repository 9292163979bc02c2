//! External helpers bundle generation

use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::Serialize;

use crate::transform::Transformer;
use crate::{Error, Result};

/// Module format of the external helpers bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    /// ES module exports
    Export,
    /// Assigns a `babelHelpers` global
    Global,
    /// UMD wrapper
    Umd,
    /// `var babelHelpers` declaration
    Var,
}

impl Default for OutputType {
    fn default() -> Self {
        Self::Global
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Export => "export",
            Self::Global => "global",
            Self::Umd => "umd",
            Self::Var => "var",
        })
    }
}

impl FromStr for OutputType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "export" => Ok(Self::Export),
            "global" => Ok(Self::Global),
            "umd" => Ok(Self::Umd),
            "var" => Ok(Self::Var),
            other => Err(Error::InvalidOutputType(other.to_owned())),
        }
    }
}

/// Split a comma-separated helper whitelist
pub fn parse_whitelist(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Build the external helpers bundle
///
/// Transformers which do not support the `export` format directly are asked for the `var` format,
/// which is then rewritten with [var_to_export].
pub fn build_external_helpers<T: Transformer + ?Sized>(
    transformer: &T,
    whitelist: Option<&[String]>,
    output_type: OutputType,
) -> Result<String> {
    match transformer.build_external_helpers(whitelist, output_type) {
        Err(Error::Transform { message, .. }) if output_type == OutputType::Export => {
            debug!("export helpers unsupported ({}), rewriting var output", message);
            Ok(var_to_export(
                &transformer.build_external_helpers(whitelist, OutputType::Var)?,
            ))
        }
        other => other,
    }
}

/// Rewrite a `var`-format helpers bundle as an ES module
///
/// `babelHelpers.name = ...` assignments become `var _name = ...` declarations followed by
/// `export { _name as name };` lines. The `babelHelpers` object itself is dropped.
pub fn var_to_export(code: &str) -> String {
    let mut exports = IndexSet::new();
    let mut lines = Vec::new();

    for line in code.lines() {
        if line == "babelHelpers;" || line == "var babelHelpers = {};" {
            continue;
        }

        if let Some((name, value)) = parse_helper_assignment(line) {
            lines.push(format!("var _{} = {}", name, value));
            exports.insert(name);
            continue;
        }

        lines.push(line.to_owned());
    }

    lines.extend(
        exports
            .into_iter()
            .map(|name| format!("export {{ _{} as {} }};", name, name)),
    );

    lines.join("\n")
}

fn parse_helper_assignment(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix("babelHelpers.")?;
    let end = rest
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or_else(|| rest.len());

    if end == 0 {
        return None;
    }

    let value = rest[end..].strip_prefix(" = ")?;
    Some((&rest[..end], value))
}
