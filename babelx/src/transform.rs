//! Transformer interface

use std::path::Path;

use derive_builder::Builder;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::helpers::OutputType;
use crate::{Error, Result};

mod node;
pub use node::NodeTransformer;

/// Plugin reference handed to the transformer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginSpec {
    /// Registry name of the plugin
    #[serde(skip)]
    pub name: String,
    /// Module specifier to load the plugin from
    pub module: String,
    /// Plugin options
    pub options: Option<Map<String, Value>>,
}

/// Options for a single transform call
#[derive(Default, Debug, Clone, PartialEq, Builder, Serialize)]
#[builder(setter(into), default)]
#[serde(rename_all = "camelCase")]
pub struct TransformOptions {
    /// Name of the file being transformed, for diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Let the transformer look up `.babelrc` files
    pub babelrc: bool,
    /// Keep comments in the output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<bool>,
    /// Omit superfluous whitespace in the output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact: Option<bool>,
    /// Plugins to run, in order
    pub plugins: Vec<PluginSpec>,
}

/// Result of a transform call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// Generated source code
    pub code: String,
}

/// Source-to-source transformer
pub trait Transformer {
    /// Transform source code
    ///
    /// # Parameters
    ///
    /// * `code`: source code to transform
    /// * `options`: transform options
    fn transform(&self, code: &str, options: &TransformOptions) -> Result<TransformOutput>;

    /// Transform the contents of a file
    ///
    /// # Parameters
    ///
    /// * `path`: path to the source file
    /// * `options`: transform options
    fn transform_file(&self, path: &Path, options: &TransformOptions) -> Result<TransformOutput> {
        let code = std::fs::read_to_string(path).map_err(|source| Error::Input {
            path: path.to_owned(),
            source,
        })?;

        self.transform(&code, options)
    }

    /// Generate the external helpers bundle
    ///
    /// # Parameters
    ///
    /// * `whitelist`: helpers to include, all of them if `None`
    /// * `output_type`: module format of the bundle
    fn build_external_helpers(
        &self,
        whitelist: Option<&[String]>,
        output_type: OutputType,
    ) -> Result<String>;
}

impl<T: Transformer + ?Sized> Transformer for &T {
    fn transform(&self, code: &str, options: &TransformOptions) -> Result<TransformOutput> {
        (**self).transform(code, options)
    }

    fn transform_file(&self, path: &Path, options: &TransformOptions) -> Result<TransformOutput> {
        (**self).transform_file(path, options)
    }

    fn build_external_helpers(
        &self,
        whitelist: Option<&[String]>,
        output_type: OutputType,
    ) -> Result<String> {
        (**self).build_external_helpers(whitelist, output_type)
    }
}
