//! Babel driven through a Node.js child process

use std::ffi::OsString;
use std::io::Write;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};

use super::{TransformOptions, TransformOutput, Transformer};
use crate::helpers::OutputType;
use crate::{Error, Result};

static BRIDGE: &str = include_str!("bridge.js");

#[derive(Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum Request<'a> {
    Transform {
        babel: &'a str,
        code: &'a str,
        options: &'a TransformOptions,
    },
    Helpers {
        babel: &'a str,
        whitelist: Option<&'a [String]>,
        #[serde(rename = "outputType")]
        output_type: OutputType,
    },
}

#[derive(Deserialize)]
struct Response {
    code: Option<String>,
    error: Option<ResponseError>,
    unavailable: Option<ResponseError>,
}

#[derive(Deserialize)]
struct ResponseError {
    message: String,
    #[serde(rename = "codeFrame")]
    code_frame: Option<String>,
}

/// Transformer running Babel in a `node` child process
///
/// Every call spawns `node` with an embedded bridge script, writes a JSON request to its standard
/// input and reads the JSON response from its standard output.
#[derive(Debug, Clone)]
pub struct NodeTransformer {
    node: OsString,
    babel: String,
}

impl Default for NodeTransformer {
    fn default() -> Self {
        Self::new("node", "babel-core")
    }
}

impl NodeTransformer {
    /// Create a new Node.js transformer
    ///
    /// # Parameters
    ///
    /// * `node`: node executable
    /// * `babel`: module name of the Babel core library
    pub fn new(node: impl Into<OsString>, babel: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            babel: babel.into(),
        }
    }

    fn call(&self, request: &Request<'_>) -> Result<String> {
        let payload = serde_json::to_vec(request)?;
        let program = self.node.to_string_lossy().into_owned();

        debug!("spawning {} ({} byte request)", program, payload.len());

        let mut child = Command::new(&self.node)
            .arg("-e")
            .arg(BRIDGE)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| Error::Unavailable {
                program: program.clone(),
                source,
            })?;

        // The bridge only answers once its input is closed
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&payload)?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(Error::Bridge(format!("{} exited with {}", program, output.status)));
        }

        let response: Response = serde_json::from_slice(&output.stdout)?;
        match response {
            Response {
                unavailable: Some(error),
                ..
            } => Err(Error::TransformerUnavailable {
                module: self.babel.clone(),
                message: error.message,
            }),
            Response {
                error: Some(error), ..
            } => Err(Error::Transform {
                message: error.message,
                code_frame: error.code_frame,
            }),
            Response {
                code: Some(code), ..
            } => Ok(code),
            _ => Err(Error::Bridge("empty response".to_owned())),
        }
    }
}

impl Transformer for NodeTransformer {
    fn transform(&self, code: &str, options: &TransformOptions) -> Result<TransformOutput> {
        let code = self.call(&Request::Transform {
            babel: &self.babel,
            code,
            options,
        })?;

        Ok(TransformOutput { code })
    }

    fn build_external_helpers(
        &self,
        whitelist: Option<&[String]>,
        output_type: OutputType,
    ) -> Result<String> {
        self.call(&Request::Helpers {
            babel: &self.babel,
            whitelist,
            output_type,
        })
    }
}
