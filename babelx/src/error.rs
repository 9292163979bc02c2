use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::exit;
use crate::getopt::GetoptError;
use crate::registry::ValueType;

/// babelx error type
#[derive(Debug, Error)]
pub enum Error {
    /// Command-line parsing error
    #[error(transparent)]
    Usage(#[from] GetoptError),
    /// Flag naming neither a plugin nor a preset
    #[error("unknown plugin/preset: {0}")]
    UnknownPlugin(String),
    /// Unknown `--preset` value
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
    /// Sub-options given to a plugin without an option schema
    #[error("plugin {0} does not take options")]
    PluginTakesNoOptions(String),
    /// Sub-option not part of the plugin's option schema
    #[error("unknown option {key} for plugin {plugin}")]
    UnknownPluginOption {
        /// Plugin name
        plugin: String,
        /// Offending option key
        key: String,
    },
    /// Non-boolean sub-option given without a value
    #[error("option {key} for plugin {plugin} requires a value")]
    MissingPluginOptionValue {
        /// Plugin name
        plugin: String,
        /// Offending option key
        key: String,
    },
    /// Sub-option value not matching the schema's value type
    #[error("invalid value {value:?} for option {key} of plugin {plugin}: expected {expected}")]
    InvalidPluginOption {
        /// Plugin name
        plugin: String,
        /// Offending option key
        key: String,
        /// Type declared in the plugin's option schema
        expected: ValueType,
        /// Value given on the command line
        value: String,
    },
    /// Unknown external helpers output type
    #[error("unsupported output type: {0} (expected export, global, umd or var)")]
    InvalidOutputType(String),
    /// The transformer rejected its input
    #[error("{message}")]
    Transform {
        /// Transformer error message
        message: String,
        /// Excerpt of the offending source, if available
        code_frame: Option<String>,
    },
    /// Input file could not be read
    #[error("{}: {source}", path.display())]
    Input {
        /// Path to the input
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
    /// Output file could not be created
    #[error("{}: {source}", path.display())]
    CantCreate {
        /// Path to the output
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
    /// Registry file could not be parsed
    #[error("invalid registry {}: {source}", path.display())]
    Registry {
        /// Path to the registry file
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },
    /// The transformer process could not be started
    #[error("failed to start {program}: {source}")]
    Unavailable {
        /// Program name
        program: String,
        /// Underlying error
        source: io::Error,
    },
    /// The transformer process started but could not load the transformer library
    #[error("failed to load {module}: {message}")]
    TransformerUnavailable {
        /// Module name of the transformer library
        module: String,
        /// Loader error message
        message: String,
    },
    /// Non UTF-8 command-line argument
    #[error("invalid argument: {0:?}")]
    InvalidArgument(std::ffi::OsString),
    /// Protocol failure while talking to the transformer process
    #[error("transformer bridge failure: {0}")]
    Bridge(String),
    /// Malformed bridge message
    #[error("transformer bridge failure: {0}")]
    Json(#[from] serde_json::Error),
    /// Transform options could not be assembled
    #[error("invalid transform options: {0}")]
    Options(String),
    /// Some inputs of a keep-going run failed
    #[error("{failed} input(s) failed")]
    Incomplete {
        /// Number of failed inputs
        failed: usize,
        /// Exit status of the last failure
        status: i32,
    },
    /// I/O error
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_)
            | Self::UnknownPlugin(_)
            | Self::UnknownPreset(_)
            | Self::PluginTakesNoOptions(_)
            | Self::UnknownPluginOption { .. }
            | Self::MissingPluginOptionValue { .. }
            | Self::InvalidPluginOption { .. }
            | Self::InvalidOutputType(_)
            | Self::InvalidArgument(_) => exit::USAGE,
            Self::Transform { .. } => exit::DATAERR,
            Self::Input { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                exit::NOINPUT
            }
            Self::Input { .. } | Self::Io(_) => exit::IOERR,
            Self::CantCreate { .. } => exit::CANTCREAT,
            Self::Registry { .. } => exit::CONFIG,
            Self::Unavailable { .. } | Self::TransformerUnavailable { .. } => exit::UNAVAILABLE,
            Self::Bridge(_) | Self::Json(_) | Self::Options(_) => exit::SOFTWARE,
            Self::Incomplete { status, .. } => *status,
        }
    }

    /// Return `true` if this error only concerns the current input
    pub fn is_per_input(&self) -> bool {
        matches!(self, Self::Transform { .. } | Self::Input { .. })
    }
}
