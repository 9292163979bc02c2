use std::ffi::OsString;
use std::io::{Read, Write};

use crate::{Error, Result};

/// Standard streams of a front-end invocation
pub struct Streams<'a> {
    /// Standard input
    pub stdin: &'a mut dyn Read,
    /// Standard output
    pub stdout: &'a mut dyn Write,
    /// Standard error
    pub stderr: &'a mut dyn Write,
}

/// Convert raw command-line arguments, rejecting any that are not valid UTF-8
pub fn collect_args<I>(args: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| arg.into_string().map_err(Error::InvalidArgument))
        .collect()
}

/// Print an error, with its source excerpt if it has one
pub fn report(error: &Error, stderr: &mut dyn Write) {
    // Nowhere left to report a failing stderr
    let _ = writeln!(stderr, "{}", error);

    if let Error::Transform {
        code_frame: Some(code_frame),
        ..
    } = error
    {
        let _ = writeln!(stderr, "{}", code_frame);
    }
}

/// Initialize logging, honouring `RUST_LOG`
///
/// # Parameters
///
/// * `verbose`: log informational messages by default
#[cfg(feature = "cli")]
pub fn init_logger(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_module_path(false)
        .try_init()
        .ok();
}
