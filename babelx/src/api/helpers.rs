//! Command-line interface to the external helpers builder

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::getopt::{Getopt, Opt, OptArg};
use crate::helpers::{build_external_helpers, parse_whitelist, OutputType};
use crate::transform::Transformer;
use crate::{Error, Result};

const SHORT_OPTIONS: &str = "hl:t:o:";

const LONG_OPTIONS: &[&str] = &["help", "whitelist=s", "output-type=s", "output=s"];

/// Command-line arguments structure
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Opts {
    /// Only include these helpers
    pub whitelist: Option<Vec<String>>,
    /// Module format of the bundle
    pub output_type: OutputType,
    /// Output file (defaults to stdout)
    pub output: Option<PathBuf>,
}

/// Action requested on the command line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Print usage information
    Help,
    /// Build the helpers bundle
    Run(Opts),
}

/// Parse the command line
pub fn parse_args<I, S>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let getopt = Getopt::from_spec(SHORT_OPTIONS, LONG_OPTIONS)?;
    let mut opts = Opts::default();
    let mut help = false;

    let operands = getopt.parse(args, |m| -> Result<()> {
        let (opt, arg) = m?;

        let name = match opt {
            Opt::Short('h') => "help".to_owned(),
            Opt::Short('l') => "whitelist".to_owned(),
            Opt::Short('t') => "output-type".to_owned(),
            Opt::Short('o') => "output".to_owned(),
            Opt::Short(c) => c.to_string(),
            Opt::Long(name) => name,
        };

        match (name.as_str(), arg) {
            ("help", _) => help = true,
            ("whitelist", OptArg::Value(list)) => opts.whitelist = Some(parse_whitelist(&list)),
            ("output-type", OptArg::Value(t)) => opts.output_type = t.parse()?,
            ("output", OptArg::Value(path)) => {
                opts.output = if path == "-" {
                    None
                } else {
                    Some(PathBuf::from(path))
                }
            }
            _ => {}
        }

        Ok(())
    })?;

    if help {
        return Ok(Command::Help);
    }

    if !operands.is_empty() {
        warn!("ignoring operands: {}", operands.join(" "));
    }

    Ok(Command::Run(opts))
}

/// Print usage information
pub fn usage(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "babel-external-helpers [options]")?;
    writeln!(out)?;
    writeln!(out, "Options:")?;
    writeln!(out, "    -o [outfile]             Write output to file.")?;
    writeln!(out, "    -h, --help               Display usage information.")?;
    writeln!(out, "    -l, --whitelist [list]   Whitelist of helpers to ONLY include.")?;
    writeln!(out, "    -t, --output-type [type] Type of output (export|global|umd|var).")
}

/// Build the helpers bundle and write it, followed by a newline, to the output
pub fn run<T: Transformer + ?Sized>(
    opts: &Opts,
    transformer: &T,
    stdout: &mut dyn Write,
) -> Result<()> {
    let mut code =
        build_external_helpers(transformer, opts.whitelist.as_deref(), opts.output_type)?;
    code.push('\n');

    match &opts.output {
        Some(path) => {
            let mut file = File::create(path).map_err(|source| Error::CantCreate {
                path: path.to_owned(),
                source,
            })?;

            file.write_all(code.as_bytes())?;
        }
        None => {
            stdout.write_all(code.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Entry point for the babel-external-helpers front-end
///
/// # Returns
///
/// The process exit status
#[cfg(feature = "cli")]
pub fn main<I>(args: I) -> i32
where
    I: IntoIterator<Item = std::ffi::OsString>,
{
    use crate::exit;

    super::init_logger(false);

    let config = crate::config::Config::from_env();

    let mut stdout = io::stdout();
    let result = super::collect_args(args)
        .and_then(parse_args)
        .and_then(|command| match command {
            Command::Help => usage(&mut stdout).map_err(Error::from),
            Command::Run(opts) => run(&opts, &config.transformer(), &mut stdout),
        });

    match result {
        Ok(()) => exit::OK,
        Err(error) => {
            super::report(&error, &mut io::stderr());

            // The helpers builder only fails on bad arguments
            match error {
                Error::Transform { .. } => exit::USAGE,
                other => other.exit_code(),
            }
        }
    }
}
