//! Command-line interface to babelx
//!
//! The option schema is generated from the [Registry]: every preset becomes a `--<preset>` flag
//! and every plugin a `--[no-]<plugin>[=<sub-options>]` option, also reachable without its
//! `transform-` prefix.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{report, Streams};
use crate::getopt::{ArgKind, Getopt, GetoptError, Opt, OptArg};
use crate::registry::Registry;
use crate::resolve::Resolver;
use crate::selection::{coerce_options, Selection};
use crate::transform::{PluginSpec, TransformOptionsBuilder, Transformer};
use crate::{exit, getsubopt, Error, Result};

const SHORT_OPTIONS: &str = "hVvko:";

const LONG_OPTIONS: &[&str] = &[
    "help",
    "version",
    "verbose!",
    "keep-going!",
    "babelrc!",
    "comments!",
    "compact!",
    "output=s",
    "preset=s",
    "check",
];

/// Command-line arguments structure
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Opts {
    /// Input files. Standard input is read if there are none, or for `-`.
    pub inputs: Vec<PathBuf>,
    /// Output file (defaults to stdout)
    pub output: Option<PathBuf>,
    /// Log informational messages
    pub verbose: bool,
    /// Keep transforming the remaining inputs after a failed one
    pub keep_going: bool,
    /// Let the transformer read `.babelrc` files
    pub babelrc: bool,
    /// Keep comments
    pub comments: Option<bool>,
    /// Compact output
    pub compact: Option<bool>,
    /// Selected plugins
    pub selection: Selection,
}

/// Action requested on the command line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Print usage information
    Help,
    /// Print version information
    Version,
    /// Check that every known plugin can be resolved
    Check,
    /// Transform the inputs
    Run(Opts),
}

// Parsing stops early for --help and --version
enum Stop {
    Command(Command),
    Failed(Error),
}

impl From<Error> for Stop {
    fn from(error: Error) -> Self {
        Self::Failed(error)
    }
}

/// Build the option schema for a registry
pub fn schema(registry: &Registry) -> Result<Getopt> {
    let mut getopt = Getopt::from_spec(SHORT_OPTIONS, LONG_OPTIONS)?;

    for preset in registry.preset_names() {
        if !getopt.has_long(preset) {
            getopt.long_option(preset, ArgKind::Flag);
        }
    }

    let plugins = registry.plugin_names();
    for plugin in &plugins {
        if !getopt.has_long(plugin) {
            getopt.long_option(*plugin, ArgKind::Optional);
        }
    }

    // --transform-this-that == --this-that
    for plugin in &plugins {
        if let Some(alias) = plugin.strip_prefix("transform-") {
            if !getopt.has_long(alias) {
                getopt.long_option(alias, ArgKind::Optional);
            }
        }
    }

    Ok(getopt)
}

/// Parse the command line
///
/// # Parameters
///
/// * `registry`: registry to build the option schema from
/// * `args`: arguments, without the program name
pub fn parse_args<I, S>(registry: &Registry, args: I) -> Result<Command>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let getopt = schema(registry)?;
    let mut opts = Opts::default();
    let mut check = false;

    let parsed = getopt.parse(args, |m| -> std::result::Result<(), Stop> {
        let (opt, arg) = m.map_err(Error::from)?;

        let name = match opt {
            Opt::Short('h') => return Err(Stop::Command(Command::Help)),
            Opt::Short('V') => return Err(Stop::Command(Command::Version)),
            Opt::Short('v') => "verbose".to_owned(),
            Opt::Short('k') => "keep-going".to_owned(),
            Opt::Short('o') => "output".to_owned(),
            other @ Opt::Short(_) => {
                return Err(Error::from(GetoptError::Unrecognized(other)).into())
            }
            Opt::Long(name) => name,
        };

        match name.as_str() {
            "help" => return Err(Stop::Command(Command::Help)),
            "version" => return Err(Stop::Command(Command::Version)),
            "check" => check = true,
            "verbose" => opts.verbose = is_set(&arg),
            "keep-going" => opts.keep_going = is_set(&arg),
            "babelrc" => opts.babelrc = is_set(&arg),
            "comments" => opts.comments = Some(is_set(&arg)),
            "compact" => opts.compact = Some(is_set(&arg)),
            "output" => opts.output = output_path(arg),
            "preset" => {
                if let OptArg::Value(presets) = arg {
                    apply_presets(registry, &mut opts.selection, &presets)?;
                }
            }
            other => select(registry, &mut opts.selection, other, arg)?,
        }

        Ok(())
    });

    let operands = match parsed {
        Ok(operands) => operands,
        Err(Stop::Command(command)) => return Ok(command),
        Err(Stop::Failed(error)) => return Err(error),
    };

    if check {
        return Ok(Command::Check);
    }

    opts.inputs = operands.into_iter().map(PathBuf::from).collect();
    Ok(Command::Run(opts))
}

fn is_set(arg: &OptArg) -> bool {
    match arg {
        OptArg::Bool(set) => *set,
        OptArg::Value(_) => true,
    }
}

fn output_path(arg: OptArg) -> Option<PathBuf> {
    match arg {
        OptArg::Value(path) if path != "-" => Some(PathBuf::from(path)),
        _ => None,
    }
}

fn apply_presets(registry: &Registry, selection: &mut Selection, presets: &str) -> Result<()> {
    for name in presets.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let entries = registry
            .preset(name)
            .ok_or_else(|| Error::UnknownPreset(name.to_owned()))?;

        debug!("applying preset {}", name);
        selection.apply_preset(entries);
    }

    Ok(())
}

fn select(registry: &Registry, selection: &mut Selection, name: &str, arg: OptArg) -> Result<()> {
    if let Some(entries) = registry.preset(name) {
        debug!("applying preset {}", name);
        selection.apply_preset(entries);
        return Ok(());
    }

    let plugin = registry
        .canonical_plugin(name)
        .ok_or_else(|| Error::UnknownPlugin(name.to_owned()))?;

    match arg {
        OptArg::Bool(true) => selection.enable(plugin, None),
        OptArg::Bool(false) => selection.disable(plugin),
        OptArg::Value(value) => {
            let options =
                coerce_options(plugin, &getsubopt(&value), registry.plugin_options(plugin))?;
            selection.enable(plugin, Some(options));
        }
    }

    Ok(())
}

/// Resolve the selected plugins into the list handed to the transformer
///
/// Disabled plugins are dropped and the registry's ordering rules are applied. Plugins the
/// resolver cannot find are skipped with a warning.
pub fn assemble<R: Resolver + ?Sized>(
    selection: &Selection,
    registry: &Registry,
    resolver: &R,
) -> Vec<PluginSpec> {
    selection
        .ordered(registry.order_rules())
        .into_iter()
        .filter_map(|(name, options)| {
            info!("requiring {}", name);

            match resolver.resolve(name) {
                Some(handle) => Some(PluginSpec {
                    name: handle.name,
                    module: handle.module,
                    options: options.cloned(),
                }),
                None => {
                    warn!("unable to load plugin {}", name);
                    None
                }
            }
        })
        .collect()
}

/// Transform the inputs
///
/// Results are written to the output file, opened once, or standard output, each followed by a
/// newline. Unless [Opts::keep_going] is set, the first failing input aborts the run.
pub fn run<T, R>(
    opts: &Opts,
    registry: &Registry,
    transformer: &T,
    resolver: &R,
    streams: &mut Streams<'_>,
) -> Result<()>
where
    T: Transformer + ?Sized,
    R: Resolver + ?Sized,
{
    let mut options = TransformOptionsBuilder::default()
        .babelrc(opts.babelrc)
        .comments(opts.comments)
        .compact(opts.compact)
        .plugins(assemble(&opts.selection, registry, resolver))
        .build()
        .map_err(|e| Error::Options(e.to_string()))?;

    let mut file;
    let output: &mut dyn Write = match &opts.output {
        Some(path) => {
            file = BufWriter::new(File::create(path).map_err(|source| Error::CantCreate {
                path: path.to_owned(),
                source,
            })?);
            &mut file
        }
        None => &mut *streams.stdout,
    };

    let stdin_only = [PathBuf::from("-")];
    let inputs = if opts.inputs.is_empty() {
        &stdin_only[..]
    } else {
        &opts.inputs[..]
    };

    let mut failed = 0;
    let mut status = exit::OK;

    for input in inputs {
        let result = if input == Path::new("-") {
            info!("transforming stdin");
            options.filename = Some("<stdin>".to_owned());

            let mut code = String::new();
            streams.stdin.read_to_string(&mut code)?;
            transformer.transform(&code, &options)
        } else {
            info!("transforming {}", input.display());
            options.filename = Some(input.to_string_lossy().into_owned());
            transformer.transform_file(input, &options)
        };

        match result {
            Ok(result) => {
                output.write_all(result.code.as_bytes())?;
                output.write_all(b"\n")?;
            }
            Err(error) if opts.keep_going && error.is_per_input() => {
                report(&error, streams.stderr);
                failed += 1;
                status = error.exit_code();
            }
            Err(error) => return Err(error),
        }
    }

    output.flush()?;

    if failed > 0 {
        Err(Error::Incomplete { failed, status })
    } else {
        Ok(())
    }
}

/// Print usage information, including the known presets and plugins
pub fn usage(registry: &Registry, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "babelx [options] infile...")?;
    writeln!(out)?;
    writeln!(out, "options:")?;
    writeln!(out, "    -o outfile")?;
    writeln!(out, "    -h / --help")?;
    writeln!(out, "    -v / --[no-]verbose")?;
    writeln!(out, "    -V / --version")?;
    writeln!(out, "    -k / --[no-]keep-going")?;
    writeln!(out, "    --[no-]babelrc")?;
    writeln!(out, "    --[no-]comments")?;
    writeln!(out, "    --[no-]compact")?;
    writeln!(out, "    --check")?;
    writeln!(out, "    --preset name[,name...]")?;
    writeln!(out, "    --[no-]plugin[=option,option=value...]")?;

    writeln!(out)?;
    writeln!(out, "presets:")?;
    for preset in registry.preset_names() {
        writeln!(out, "    --{}", preset)?;
    }

    writeln!(out)?;
    writeln!(out, "plugins:")?;
    for plugin in registry.plugin_names() {
        writeln!(out, "    --{}", plugin)?;
    }

    Ok(())
}

/// Print version information
pub fn version(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "babelx version {}", env!("CARGO_PKG_VERSION"))
}

/// Report every registry plugin, and every preset entry, the resolver cannot find
///
/// # Returns
///
/// `true` if everything was resolved
pub fn check<R: Resolver + ?Sized>(
    registry: &Registry,
    resolver: &R,
    out: &mut dyn Write,
) -> Result<bool> {
    let mut ok = true;

    for plugin in registry.plugin_names() {
        if resolver.resolve(plugin).is_none() {
            writeln!(out, "require {}", plugin)?;
            ok = false;
        }
    }

    for (preset, entries) in registry.presets() {
        for entry in entries {
            if resolver.resolve(entry.name()).is_none() {
                writeln!(out, "require {} - {}", preset, entry.name())?;
                ok = false;
            }
        }
    }

    Ok(ok)
}

#[cfg(feature = "cli")]
fn try_main<I>(config: &crate::config::Config, args: I, streams: &mut Streams<'_>) -> Result<i32>
where
    I: IntoIterator<Item = std::ffi::OsString>,
{
    let registry = config.load_registry()?;

    match parse_args(&registry, super::collect_args(args)?)? {
        Command::Help => {
            usage(&registry, streams.stdout)?;
            Ok(exit::OK)
        }
        Command::Version => {
            version(streams.stdout)?;
            Ok(exit::OK)
        }
        Command::Check => {
            super::init_logger(false);
            info!("using {} registry", config.registry_source());

            let resolver = config.resolver()?;
            if check(&registry, &resolver, streams.stdout)? {
                Ok(exit::OK)
            } else {
                Ok(exit::FAILURE)
            }
        }
        Command::Run(opts) => {
            super::init_logger(opts.verbose);
            info!("using {} registry", config.registry_source());

            let resolver = config.resolver()?;
            let transformer = config.transformer();
            run(&opts, &registry, &transformer, &resolver, streams)?;
            Ok(exit::OK)
        }
    }
}

/// Entry point for the babelx front-end
///
/// # Parameters
///
/// * `args`: command-line arguments, without the program name
///
/// # Returns
///
/// The process exit status
#[cfg(feature = "cli")]
pub fn main<I>(args: I) -> i32
where
    I: IntoIterator<Item = std::ffi::OsString>,
{
    let config = crate::config::Config::from_env();

    let mut stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let mut streams = Streams {
        stdin: &mut stdin,
        stdout: &mut stdout,
        stderr: &mut stderr,
    };

    match try_main(&config, args, &mut streams) {
        Ok(status) => status,
        Err(error) => {
            report(&error, streams.stderr);
            error.exit_code()
        }
    }
}
