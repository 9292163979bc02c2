use std::cell::RefCell;
use std::io::Cursor;

use babelx::api::cli::{self, Opts};
use babelx::api::Streams;
use babelx::helpers::OutputType;
use babelx::registry::Registry;
use babelx::resolve::StaticResolver;
use babelx::transform::{TransformOptions, TransformOutput, Transformer};
use babelx::{Error, Result};

/// Marker making [MockTransformer] fail on an input
#[allow(dead_code)]
pub const SYNTAX_ERROR: &str = "@@syntax-error";

/// Transformer returning its input unchanged and recording every call
#[derive(Default)]
pub struct MockTransformer {
    pub calls: RefCell<Vec<TransformOptions>>,
    pub export_helpers: bool,
    /// Fail every call as if the transformer library could not be loaded
    pub unavailable: bool,
}

impl MockTransformer {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plugin module lists passed to each call
    #[allow(dead_code)]
    pub fn modules(&self) -> Vec<Vec<String>> {
        self.calls
            .borrow()
            .iter()
            .map(|options| options.plugins.iter().map(|p| p.module.clone()).collect())
            .collect()
    }
}

impl Transformer for MockTransformer {
    fn transform(&self, code: &str, options: &TransformOptions) -> Result<TransformOutput> {
        self.calls.borrow_mut().push(options.clone());

        if self.unavailable {
            return Err(Error::TransformerUnavailable {
                module: "babel-core".to_owned(),
                message: "Cannot find module 'babel-core'".to_owned(),
            });
        }

        if code.contains(SYNTAX_ERROR) {
            return Err(Error::Transform {
                message: format!(
                    "{}: Unexpected token (1:0)",
                    options.filename.as_deref().unwrap_or("unknown")
                ),
                code_frame: Some("> 1 | @@syntax-error\n    | ^".to_owned()),
            });
        }

        Ok(TransformOutput {
            code: code.trim_end().to_owned(),
        })
    }

    fn build_external_helpers(
        &self,
        whitelist: Option<&[String]>,
        output_type: OutputType,
    ) -> Result<String> {
        if output_type == OutputType::Export && !self.export_helpers {
            return Err(Error::Transform {
                message: "Unsupported output type export".to_owned(),
                code_frame: None,
            });
        }

        let names = whitelist
            .map(|w| w.to_vec())
            .unwrap_or_else(|| vec!["typeof".to_owned(), "classCallCheck".to_owned()]);

        let mut lines = vec!["var babelHelpers = {};".to_owned()];
        for name in names {
            lines.push(format!("babelHelpers.{} = function () {{}};", name));
        }
        lines.push("babelHelpers;".to_owned());

        Ok(lines.join("\n"))
    }
}

/// Resolver knowing every plugin of the registry, as `babel-plugin-<name>`
#[allow(dead_code)]
pub fn resolver(registry: &Registry) -> StaticResolver {
    registry
        .plugin_names()
        .into_iter()
        .map(|name| (name, format!("babel-plugin-{}", name)))
        .collect()
}

/// Result of a driver run with in-memory streams
#[allow(dead_code)]
pub struct RunOutput {
    pub result: Result<()>,
    pub stdout: String,
    pub stderr: String,
}

/// Parse `args` against the builtin registry and run the driver
#[allow(dead_code)]
pub fn run(args: &[&str], stdin: &str, transformer: &MockTransformer) -> RunOutput {
    let registry = Registry::builtin();
    let opts = match parse(&registry, args) {
        Ok(opts) => opts,
        Err(error) => {
            return RunOutput {
                result: Err(error),
                stdout: String::new(),
                stderr: String::new(),
            }
        }
    };

    run_opts(&opts, &registry, stdin, transformer)
}

#[allow(dead_code)]
pub fn parse(registry: &Registry, args: &[&str]) -> Result<Opts> {
    match cli::parse_args(registry, args.iter().copied())? {
        cli::Command::Run(opts) => Ok(opts),
        other => panic!("expected a run command, got {:?}", other),
    }
}

#[allow(dead_code)]
pub fn run_opts(
    opts: &Opts,
    registry: &Registry,
    stdin: &str,
    transformer: &MockTransformer,
) -> RunOutput {
    init_logger();

    let resolver = resolver(registry);
    let mut stdin = Cursor::new(stdin.as_bytes().to_vec());
    let mut stdout: Vec<u8> = Vec::new();
    let mut stderr: Vec<u8> = Vec::new();

    let result = cli::run(
        opts,
        registry,
        transformer,
        &resolver,
        &mut Streams {
            stdin: &mut stdin,
            stdout: &mut stdout,
            stderr: &mut stderr,
        },
    );

    RunOutput {
        result,
        stdout: String::from_utf8(stdout).expect("non-utf8 stdout"),
        stderr: String::from_utf8(stderr).expect("non-utf8 stderr"),
    }
}

#[allow(dead_code)]
pub fn init_logger() {
    env_logger::builder()
        .format_timestamp(None)
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init()
        .ok();
}
