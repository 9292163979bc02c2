//! External helpers tests

use pretty_assertions::assert_eq;

use babelx::api::helpers::{self as cli, Command};
use babelx::helpers::{build_external_helpers, parse_whitelist, var_to_export, OutputType};
use babelx::{exit, Error};

mod common;
use common::MockTransformer;

const VAR_HELPERS: &str = "var babelHelpers = {};
babelHelpers.typeof = function (obj) { return typeof obj; };
babelHelpers.classCallCheck = function (instance, Constructor) {};
babelHelpers;";

#[test]
fn var_to_export_rewrite() {
    assert_eq!(
        var_to_export(VAR_HELPERS),
        "var _typeof = function (obj) { return typeof obj; };
var _classCallCheck = function (instance, Constructor) {};
export { _typeof as typeof };
export { _classCallCheck as classCallCheck };"
    );
}

#[test]
fn var_to_export_keeps_other_lines() {
    assert_eq!(
        var_to_export("(function () {\nbabelHelpers.x1 = 1;\n})();"),
        "(function () {\nbabelHelpers.x1 = 1;\n})();"
    );
}

#[test]
fn export_falls_back_to_var() {
    let transformer = MockTransformer::new();
    let whitelist = parse_whitelist("typeof");

    assert_eq!(
        build_external_helpers(&transformer, Some(&whitelist[..]), OutputType::Export)
            .expect("failed to build helpers"),
        "var _typeof = function () {};\nexport { _typeof as typeof };"
    );
}

#[test]
fn native_export() {
    let transformer = MockTransformer {
        export_helpers: true,
        ..Default::default()
    };

    assert_eq!(
        build_external_helpers(&transformer, None, OutputType::Export)
            .expect("failed to build helpers"),
        "var babelHelpers = {};
babelHelpers.typeof = function () {};
babelHelpers.classCallCheck = function () {};
babelHelpers;"
    );
}

#[test]
fn whitelist() {
    assert_eq!(parse_whitelist(" a, b,,c "), vec!["a", "b", "c"]);
    assert!(parse_whitelist("").is_empty());
}

#[test]
fn output_types() {
    assert_eq!("umd".parse::<OutputType>().ok(), Some(OutputType::Umd));
    assert_eq!(OutputType::default(), OutputType::Global);
    assert_eq!(OutputType::Var.to_string(), "var");

    let error = "cjs".parse::<OutputType>().expect_err("unknown output type");
    assert_eq!(error.exit_code(), exit::USAGE);
}

#[test]
fn parse_command_line() {
    let command = cli::parse_args(vec![
        "-l",
        "typeof, classCallCheck",
        "--output-type=var",
        "-o",
        "h.js",
    ])
    .expect("failed to parse");

    assert_eq!(
        command,
        Command::Run(cli::Opts {
            whitelist: Some(vec!["typeof".to_owned(), "classCallCheck".to_owned()]),
            output_type: OutputType::Var,
            output: Some("h.js".into()),
        })
    );

    assert_eq!(
        cli::parse_args(vec!["--output", "-"]).expect("failed to parse"),
        Command::Run(cli::Opts::default())
    );
    assert_eq!(
        cli::parse_args(vec!["-h"]).expect("failed to parse"),
        Command::Help
    );
}

#[test]
fn parse_errors() {
    let error = cli::parse_args(vec!["-t", "cjs"]).expect_err("unknown output type");
    assert!(matches!(&error, Error::InvalidOutputType(t) if t == "cjs"), "{:?}", error);

    let error = cli::parse_args(vec!["--whitelist"]).expect_err("missing whitelist");
    assert_eq!(error.exit_code(), exit::USAGE);
}

#[test]
fn run_to_stdout() {
    common::init_logger();

    let transformer = MockTransformer::new();
    let mut stdout: Vec<u8> = Vec::new();

    cli::run(
        &cli::Opts {
            whitelist: Some(vec!["typeof".to_owned()]),
            output_type: OutputType::Var,
            output: None,
        },
        &transformer,
        &mut stdout,
    )
    .expect("run failed");

    assert_eq!(
        String::from_utf8(stdout).expect("non-utf8 output"),
        "var babelHelpers = {};\nbabelHelpers.typeof = function () {};\nbabelHelpers;\n"
    );
}

#[test]
fn run_to_file() {
    let dir = tempfile::tempdir().expect("failed to create directory");
    let path = dir.path().join("helpers.js");

    let transformer = MockTransformer::new();
    let mut stdout: Vec<u8> = Vec::new();

    cli::run(
        &cli::Opts {
            whitelist: Some(vec!["typeof".to_owned()]),
            output_type: OutputType::Export,
            output: Some(path.clone()),
        },
        &transformer,
        &mut stdout,
    )
    .expect("run failed");

    assert!(stdout.is_empty());
    assert_eq!(
        std::fs::read_to_string(&path).expect("failed to read output"),
        "var _typeof = function () {};\nexport { _typeof as typeof };\n"
    );
}

#[test]
fn usage() {
    let mut out: Vec<u8> = Vec::new();
    cli::usage(&mut out).expect("failed to write usage");

    let usage = String::from_utf8(out).expect("non-utf8 usage");
    assert!(usage.starts_with("babel-external-helpers [options]\n"));
    assert!(usage.contains("--output-type"));
}
