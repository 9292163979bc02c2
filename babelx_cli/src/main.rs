//! babelx is a command-line front-end for the [Babel](https://babeljs.io) JavaScript transformer.
//! To drive the option parsing or the plugin selection from Rust code, see the documentation for
//! the [babelx](../babelx/index.html) crate.
//!
//! Babel is run through Node.js: `node` and the `babel-core` module must be available. Plugins are
//! looked up in `babel-plugin/` and `node_modules/` directories of the current directory and its
//! ancestors, then in `$BABELX_PLUGIN_PATH`.
//!
//! # Command-line usage
//!
//! ```bash
//! babelx [options] infile...
//!
//! options:
//!     -o outfile
//!     -h / --help
//!     -v / --[no-]verbose
//!     -V / --version
//!     -k / --[no-]keep-going
//!     --[no-]babelrc
//!     --[no-]comments
//!     --[no-]compact
//!     --check
//!     --preset name[,name...]
//!     --[no-]plugin[=option,option=value...]
//! ```
//!
//! # Environment
//!
//! * `BABELX_NODE`: Node.js executable (`node`)
//! * `BABELX_BABEL`: Babel module (`babel-core`)
//! * `BABELX_PLUGIN_PATH`: additional plugin directories
//! * `BABELX_REGISTRY`: JSON file replacing the builtin plugin and preset registry
//! * `RUST_LOG`: log filter
//!
//! # Examples
//!
//! ```bash
//! # Transform `app.js` with the es2015 preset into `app.es5.js`
//! babelx --es2015 -o app.es5.js app.js
//!
//! # Strip flow annotations and JSX from standard input
//! babelx --flow-strip-types --react-jsx=pragma=h < view.js
//! ```

use std::io::Write;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let status = babelx::api::cli::main(std::env::args_os().skip(1));

    std::io::stdout()
        .flush()
        .context("failed to flush standard output")?;

    std::process::exit(status)
}
