//! babel-external-helpers writes the Babel runtime helpers to a standalone bundle, for code
//! transformed with the `external-helpers` plugin.
//!
//! # Command-line usage
//!
//! ```bash
//! babel-external-helpers [options]
//!
//! Options:
//!     -o [outfile]             Write output to file.
//!     -h, --help               Display usage information.
//!     -l, --whitelist [list]   Whitelist of helpers to ONLY include.
//!     -t, --output-type [type] Type of output (export|global|umd|var).
//! ```

use std::io::Write;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let status = babelx::api::helpers::main(std::env::args_os().skip(1));

    std::io::stdout()
        .flush()
        .context("failed to flush standard output")?;

    std::process::exit(status)
}
