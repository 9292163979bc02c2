//! babelx is a command-line front-end for the [Babel](https://babeljs.io) JavaScript transformer.
//!
//! Babel itself does all the source-to-source work. This crate provides the pieces around it:
//!
//! * [getopt](getopt/index.html): a `getopt_long` work-alike with short options, long options,
//!   `--no-` negated booleans and inline values
//! * [getsubopt]: parsing of `key=value,key` sub-option strings
//! * [registry](registry/index.html): known plugins, presets and plugin option schemas
//! * [selection](selection/index.html): plugin selection and option coercion
//! * [resolve](resolve/index.html): mapping plugin names to loadable modules
//! * [transform](transform/index.html): the transformer interface and its Node.js backend
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
//! # Examples
//!
//! ```bash
//! # Transform `app.js` with the es2015 preset into `app.es5.js`
//! babelx --es2015 -o app.es5.js app.js
//!
//! # Same thing, with loose classes and without the arrow function transform
//! babelx --preset es2015 --es2015-classes=loose --no-es2015-arrow-functions < app.js
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

mod error;
pub use error::*;

/// babelx Result
pub type Result<T> = std::result::Result<T, Error>;

pub mod api;
pub mod config;
pub mod exit;
pub mod getopt;
pub mod helpers;
pub mod registry;
pub mod resolve;
pub mod selection;
pub mod transform;

mod getsubopt;
pub use getsubopt::{getsubopt, SubOptions};
