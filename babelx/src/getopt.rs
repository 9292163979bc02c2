//! Command-line option parsing
//!
//! A small `getopt_long` work-alike. Options are declared up-front in a [Getopt] schema, then
//! [Getopt::parse] walks the argument list left to right, invoking a callback for every option it
//! finds and returning the positional operands.
//!
//! ```
//! use babelx::getopt::{Getopt, Opt, OptArg};
//!
//! let getopt = Getopt::from_spec("vo:", &["verbose!", "preset=s"]).unwrap();
//!
//! let mut seen = Vec::new();
//! let operands = getopt
//!     .parse(vec!["-vo", "out.js", "--no-verbose", "in.js"], |m| {
//!         seen.push(m?);
//!         Ok::<_, babelx::getopt::GetoptError>(())
//!     })
//!     .unwrap();
//!
//! assert_eq!(operands, vec!["in.js".to_owned()]);
//! assert_eq!(seen[0], (Opt::Short('v'), OptArg::Bool(true)));
//! assert_eq!(seen[1], (Opt::Short('o'), OptArg::Value("out.js".to_owned())));
//! assert_eq!(seen[2], (Opt::long("verbose"), OptArg::Bool(false)));
//! ```

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Argument requirements of a declared option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// The option never takes a value
    Flag,
    /// Boolean option, negatable with the `--no-` prefix
    Boolean,
    /// The option requires a value, either inline or as the next argument
    Required,
    /// Negatable boolean option which also accepts an inline `--name=value`
    Optional,
}

impl ArgKind {
    fn negatable(self) -> bool {
        matches!(self, Self::Boolean | Self::Optional)
    }

    fn accepts_inline_value(self) -> bool {
        matches!(self, Self::Required | Self::Optional)
    }
}

/// Option identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Opt {
    /// Single-character option, `-o`
    Short(char),
    /// Long option, `--name`
    Long(String),
}

impl Opt {
    /// Create a long option identifier
    pub fn long(name: impl Into<String>) -> Self {
        Self::Long(name.into())
    }
}

impl fmt::Display for Opt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short(c) => write!(f, "-{}", c),
            Self::Long(name) => write!(f, "--{}", name),
        }
    }
}

/// Value reported for a matched option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptArg {
    /// `true` for flags and set booleans, `false` for `--no-` booleans
    Bool(bool),
    /// Option value
    Value(String),
}

/// Error signal reported through the parse callback
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetoptError {
    /// Option not present in the schema
    #[error("unrecognized option '{0}'")]
    Unrecognized(Opt),
    /// Inline value given to an option which does not take one
    #[error("option '{0}' doesn't allow an argument")]
    NoArgumentAllowed(Opt),
    /// End of input reached while waiting for the option's value
    #[error("option '{0}' requires an argument")]
    MissingArgument(Opt),
    /// Malformed schema declaration
    #[error("invalid option declaration: {0:?}")]
    InvalidDeclaration(String),
}

impl GetoptError {
    /// Option the error refers to, if any
    pub fn opt(&self) -> Option<&Opt> {
        match self {
            Self::Unrecognized(opt) | Self::NoArgumentAllowed(opt) | Self::MissingArgument(opt) => {
                Some(opt)
            }
            Self::InvalidDeclaration(_) => None,
        }
    }
}

/// Result of matching one option
pub type Match = (Opt, OptArg);

/// Option schema
#[derive(Default, Debug, Clone)]
pub struct Getopt {
    short: HashMap<char, ArgKind>,
    long: HashMap<String, ArgKind>,
}

impl Getopt {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a schema from getopt-style declarations
    ///
    /// # Parameters
    ///
    /// * `short`: short options, `"hvo:"`. A character followed by `:` requires a value.
    /// * `long`: long options. `name` is a flag, `name!` a boolean, `name=s` requires a value and
    ///   `name:s` is a boolean accepting an optional inline value.
    pub fn from_spec(
        short: &str,
        long: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Self, GetoptError> {
        let mut getopt = Self::new();

        let mut chars = short.chars().peekable();
        while let Some(c) = chars.next() {
            if c == ':' || c == '-' {
                return Err(GetoptError::InvalidDeclaration(short.to_owned()));
            }

            let kind = if chars.peek() == Some(&':') {
                chars.next();
                ArgKind::Required
            } else {
                ArgKind::Flag
            };

            getopt.short_option(c, kind);
        }

        for decl in long {
            let decl = decl.as_ref();
            let (name, kind) = parse_long_declaration(decl);

            if name.is_empty() || name.starts_with('-') || name.contains('=') {
                return Err(GetoptError::InvalidDeclaration(decl.to_owned()));
            }

            getopt.long_option(name, kind);
        }

        Ok(getopt)
    }

    /// Declare a short option
    pub fn short_option(&mut self, c: char, kind: ArgKind) -> &mut Self {
        self.short.insert(c, kind);
        self
    }

    /// Declare a long option, replacing any previous declaration with the same name
    pub fn long_option(&mut self, name: impl Into<String>, kind: ArgKind) -> &mut Self {
        self.long.insert(name.into(), kind);
        self
    }

    /// Return `true` if a long option with this name is declared
    pub fn has_long(&self, name: &str) -> bool {
        self.long.contains_key(name)
    }

    /// Declared kind of the given option
    pub fn kind(&self, opt: &Opt) -> Option<ArgKind> {
        match opt {
            Opt::Short(c) => self.short.get(c).copied(),
            Opt::Long(name) => self.long.get(name).copied(),
        }
    }

    /// Parse an argument list against this schema
    ///
    /// The callback is invoked once per matched option, in argument order, or with a
    /// [GetoptError] signal. Returning an error from the callback stops parsing and that error is
    /// returned.
    ///
    /// # Returns
    ///
    /// The positional operands, in their original order. Everything after a `--` argument is
    /// returned verbatim.
    pub fn parse<I, S, F, E>(&self, args: I, mut callback: F) -> Result<Vec<String>, E>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnMut(Result<Match, GetoptError>) -> Result<(), E>,
    {
        let mut operands = Vec::new();
        let mut pending: Option<Opt> = None;
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            if let Some(opt) = pending.take() {
                // Consumed as a whole, even if it looks like an option
                callback(Ok((opt, OptArg::Value(arg))))?;
                continue;
            }

            if arg == "--" {
                operands.extend(args.by_ref());
                break;
            }

            if let Some(body) = arg.strip_prefix("--") {
                pending = self.parse_long(body, &mut callback)?;
            } else if arg.len() > 1 && arg.starts_with('-') {
                pending = self.parse_short(&arg[1..], &mut callback)?;
            } else {
                operands.push(arg);
            }
        }

        if let Some(opt) = pending {
            callback(Err(GetoptError::MissingArgument(opt)))?;
        }

        Ok(operands)
    }

    fn negated(&self, name: &str) -> Option<&str> {
        let (key, kind) = self.long.get_key_value(name.strip_prefix("no-")?)?;

        if kind.negatable() {
            Some(key.as_str())
        } else {
            None
        }
    }

    fn parse_long<F, E>(&self, body: &str, callback: &mut F) -> Result<Option<Opt>, E>
    where
        F: FnMut(Result<Match, GetoptError>) -> Result<(), E>,
    {
        if let Some((name, value)) = body.split_once('=') {
            let opt = Opt::long(name);

            match self.long.get(name) {
                Some(kind) if kind.accepts_inline_value() => {
                    callback(Ok((opt, OptArg::Value(value.to_owned()))))?
                }
                Some(_) => callback(Err(GetoptError::NoArgumentAllowed(opt)))?,
                None if self.negated(name).is_some() => {
                    callback(Err(GetoptError::NoArgumentAllowed(opt)))?
                }
                None => callback(Err(GetoptError::Unrecognized(opt)))?,
            }

            return Ok(None);
        }

        match self.long.get(body) {
            Some(ArgKind::Required) => return Ok(Some(Opt::long(body))),
            Some(_) => callback(Ok((Opt::long(body), OptArg::Bool(true))))?,
            None => match self.negated(body) {
                Some(name) => callback(Ok((Opt::long(name), OptArg::Bool(false))))?,
                None => callback(Err(GetoptError::Unrecognized(Opt::long(body))))?,
            },
        }

        Ok(None)
    }

    fn parse_short<F, E>(&self, cluster: &str, callback: &mut F) -> Result<Option<Opt>, E>
    where
        F: FnMut(Result<Match, GetoptError>) -> Result<(), E>,
    {
        for (i, c) in cluster.char_indices() {
            let opt = Opt::Short(c);

            match self.short.get(&c) {
                Some(ArgKind::Required) => {
                    let rest = &cluster[i + c.len_utf8()..];
                    if rest.is_empty() {
                        return Ok(Some(opt));
                    }

                    callback(Ok((opt, OptArg::Value(rest.to_owned()))))?;
                    return Ok(None);
                }
                Some(_) => callback(Ok((opt, OptArg::Bool(true))))?,
                None => callback(Err(GetoptError::Unrecognized(opt)))?,
            }
        }

        Ok(None)
    }
}

fn parse_long_declaration(decl: &str) -> (&str, ArgKind) {
    if let Some(name) = decl.strip_suffix("=s") {
        (name, ArgKind::Required)
    } else if let Some(name) = decl.strip_suffix(":s") {
        (name, ArgKind::Optional)
    } else if let Some(name) = decl.strip_suffix('!') {
        (name, ArgKind::Boolean)
    } else {
        (decl, ArgKind::Flag)
    }
}
