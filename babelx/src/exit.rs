//! Process exit statuses, following the BSD `sysexits.h` conventions

/// Successful termination
pub const OK: i32 = 0;
/// Generic failure
pub const FAILURE: i32 = 1;
/// Command line usage error
pub const USAGE: i32 = 64;
/// Data format error
pub const DATAERR: i32 = 65;
/// Cannot open input
pub const NOINPUT: i32 = 66;
/// Service unavailable
pub const UNAVAILABLE: i32 = 69;
/// Internal software error
pub const SOFTWARE: i32 = 70;
/// Can't create (user) output file
pub const CANTCREAT: i32 = 73;
/// Input/output error
pub const IOERR: i32 = 74;
/// Configuration error
pub const CONFIG: i32 = 78;
