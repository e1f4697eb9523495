//! Standard exit codes (BSD sysexits.h compatible)

/// Requested item is not in the index
pub const NOT_FOUND: i32 = 2;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error
pub const DATAERR: i32 = 65;

/// Cannot open input
pub const NOINPUT: i32 = 66;

/// Output could not be written
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
