//! Stable exit codes for `bf` commands.

/// Program compiled and ran to completion.
pub const OK: i32 = 0;
/// Unmatched brackets, an I/O failure, or an unreadable source file.
pub const FAILURE: i32 = 1;
/// Invalid command-line usage.
pub const USAGE: i32 = 2;
/// The runaway-loop prompt was declined.
pub const RUNAWAY_ABORTED: i32 = 3;
