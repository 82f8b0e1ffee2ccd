//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Selector error - a --show-only pattern is invalid or matched nothing
pub const SELECTOR_ERROR: i32 = 2;

/// Template error - the template engine failed
pub const TEMPLATE_ERROR: i32 = 3;

/// Chart error - chart not installable, missing dependencies, unreadable chart
pub const CHART_ERROR: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;
