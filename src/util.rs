/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without silent data loss. Use these helpers when
/// promoting integer literals to the runtime double domain or truncating a
/// double back to an integer index.
pub mod num;
