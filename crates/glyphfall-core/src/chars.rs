//! Character constants for the falling-code grid.

/// Default candidate symbols: upper then lower case Latin letters.
pub const DEFAULT_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
