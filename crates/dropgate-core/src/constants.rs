//! Shared constants.

/// Alphabet for short slugs: digits, lowercase, uppercase (base62).
pub const SLUG_ALPHABET: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Default slug length for short links.
pub const SLUG_LENGTH: usize = 8;

/// Widened slug length used after repeated collisions.
pub const SLUG_LENGTH_WIDE: usize = 10;

/// Insert attempts at the default length before widening.
pub const SLUG_MAX_ATTEMPTS: usize = 5;

/// Public path prefix for short links.
pub const RECEIVER_PATH_PREFIX: &str = "/r/";
