//! Values a shared pattern leaves out of the wire form.
//!
//! Compression omits a field exactly when it equals the value here, and
//! decompression restores exactly this value. Keep both sides on this table.

pub use stepgrid_types::DEFAULT_PITCH;

pub const DEFAULT_PACKED_SEQUENCE: u16 = 0;
pub const DEFAULT_FLAG: bool = false;

pub fn default_pitch() -> String {
    DEFAULT_PITCH.to_string()
}

/// `Some(value)` unless it equals `default`.
pub fn unless_default<T: PartialEq>(value: T, default: T) -> Option<T> {
    if value == default {
        None
    } else {
        Some(value)
    }
}

pub fn flag_or_default(flag: Option<bool>) -> bool {
    flag.unwrap_or(DEFAULT_FLAG)
}

pub fn pitch_or_default(pitch: Option<String>) -> String {
    pitch.unwrap_or_else(default_pitch)
}
