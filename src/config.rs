use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::prefix::Prefix;

/// One sampled read of every switch, taken when a record starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSnapshot {
    pub prefixes: Prefix,
    pub output_enabled: bool,
    pub color_enabled: bool,
}

/// Runtime switches of a [`Logger`](crate::Logger).
///
/// All fields are independent relaxed atomics: a record racing with a writer
/// may see any combination of old and new values, but each record reads each
/// field at most once.
#[derive(Debug)]
pub struct Config {
    prefixes: AtomicU32,
    output_enabled: AtomicBool,
    color_enabled: AtomicBool,
}

impl Config {
    pub const fn new(prefixes: Prefix, output_enabled: bool, color_enabled: bool) -> Self {
        Self {
            prefixes: AtomicU32::new(prefixes.bits()),
            output_enabled: AtomicBool::new(output_enabled),
            color_enabled: AtomicBool::new(color_enabled),
        }
    }

    /// Reads each switch once.
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            prefixes: self.prefixes(),
            output_enabled: self.is_output_enabled(),
            color_enabled: self.is_color_enabled(),
        }
    }

    pub fn prefixes(&self) -> Prefix {
        Prefix::from_bits_truncate(self.prefixes.load(Ordering::Relaxed))
    }

    pub fn set_prefixes(&self, prefixes: Prefix) {
        self.prefixes.store(prefixes.bits(), Ordering::Relaxed);
    }

    pub fn is_output_enabled(&self) -> bool {
        self.output_enabled.load(Ordering::Relaxed)
    }

    /// Master switch. While disabled, logging macros neither evaluate their
    /// arguments nor write anything.
    pub fn set_output_enabled(&self, enabled: bool) {
        self.output_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_color_enabled(&self) -> bool {
        self.color_enabled.load(Ordering::Relaxed)
    }

    /// Brackets every record in red ANSI escape sequences.
    pub fn set_color_enabled(&self, enabled: bool) {
        self.color_enabled.store(enabled, Ordering::Relaxed);
    }
}

impl Default for Config {
    /// File and line prefixes, output on, color off.
    fn default() -> Self {
        Self::new(Prefix::FILE | Prefix::LINE, true, false)
    }
}
