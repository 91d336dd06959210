//! Call-site context rendered in front of a record.
//!
//! The leading segments of a record are selected with a [`Prefix`] mask and
//! always appear in the order file, line, function, time, thread. The
//! [`Prefix::TYPE_NAME`] flag is not a segment: it decorates every logged
//! value with its type tag instead.

use std::fmt;
use std::thread;

use bitflags::bitflags;

use crate::clock;

bitflags! {
    /// Selection of prefix segments.
    ///
    /// Combine flags with the bitwise operators:
    ///
    /// ```
    /// # use exprlog::Prefix;
    /// let p = Prefix::FILE | Prefix::LINE;
    /// assert!(p.contains(Prefix::LINE));
    /// assert_eq!(p & Prefix::FILE, Prefix::FILE);
    /// assert_eq!(p ^ Prefix::LINE, Prefix::FILE);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Prefix: u32 {
        /// File name, for example `main.rs`.
        const FILE = 1 << 0;
        /// Line number, for example `Line: 16` or `main.rs:16`.
        const LINE = 1 << 1;
        /// Enclosing function, for example `calculate()`.
        const FUNCTION = 1 << 2;
        /// Local time as `HH:MM:SS.mmm`.
        const TIME = 1 << 3;
        /// Numeric id of the current thread, for example `TID: 12`.
        const THREAD = 1 << 4;
        /// Type tag in front of every logged value, for example `i32`.
        const TYPE_NAME = 1 << 5;
    }
}

impl Prefix {
    /// No prefix at all.
    pub const NONE: Prefix = Prefix::empty();
}

impl Default for Prefix {
    fn default() -> Self {
        Prefix::FILE | Prefix::LINE
    }
}

#[cfg(windows)]
const PATH_SEPARATOR: char = '\\';
#[cfg(not(windows))]
const PATH_SEPARATOR: char = '/';

/// Source location of a logging call, captured by [`call_site!`](crate::call_site).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    file: &'static str,
    line: u32,
    function: &'static str,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self { file, line, function }
    }

    /// File path as reported by `file!()`.
    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Unqualified name of the enclosing function.
    pub fn function(&self) -> &'static str {
        self.function
    }
}

/// Renders the prefix segments of a [`CallSite`] selected by a mask.
///
/// Produces nothing when no segment is selected, otherwise the segments
/// followed by `": "`:
///
/// ```
/// # use exprlog::{CallSite, Prefix, PrefixFormatter};
/// let site = CallSite::new("src/main.rs", 68, "main");
/// let prefix = PrefixFormatter::new(&site, Prefix::FILE | Prefix::LINE);
/// assert_eq!(prefix.to_string(), "main.rs:68: ");
///
/// let prefix = PrefixFormatter::new(&site, Prefix::LINE | Prefix::FUNCTION);
/// assert_eq!(prefix.to_string(), "Line: 68, main(): ");
/// ```
pub struct PrefixFormatter<'a> {
    site: &'a CallSite,
    prefixes: Prefix,
}

impl<'a> PrefixFormatter<'a> {
    pub fn new(site: &'a CallSite, prefixes: Prefix) -> Self {
        Self { site, prefixes }
    }
}

impl fmt::Display for PrefixFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut written = 0;

        if self.prefixes.contains(Prefix::FILE) {
            f.write_str(file_name(self.site.file))?;
            written += 1;
        }

        if self.prefixes.contains(Prefix::LINE) {
            // "Line: " only stands in for a missing file name
            if written == 0 {
                f.write_str("Line: ")?;
            } else {
                f.write_str(":")?;
            }
            write!(f, "{}", self.site.line)?;
            written += 1;
        }

        if self.prefixes.contains(Prefix::FUNCTION) {
            if written != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}()", self.site.function)?;
            written += 1;
        }

        if self.prefixes.contains(Prefix::TIME) {
            if let Some(now) = clock::local_now() {
                if written != 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", clock::TimeOfDay(now))?;
                written += 1;
            }
        }

        if self.prefixes.contains(Prefix::THREAD) {
            if written != 0 {
                f.write_str(", ")?;
            }
            write!(f, "TID: {}", current_thread_id())?;
            written += 1;
        }

        if written != 0 {
            f.write_str(": ")?;
        }
        Ok(())
    }
}

/// Last component of `path`, split on the host path separator.
///
/// ```
/// # use exprlog::prefix::file_name;
/// # #[cfg(not(windows))]
/// assert_eq!(file_name("src/bin/tool.rs"), "tool.rs");
/// assert_eq!(file_name("tool.rs"), "tool.rs");
/// ```
pub fn file_name(path: &str) -> &str {
    match path.rfind(PATH_SEPARATOR) {
        Some(idx) => &path[idx + PATH_SEPARATOR.len_utf8()..],
        None => path,
    }
}

/// Numeric part of the current thread's [`ThreadId`](std::thread::ThreadId).
fn current_thread_id() -> String {
    let id = format!("{:?}", thread::current().id());
    match id.strip_prefix("ThreadId(").and_then(|rest| rest.strip_suffix(')')) {
        Some(digits) => digits.to_owned(),
        None => id,
    }
}

/// Reduces the type name of the probe function planted by
/// [`function_name!`](crate::function_name) to the enclosing function's name.
#[doc(hidden)]
pub fn short_function_name(probe: &'static str) -> &'static str {
    let mut path = probe.strip_suffix("::__exprlog_probe").unwrap_or(probe);
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    match path.rfind("::") {
        Some(idx) => &path[idx + 2..],
        None => path,
    }
}
