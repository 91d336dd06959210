use std::fmt::Write;

use crate::config::ConfigSnapshot;
use crate::logger::Logger;
use crate::loggable::Loggable;
use crate::prefix::{CallSite, Prefix, PrefixFormatter};

/// Starts a red record.
pub const COLOR_START: &str = "\x1b[0;31m";
/// Resets the color before the terminator.
pub const COLOR_END: &str = "\x1b[0m";

/// One line under construction.
///
/// A `Record` is created by [`Logger::record`] after the output switch has
/// been checked, so its existence means the line will be written. It keeps
/// the prefix mask and color switch of the [`ConfigSnapshot`] it was started
/// with, and writes the color start and the prefix right away.
///
/// The logging macros drive it; calling it directly looks like this:
///
/// ```
/// # use exprlog::{CallSite, Logger, Prefix, SharedBuffer, Sink};
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder()
///     .prefixes(Prefix::NONE)
///     .sink(Sink::new(buffer.clone()))
///     .build();
///
/// if let Some(mut record) = logger.record(CallSite::new(file!(), line!(), "main")) {
///     record.value("i", &1).value("s", "s");
///     record.finish();
/// }
/// assert_eq!(buffer.contents(), "i = 1, s = \"s\"\n");
/// ```
pub struct Record<'a> {
    logger: &'a Logger,
    prefixes: Prefix,
    color: bool,
    line: String,
    values: usize,
    truncated: bool,
}

impl<'a> Record<'a> {
    pub(crate) fn new(logger: &'a Logger, site: &CallSite, snapshot: ConfigSnapshot) -> Self {
        let prefixes = snapshot.prefixes;
        let color = snapshot.color_enabled;

        let mut line = String::with_capacity(128);
        if color {
            line.push_str(COLOR_START);
        }
        let _ = write!(line, "{}", PrefixFormatter::new(site, prefixes));

        Self {
            logger,
            prefixes,
            color,
            line,
            values: 0,
            truncated: false,
        }
    }

    /// Appends `name = value`, separated from the previous value by `", "`.
    pub fn value<T: Loggable + ?Sized>(&mut self, name: &str, value: &T) -> &mut Self {
        if self.truncated {
            return self;
        }
        if self.values > 0 {
            self.line.push_str(", ");
        }
        self.push_tag::<T>("");
        self.line.push_str(name);
        self.line.push_str(" = ");
        if value.fmt_value(&mut self.line).is_err() {
            self.truncated = true;
        }
        self.values += 1;
        self
    }

    /// Renders `len` elements obtained through `at` as `name = {v0, v1, ...}`
    /// and finishes the record.
    pub fn array<'v, E, F>(mut self, name: &str, len: usize, at: F)
    where
        E: Loggable + ?Sized + 'v,
        F: Fn(usize) -> &'v E,
    {
        self.push_tag::<E>("[]");
        self.line.push_str(name);
        self.line.push_str(" = {");
        for idx in 0..len {
            if idx > 0 {
                self.line.push_str(", ");
            }
            if at(idx).fmt_value(&mut self.line).is_err() {
                self.truncated = true;
                break;
            }
        }
        if !self.truncated {
            self.line.push('}');
        }
        self.finish();
    }

    /// Renders a `rows` x `cols` matrix obtained through `at(row, col)` as
    /// `name: [0,0] = v, [0,1] = v, ...` in row-major order and finishes the
    /// record. Either dimension being zero renders `name: {}`.
    pub fn matrix<'v, E, F>(mut self, name: &str, cols: usize, rows: usize, at: F)
    where
        E: Loggable + ?Sized + 'v,
        F: Fn(usize, usize) -> &'v E,
    {
        self.push_tag::<E>("[][]");
        self.line.push_str(name);
        self.line.push_str(": ");
        if cols == 0 || rows == 0 {
            self.line.push_str("{}");
        } else {
            'rows: for row in 0..rows {
                for col in 0..cols {
                    if row > 0 || col > 0 {
                        self.line.push_str(", ");
                    }
                    let _ = write!(self.line, "[{},{}] = ", row, col);
                    if at(row, col).fmt_value(&mut self.line).is_err() {
                        self.truncated = true;
                        break 'rows;
                    }
                }
            }
        }
        self.finish();
    }

    /// Closes the record and hands it to the sink.
    ///
    /// A failing sink leaves the record truncated; the failure is only
    /// reported to `tracing`.
    pub fn finish(mut self) {
        if self.color {
            self.line.push_str(COLOR_END);
        }
        let terminator = self.logger.terminator();
        self.line.push_str(terminator.text());

        if let Err(err) = self
            .logger
            .sink()
            .write_record(self.line.as_bytes(), terminator.flushes())
        {
            tracing::trace!(error = %err, "record truncated by sink write failure");
        }
    }

    fn push_tag<T: Loggable + ?Sized>(&mut self, suffix: &str) {
        if self.prefixes.contains(Prefix::TYPE_NAME) {
            self.line.push_str(&T::type_tag());
            self.line.push_str(suffix);
            self.line.push(' ');
        }
    }
}
