use std::io::Write;

use lazy_static::lazy_static;

use crate::config::Config;
use crate::loggable::Loggable;
use crate::prefix::{CallSite, Prefix};
use crate::record::Record;
use crate::sink::Sink;

/// Text appended to every record, and whether the sink is flushed after it.
///
/// A plain newline leaves flushing to the sink; [`Terminator::NEWLINE_FLUSH`]
/// requests a flush per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminator {
    text: &'static str,
    flush: bool,
}

impl Terminator {
    /// `"\n"` without flushing.
    pub const NEWLINE: Terminator = Terminator::new("\n", false);
    /// `"\n"` followed by a flush of the sink.
    pub const NEWLINE_FLUSH: Terminator = Terminator::new("\n", true);

    pub const fn new(text: &'static str, flush: bool) -> Self {
        Self { text, flush }
    }

    pub fn text(&self) -> &'static str {
        self.text
    }

    pub fn flushes(&self) -> bool {
        self.flush
    }
}

impl Default for Terminator {
    fn default() -> Self {
        Terminator::NEWLINE
    }
}

/// Terminator of the global logger, fixed when the crate is built.
#[cfg(not(feature = "flush-each-record"))]
pub const GLOBAL_TERMINATOR: Terminator = Terminator::NEWLINE;
/// Terminator of the global logger, fixed when the crate is built.
#[cfg(feature = "flush-each-record")]
pub const GLOBAL_TERMINATOR: Terminator = Terminator::NEWLINE_FLUSH;

/// Writes records of named values to a sink.
///
/// A `Logger` bundles the runtime switches ([`Config`]), a [`Terminator`]
/// and a [`Sink`]. The logging macros use the process-wide instance returned
/// by [`global`]; the `*_to!` macro variants accept any logger, which is how
/// separate components (or tests) get their own destination and settings.
///
/// # Thread Safety
///
/// `Logger` is `Sync`. The switches are relaxed atomics and the sink is
/// behind a mutex, so a logger can be shared freely between threads.
///
/// # Examples
///
/// ```
/// use exprlog::{log_to, Logger, Prefix, SharedBuffer, Sink};
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder()
///     .prefixes(Prefix::NONE)
///     .sink(Sink::new(buffer.clone()))
///     .build();
///
/// let i = 1;
/// let s = "s";
/// log_to!(logger; i, s);
/// assert_eq!(buffer.contents(), "i = 1, s = \"s\"\n");
/// ```
#[derive(Debug)]
pub struct Logger {
    config: Config,
    terminator: Terminator,
    sink: Sink,
}

impl Logger {
    /// Creates a logger with default switches writing to `sink`.
    pub fn new(sink: Sink) -> Self {
        Self::builder().sink(sink).build()
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn terminator(&self) -> Terminator {
        self.terminator
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    /// Starts a record for `site`, or returns `None` while output is disabled.
    ///
    /// The switches are sampled exactly once here; a record that has been
    /// started is always written in full.
    pub fn record(&self, site: CallSite) -> Option<Record<'_>> {
        let snapshot = self.config.snapshot();
        if !snapshot.output_enabled {
            return None;
        }
        Some(Record::new(self, &site, snapshot))
    }

    /// Logs the first `values.len()` elements of a slice as an array record.
    pub fn log_slice<T: Loggable>(&self, site: CallSite, name: &str, values: &[T]) {
        if let Some(record) = self.record(site) {
            record.array(name, values.len(), |idx| &values[idx]);
        }
    }
}

impl Default for Logger {
    /// Default switches writing to standard output.
    fn default() -> Self {
        Self::new(Sink::stdout())
    }
}

/// Builder for [`Logger`].
///
/// ```
/// # use exprlog::{Logger, Prefix, Sink, Terminator};
/// let logger = Logger::builder()
///     .prefixes(Prefix::FILE | Prefix::LINE | Prefix::THREAD)
///     .color_enabled(true)
///     .terminator(Terminator::new(" end\n", false))
///     .sink(Sink::stderr())
///     .build();
/// assert!(logger.config().is_color_enabled());
/// ```
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    prefixes: Option<Prefix>,
    output_enabled: Option<bool>,
    color_enabled: Option<bool>,
    terminator: Option<Terminator>,
    sink: Option<Sink>,
}

impl LoggerBuilder {
    pub fn prefixes(mut self, prefixes: Prefix) -> Self {
        self.prefixes = Some(prefixes);
        self
    }

    pub fn output_enabled(mut self, enabled: bool) -> Self {
        self.output_enabled = Some(enabled);
        self
    }

    pub fn color_enabled(mut self, enabled: bool) -> Self {
        self.color_enabled = Some(enabled);
        self
    }

    pub fn terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = Some(terminator);
        self
    }

    /// Defaults to standard output.
    pub fn sink(mut self, sink: Sink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn build(self) -> Logger {
        let defaults = Config::default();
        Logger {
            config: Config::new(
                self.prefixes.unwrap_or_else(|| defaults.prefixes()),
                self.output_enabled.unwrap_or_else(|| defaults.is_output_enabled()),
                self.color_enabled.unwrap_or_else(|| defaults.is_color_enabled()),
            ),
            terminator: self.terminator.unwrap_or_default(),
            sink: self.sink.unwrap_or_else(Sink::stdout),
        }
    }
}

lazy_static! {
    /// The process-wide logger behind `log!`, `log_array!` and `log_matrix!`.
    static ref GLOBAL: Logger = Logger::builder()
        .terminator(GLOBAL_TERMINATOR)
        .sink(Sink::stdout())
        .build();
}

/// The process-wide logger.
pub fn global() -> &'static Logger {
    &GLOBAL
}

/// Active prefixes of the global logger.
pub fn prefixes() -> Prefix {
    global().config().prefixes()
}

/// Selects the prefixes of the global logger.
///
/// ```
/// # use exprlog::Prefix;
/// exprlog::set_prefixes(Prefix::FILE | Prefix::FUNCTION);
/// assert_eq!(exprlog::prefixes(), Prefix::FILE | Prefix::FUNCTION);
/// ```
pub fn set_prefixes(prefixes: Prefix) {
    global().config().set_prefixes(prefixes);
}

pub fn is_output_enabled() -> bool {
    global().config().is_output_enabled()
}

/// Turns all output of the global logger on or off.
pub fn set_output_enabled(enabled: bool) {
    global().config().set_output_enabled(enabled);
}

pub fn is_color_enabled() -> bool {
    global().config().is_color_enabled()
}

/// Turns red ANSI bracketing of global records on or off.
pub fn set_color_enabled(enabled: bool) {
    global().config().set_color_enabled(enabled);
}

/// Redirects the global logger and returns the writer it used before.
pub fn set_sink(out: Box<dyn Write + Send>) -> Box<dyn Write + Send> {
    global().sink().redirect(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::SharedBuffer;

    #[test]
    fn test_builder_defaults() {
        let logger = Logger::builder().sink(Sink::null()).build();
        assert_eq!(logger.config().prefixes(), Prefix::FILE | Prefix::LINE);
        assert!(logger.config().is_output_enabled());
        assert!(!logger.config().is_color_enabled());
        assert_eq!(logger.terminator(), Terminator::NEWLINE);
    }

    #[test]
    fn test_disabled_logger_starts_no_record() {
        let logger = Logger::builder()
            .output_enabled(false)
            .sink(Sink::null())
            .build();
        assert!(logger.record(CallSite::new("a.rs", 1, "f")).is_none());
    }

    #[test]
    fn test_log_slice() {
        let buffer = SharedBuffer::new();
        let logger = Logger::builder()
            .prefixes(Prefix::NONE)
            .sink(Sink::new(buffer.clone()))
            .build();
        logger.log_slice(CallSite::new("a.rs", 1, "f"), "xs", &[0.5, 1.5]);
        logger.log_slice::<i32>(CallSite::new("a.rs", 2, "f"), "empty", &[]);
        assert_eq!(buffer.contents(), "xs = {0.5, 1.5}\nempty = {}\n");
    }

    #[test]
    fn test_custom_terminator() {
        let buffer = SharedBuffer::new();
        let logger = Logger::builder()
            .prefixes(Prefix::NONE)
            .terminator(Terminator::new(" end\n", false))
            .sink(Sink::new(buffer.clone()))
            .build();
        if let Some(mut record) = logger.record(CallSite::new("a.rs", 1, "f")) {
            record.value("i", &1);
            record.finish();
        }
        assert_eq!(buffer.contents(), "i = 1 end\n");
    }
}
