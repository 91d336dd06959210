//! # exprlog
//!
//! Debug printing that names what it prints. Meant for the cases where a
//! debugger is a worse option, e.g. a realtime loop that becomes useless once
//! built without optimizations:
//!
//! * **Names with values**: `log!(i)` prints `i = 1`, using the source text
//!   of the expression
//! * **Context prefixes**: file, line, function, local time and thread id,
//!   each switchable at runtime
//! * **Readable values**: strings quoted, characters single-quoted,
//!   collections in braces, stacks and queues by their observable ends
//! * **Arrays and matrices**: `log_array!` and `log_matrix!` with explicit
//!   dimensions
//!
//! It is not a logging framework: there are no levels, no async sinks and no
//! structured records. Each call writes one line, synchronously.
//!
//! ## Main Components
//!
//! * `Logger`: switches, terminator and sink; one process-wide instance
//!   backs the plain macros
//! * `Loggable`: the value renderer, implemented for std types and
//!   implementable for your own
//! * `PrefixFormatter`: call-site context in front of a record
//! * `Record`: assembles one line
//!
//! ## Quick Start
//!
//! ```
//! use exprlog::{log, log_array, log_matrix, Prefix};
//!
//! exprlog::set_prefixes(Prefix::FILE | Prefix::LINE | Prefix::FUNCTION);
//!
//! let i = 1;
//! let s = "s";
//! log!(i, s);                       // lib.rs:9, main(): i = 1, s = "s"
//!
//! let a = [0, 1, 2];
//! log_array!(a, 3);                 // lib.rs:12, main(): a = {0, 1, 2}
//!
//! let m = [[11, 12], [21, 22]];
//! log_matrix!(m, 2, 2);             // lib.rs:15, main(): m: [0,0] = 11, ...
//! ```
//!
//! ## Custom types
//!
//! ```
//! use std::fmt;
//! use exprlog::{log, Loggable};
//!
//! struct Point { x: i32, y: i32 }
//!
//! impl Loggable for Point {
//!     fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
//!         write!(out, "<{}, {}>", self.x, self.y)
//!     }
//! }
//!
//! let p = Point { x: 1, y: 2 };
//! log!(p);                          // lib.rs:13: p = <1, 2>
//! ```
//!
//! ## Flushing
//!
//! Records end in a plain `"\n"`. Build with the `flush-each-record` feature
//! to flush the global sink after every record, or give an explicit logger
//! [`Terminator::NEWLINE_FLUSH`].

pub mod clock;
pub mod config;
pub mod containers;
pub mod logger;
pub mod loggable;
pub mod macros;
pub mod prefix;
pub mod record;
pub mod sink;

pub use config::{Config, ConfigSnapshot};
pub use containers::{
    write_front_back, write_map, write_sequence, write_top, FrontBackObservable, Queue, Stack,
    TopObservable,
};
pub use logger::{
    global, is_color_enabled, is_output_enabled, prefixes, set_color_enabled,
    set_output_enabled, set_prefixes, set_sink, Logger, LoggerBuilder, Terminator,
};
pub use loggable::{div_rem, render, type_tag, DivRem, Loggable};
pub use prefix::{CallSite, Prefix, PrefixFormatter};
pub use record::Record;
pub use sink::{SharedBuffer, Sink};

/// Whether the debug-only `d!` family may emit anything.
#[doc(hidden)]
pub const DEBUG_RECORDS_ENABLED: bool = !cfg!(feature = "disabled");
