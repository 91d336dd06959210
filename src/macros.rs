//! Call-site capture.
//!
//! Every logging macro captures `file!()`, `line!()`, the enclosing function
//! and the source text of each value expression before anything is
//! evaluated, then hands them to a [`Record`](crate::Record). While output is
//! disabled the value expressions are not evaluated at all.

/// Maximum number of values in one `log!` record.
pub const MAX_VALUES: usize = 16;

/// Name of the enclosing function, without its module path.
///
/// Closures report the function they are defined in.
///
/// ```
/// fn calculate() -> &'static str {
///     exprlog::function_name!()
/// }
/// assert_eq!(calculate(), "calculate");
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __exprlog_probe() {}
        fn __exprlog_type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::prefix::short_function_name(__exprlog_type_name_of(__exprlog_probe))
    }};
}

/// [`CallSite`](crate::CallSite) of the macro invocation.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(::core::file!(), ::core::line!(), $crate::function_name!())
    };
}

/// Logs named values through `logger`.
///
/// Takes a [`Logger`](crate::Logger) (or a reference to one), a `;`, then 1 to
/// 16 expressions.
///
/// ```
/// # use exprlog::{log_to, Logger, Prefix, SharedBuffer, Sink};
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder().prefixes(Prefix::NONE).sink(Sink::new(buffer.clone())).build();
///
/// let v = vec![1, 2];
/// log_to!(logger; v, v.len() * 2);
/// assert_eq!(buffer.contents(), "v = {1, 2}, v.len() * 2 = 4\n");
/// ```
///
/// A seventeenth value is rejected at compile time:
///
/// ```compile_fail
/// # use exprlog::{log_to, Logger, Sink};
/// let logger = Logger::new(Sink::null());
/// let x = 0;
/// log_to!(logger; x, x, x, x, x, x, x, x, x, x, x, x, x, x, x, x, x);
/// ```
#[macro_export]
macro_rules! log_to {
    ($logger:expr; $($value:expr),+ $(,)?) => {{
        const _: () = ::core::assert!(
            <[&str]>::len(&[$(::core::stringify!($value)),+]) <= $crate::macros::MAX_VALUES,
            "a record holds at most 16 values"
        );
        if let ::core::option::Option::Some(mut __exprlog_record) =
            $crate::Logger::record(&$logger, $crate::call_site!())
        {
            $(
                __exprlog_record.value(::core::stringify!($value), &$value);
            )+
            __exprlog_record.finish();
        }
    }};
}

/// Logs an indexable region of `len` elements through `logger`.
///
/// `len` must not exceed the region; indexing past it panics.
#[macro_export]
macro_rules! log_array_to {
    ($logger:expr; $values:expr, $len:expr $(,)?) => {{
        if let ::core::option::Option::Some(__exprlog_record) =
            $crate::Logger::record(&$logger, $crate::call_site!())
        {
            let __exprlog_values = &$values;
            __exprlog_record.array(
                ::core::stringify!($values),
                $len,
                move |__exprlog_idx: usize| &__exprlog_values[__exprlog_idx],
            );
        }
    }};
}

/// Logs a `rows` x `cols` doubly indexable region through `logger`.
///
/// Neither dimension may exceed the region; indexing past it panics.
#[macro_export]
macro_rules! log_matrix_to {
    ($logger:expr; $values:expr, $cols:expr, $rows:expr $(,)?) => {{
        if let ::core::option::Option::Some(__exprlog_record) =
            $crate::Logger::record(&$logger, $crate::call_site!())
        {
            let __exprlog_values = &$values;
            __exprlog_record.matrix(
                ::core::stringify!($values),
                $cols,
                $rows,
                move |__exprlog_row: usize, __exprlog_col: usize| {
                    &__exprlog_values[__exprlog_row][__exprlog_col]
                },
            );
        }
    }};
}

/// Logs up to 16 values together with their source text.
///
/// ```no_run
/// # use exprlog::log;
/// let i = 1;
/// let s = "s";
/// log!(i, s);
/// ```
///
/// With the default prefixes this prints something like
///
/// ```text
/// main.rs:4: i = 1, s = "s"
/// ```
#[macro_export]
macro_rules! log {
    ($($value:expr),+ $(,)?) => {
        $crate::log_to!($crate::global(); $($value),+)
    };
}

/// Logs the first `len` elements of an indexable region.
///
/// ```no_run
/// # use exprlog::log_array;
/// let a = [0, 1, 2];
/// log_array!(a, 3); // a = {0, 1, 2}
/// ```
#[macro_export]
macro_rules! log_array {
    ($values:expr, $len:expr $(,)?) => {
        $crate::log_array_to!($crate::global(); $values, $len)
    };
}

/// Logs a matrix of `cols` columns and `rows` rows, cell by cell.
///
/// ```no_run
/// # use exprlog::log_matrix;
/// let m = [[11, 12], [21, 22]];
/// log_matrix!(m, 2, 2); // m: [0,0] = 11, [0,1] = 12, [1,0] = 21, [1,1] = 22
/// ```
#[macro_export]
macro_rules! log_matrix {
    ($values:expr, $cols:expr, $rows:expr $(,)?) => {
        $crate::log_matrix_to!($crate::global(); $values, $cols, $rows)
    };
}

/// [`log!`] in debug builds, nothing otherwise.
///
/// Active when the calling crate is built with `debug_assertions` and this
/// crate without its `disabled` feature. When inactive the arguments are
/// type-checked but never evaluated.
#[macro_export]
macro_rules! d {
    ($($value:expr),+ $(,)?) => {
        if ::core::cfg!(debug_assertions) && $crate::DEBUG_RECORDS_ENABLED {
            $crate::log!($($value),+);
        }
    };
}

/// [`log_array!`] in debug builds, nothing otherwise. See [`d!`].
#[macro_export]
macro_rules! d_array {
    ($values:expr, $len:expr $(,)?) => {
        if ::core::cfg!(debug_assertions) && $crate::DEBUG_RECORDS_ENABLED {
            $crate::log_array!($values, $len);
        }
    };
}

/// [`log_matrix!`] in debug builds, nothing otherwise. See [`d!`].
#[macro_export]
macro_rules! d_matrix {
    ($values:expr, $cols:expr, $rows:expr $(,)?) => {
        if ::core::cfg!(debug_assertions) && $crate::DEBUG_RECORDS_ENABLED {
            $crate::log_matrix!($values, $cols, $rows);
        }
    };
}
