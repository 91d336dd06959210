use std::any;
use std::borrow::{Cow, ToOwned};
use std::cell::{Cell, RefCell};
use std::ffi::{CStr, CString, OsStr, OsString};
use std::fmt;
use std::ops::{Div, Rem};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::atomic::{
    AtomicBool, AtomicI16, AtomicI32, AtomicI64, AtomicI8, AtomicIsize, AtomicU16, AtomicU32,
    AtomicU64, AtomicU8, AtomicUsize, Ordering,
};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

use crate::clock::{self, CALENDAR_FORMAT};

/// A value that can appear in a record.
///
/// `fmt_value` writes the canonical rendering of the value: no leading
/// whitespace, no separators, no newline. Containers call it recursively on
/// their elements, so a `Vec<Option<&str>>` renders as `{Some("a"), None}`.
///
/// `type_tag` names the type when [`Prefix::TYPE_NAME`](crate::Prefix::TYPE_NAME)
/// is enabled. The default falls back to [`std::any::type_name`].
///
/// Types outside this crate opt in by implementing the trait, either by hand
/// or through [`loggable_via_display!`](crate::loggable_via_display) and
/// [`loggable_via_debug!`](crate::loggable_via_debug). Logging a type that
/// does neither is a compile error.
///
/// # Examples
///
/// ```
/// use std::fmt;
/// use exprlog::{render, Loggable};
///
/// struct Celsius(f32);
///
/// impl Loggable for Celsius {
///     fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
///         write!(out, "{} C", self.0)
///     }
/// }
///
/// assert_eq!(render(&Celsius(21.5)), "21.5 C");
/// assert_eq!(render(&vec![Celsius(1.0)]), "{1 C}");
/// ```
pub trait Loggable {
    /// Writes the rendering of `self` to `out`.
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result;

    /// Short human-readable name of the type.
    fn type_tag() -> Cow<'static, str> {
        Cow::Borrowed(any::type_name::<Self>())
    }
}

/// Renders a value to a fresh `String`.
///
/// An error from a user hook truncates the result at the point of failure.
pub fn render<T: Loggable + ?Sized>(value: &T) -> String {
    let mut out = String::new();
    let _ = value.fmt_value(&mut out);
    out
}

/// Tag of `T`, as used by [`Prefix::TYPE_NAME`](crate::Prefix::TYPE_NAME).
pub fn type_tag<T: Loggable + ?Sized>() -> Cow<'static, str> {
    T::type_tag()
}

macro_rules! impl_loggable_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Loggable for $ty {
                fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
                    write!(out, "{}", self)
                }

                fn type_tag() -> Cow<'static, str> {
                    Cow::Borrowed(stringify!($ty))
                }
            }
        )*
    };
}

impl_loggable_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool
);

impl Loggable for char {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "'{}'", self)
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Borrowed("char")
    }
}

fn write_quoted(out: &mut dyn fmt::Write, text: &str) -> fmt::Result {
    out.write_char('"')?;
    out.write_str(text)?;
    out.write_char('"')
}

macro_rules! impl_loggable_quoted {
    ($($ty:ty => $tag:literal, |$s:ident| $text:expr;)*) => {
        $(
            impl Loggable for $ty {
                fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
                    let $s = self;
                    write_quoted(out, &$text)
                }

                fn type_tag() -> Cow<'static, str> {
                    Cow::Borrowed($tag)
                }
            }
        )*
    };
}

impl_loggable_quoted! {
    str => "str", |s| s;
    String => "String", |s| s.as_str();
    CStr => "CStr", |s| s.to_string_lossy();
    CString => "CString", |s| s.to_string_lossy();
    OsStr => "OsStr", |s| s.to_string_lossy();
    OsString => "OsString", |s| s.to_string_lossy();
    Path => "Path", |s| s.to_string_lossy();
    PathBuf => "PathBuf", |s| s.to_string_lossy();
}

impl<T: Loggable + ?Sized> Loggable for &T {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        (**self).fmt_value(out)
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("&{}", T::type_tag()))
    }
}

impl<T: Loggable + ?Sized> Loggable for &mut T {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        (**self).fmt_value(out)
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("&mut {}", T::type_tag()))
    }
}

impl<T: Loggable + ?Sized> Loggable for *const T {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "{:p}", *self)
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("const {}*", T::type_tag()))
    }
}

impl<T: Loggable + ?Sized> Loggable for *mut T {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "{:p}", *self)
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("{}*", T::type_tag()))
    }
}

macro_rules! impl_loggable_smart_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: Loggable + ?Sized> Loggable for $ptr<T> {
                fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
                    (**self).fmt_value(out)
                }

                fn type_tag() -> Cow<'static, str> {
                    Cow::Owned(format!("{}<{}>", stringify!($ptr), T::type_tag()))
                }
            }
        )*
    };
}

impl_loggable_smart_pointer!(Box, Rc, Arc);

impl<B> Loggable for Cow<'_, B>
where
    B: Loggable + ToOwned + ?Sized,
{
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        (**self).fmt_value(out)
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("Cow<{}>", B::type_tag()))
    }
}

impl<T: Loggable> Loggable for Option<T> {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        match self {
            Some(value) => {
                out.write_str("Some(")?;
                value.fmt_value(out)?;
                out.write_char(')')
            }
            None => out.write_str("None"),
        }
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("Option<{}>", T::type_tag()))
    }
}

impl<T: Loggable, E: Loggable> Loggable for Result<T, E> {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        match self {
            Ok(value) => {
                out.write_str("Ok(")?;
                value.fmt_value(out)?;
            }
            Err(err) => {
                out.write_str("Err(")?;
                err.fmt_value(out)?;
            }
        }
        out.write_char(')')
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("Result<{}, {}>", T::type_tag(), E::type_tag()))
    }
}

impl Loggable for () {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str("()")
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Borrowed("()")
    }
}

macro_rules! impl_loggable_tuple {
    ($(($($name:ident . $idx:tt),+))*) => {
        $(
            impl<$($name: Loggable),+> Loggable for ($($name,)+) {
                fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
                    out.write_char('(')?;
                    $(
                        if $idx > 0 {
                            out.write_str(", ")?;
                        }
                        self.$idx.fmt_value(out)?;
                    )+
                    out.write_char(')')
                }

                fn type_tag() -> Cow<'static, str> {
                    let tags: Vec<Cow<'static, str>> = vec![$($name::type_tag()),+];
                    Cow::Owned(format!("({})", tags.join(", ")))
                }
            }
        )*
    };
}

impl_loggable_tuple! {
    (A.0)
    (A.0, B.1)
    (A.0, B.1, C.2)
    (A.0, B.1, C.2, D.3)
    (A.0, B.1, C.2, D.3, E.4)
    (A.0, B.1, C.2, D.3, E.4, F.5)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7)
}

impl<T: Loggable + Copy> Loggable for Cell<T> {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.get().fmt_value(out)
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("Cell<{}>", T::type_tag()))
    }
}

impl<T: Loggable + ?Sized> Loggable for RefCell<T> {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        match self.try_borrow() {
            Ok(value) => value.fmt_value(out),
            Err(_) => out.write_str("<borrowed>"),
        }
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("RefCell<{}>", T::type_tag()))
    }
}

macro_rules! impl_loggable_atomic {
    ($($atomic:ident),*) => {
        $(
            impl Loggable for $atomic {
                fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
                    self.load(Ordering::Relaxed).fmt_value(out)
                }

                fn type_tag() -> Cow<'static, str> {
                    Cow::Borrowed(stringify!($atomic))
                }
            }
        )*
    };
}

impl_loggable_atomic!(
    AtomicBool, AtomicI8, AtomicI16, AtomicI32, AtomicI64, AtomicIsize, AtomicU8, AtomicU16,
    AtomicU32, AtomicU64, AtomicUsize
);

impl Loggable for Duration {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "{:?}", self)
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Borrowed("Duration")
    }
}

impl Loggable for NaiveDateTime {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        clock::write_calendar(out, self.format(CALENDAR_FORMAT))
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Borrowed("NaiveDateTime")
    }
}

impl Loggable for NaiveDate {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        clock::write_calendar(out, self.format("%Y-%m-%d"))
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Borrowed("NaiveDate")
    }
}

/// Rendered in the value's own time zone.
impl<Tz: TimeZone> Loggable for DateTime<Tz>
where
    Tz::Offset: fmt::Display,
{
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        clock::write_calendar(out, self.format(CALENDAR_FORMAT))
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Borrowed("DateTime")
    }
}

/// Rendered as local calendar time.
impl Loggable for SystemTime {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        match clock::local_time_of(*self) {
            Some(local) => local.fmt_value(out),
            None => out.write_str(clock::CALENDAR_FORMAT_ERROR),
        }
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Borrowed("SystemTime")
    }
}

/// Quotient and remainder of an integer division, see [`div_rem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DivRem<T> {
    pub quot: T,
    pub rem: T,
}

/// Divides `numer` by `denom`, keeping both quotient and remainder.
///
/// ```
/// # use exprlog::{div_rem, render};
/// let d = div_rem(7i64, 2);
/// assert_eq!((d.quot, d.rem), (3, 1));
/// assert_eq!(render(&d), "{quot = 3, rem = 1}");
/// ```
///
/// # Panics
///
/// Panics if `denom` is zero, like the `/` operator.
pub fn div_rem<T>(numer: T, denom: T) -> DivRem<T>
where
    T: Div<Output = T> + Rem<Output = T> + Copy,
{
    DivRem {
        quot: numer / denom,
        rem: numer % denom,
    }
}

impl<T: Loggable> Loggable for DivRem<T> {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str("{quot = ")?;
        self.quot.fmt_value(out)?;
        out.write_str(", rem = ")?;
        self.rem.fmt_value(out)?;
        out.write_char('}')
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("DivRem<{}>", T::type_tag()))
    }
}

/// Implements [`Loggable`] for the given types through their `Display` impl.
///
/// ```
/// use std::fmt;
/// use exprlog::{loggable_via_display, render};
///
/// struct Version(u8, u8);
///
/// impl fmt::Display for Version {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "v{}.{}", self.0, self.1)
///     }
/// }
///
/// loggable_via_display!(Version);
///
/// assert_eq!(render(&Version(1, 2)), "v1.2");
/// ```
#[macro_export]
macro_rules! loggable_via_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Loggable for $ty {
                fn fmt_value(&self, out: &mut dyn ::core::fmt::Write) -> ::core::fmt::Result {
                    ::core::write!(out, "{}", self)
                }
            }
        )+
    };
}

/// Implements [`Loggable`] for the given types through their `Debug` impl.
#[macro_export]
macro_rules! loggable_via_debug {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Loggable for $ty {
                fn fmt_value(&self, out: &mut dyn ::core::fmt::Write) -> ::core::fmt::Result {
                    ::core::write!(out, "{:?}", self)
                }
            }
        )+
    };
}
