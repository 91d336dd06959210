//! Wall-clock helpers for the TIME prefix and for calendar values.
//!
//! Local time is resolved through the platform time zone database. When the
//! platform cannot map the current instant to a single local time, callers
//! get `None` and skip whatever they were about to render.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local, TimeZone};

/// strftime pattern used for calendar values.
pub const CALENDAR_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Written in place of a calendar value whose formatting failed.
pub const CALENDAR_FORMAT_ERROR: &str = "time format error";

/// Returns the current local time, or `None` if it cannot be resolved.
///
/// # Examples
///
/// ```
/// # use exprlog::clock::local_now;
/// if let Some(now) = local_now() {
///     println!("{}", now);
/// }
/// ```
pub fn local_now() -> Option<DateTime<Local>> {
    local_time_of(SystemTime::now())
}

/// Converts a [`SystemTime`] to local time, or `None` if it cannot be resolved.
///
/// Times before 1970 resolve like any other.
pub fn local_time_of(time: SystemTime) -> Option<DateTime<Local>> {
    let (secs, nanos) = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => (i64::try_from(after.as_secs()).ok()?, after.subsec_nanos()),
        Err(err) => {
            let before = err.duration();
            let secs = i64::try_from(before.as_secs()).ok()?;
            match before.subsec_nanos() {
                0 => (-secs, 0),
                nanos => (-secs - 1, 1_000_000_000 - nanos),
            }
        }
    };
    Local.timestamp_opt(secs, nanos).single()
}

/// Time of day rendered as `HH:MM:SS.mmm`, milliseconds zero-padded.
pub struct TimeOfDay<Tz: TimeZone>(pub DateTime<Tz>);

impl<Tz: TimeZone> fmt::Display for TimeOfDay<Tz>
where
    Tz::Offset: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S%.3f"))
    }
}

/// Writes `formatted` to `out`, or [`CALENDAR_FORMAT_ERROR`] if rendering it fails.
///
/// The value is rendered into a scratch buffer first so that a failure
/// halfway through never leaves a partial timestamp behind.
pub fn write_calendar(out: &mut dyn fmt::Write, formatted: impl fmt::Display) -> fmt::Result {
    let mut buf = String::with_capacity(19);
    if fmt::write(&mut buf, format_args!("{}", formatted)).is_err() {
        return out.write_str(CALENDAR_FORMAT_ERROR);
    }
    out.write_str(&buf)
}
