//! Driver-level trace and profile diagnostics.
//!
//! SQLite reports executed statements and their run times through driver
//! callbacks. The hooks here format those events into log lines; the
//! formatting itself is split out into pure functions so it can be tested
//! without a connection.
//!
//! Statement text is shown inside curly braces: of the paired ASCII
//! characters they are the least used in SQL syntax, so they make decent
//! visual delimiters. Curly braces reaching the driver outside a string
//! usually mean un-rendered template syntax, i.e. an application bug.

use std::os::raw::c_int;
use std::time::Duration;

use rusqlite::Connection;

use crate::operations::OperationError;

/// Install statement and profile hooks on the connection.
///
/// Events are logged at debug level; run with `RUST_LOG=debug` (or the
/// CLI's `--verbose`) to see them.
pub fn install(conn: &mut Connection) {
    conn.trace(Some(on_statement));
    conn.profile(Some(on_profile));
}

/// Route SQLite's global error log through `log`.
///
/// This surfaces result codes for failed statements alongside the trace
/// lines. Must be called before the first connection is opened; SQLite
/// rejects configuration changes once a connection exists.
pub fn install_error_log() -> Result<(), OperationError> {
    // SAFETY: callers invoke this once at startup, before any connection.
    unsafe { rusqlite::trace::config_log(Some(on_sqlite_error))? };
    Ok(())
}

fn on_statement(sql: &str) {
    log::debug!("{}", format_statement(sql));
}

fn on_profile(sql: &str, elapsed: Duration) {
    log::debug!("{}", format_profile(sql, elapsed));
}

fn on_sqlite_error(code: c_int, msg: &str) {
    log::warn!("sqlite error code {code}: {msg}");
}

/// Format a statement-trace event.
pub fn format_statement(sql: &str) -> String {
    format!("trace {{{sql:?}}}")
}

/// Format a profile event.
///
/// SQLite documents the profile time in nanoseconds but currently measures
/// with millisecond resolution, so the common case prints whole
/// milliseconds. A time that isn't a whole number of milliseconds means the
/// engine started reporting finer resolution; print it exactly.
pub fn format_profile(sql: &str, elapsed: Duration) -> String {
    const NANOS_PER_MILLI: u128 = 1_000_000;

    let nanos = elapsed.as_nanos();
    let time = if nanos == 0 {
        "time 0".to_string()
    } else if nanos % NANOS_PER_MILLI == 0 {
        format!("time {} ms", nanos / NANOS_PER_MILLI)
    } else {
        format!("time {nanos} ns")
    };
    format!("profile {{{sql:?}}}; {time}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_line_braces_and_quotes() {
        let line = format_statement("SELECT 1");
        assert_eq!(line, "trace {\"SELECT 1\"}");
    }

    #[test]
    fn profile_line_whole_milliseconds() {
        let line = format_profile("SELECT 1", Duration::from_millis(12));
        assert_eq!(line, "profile {\"SELECT 1\"}; time 12 ms");
    }

    #[test]
    fn profile_line_zero_time_has_no_unit() {
        let line = format_profile("SELECT 1", Duration::ZERO);
        assert_eq!(line, "profile {\"SELECT 1\"}; time 0");
    }

    #[test]
    fn profile_line_sub_millisecond_prints_nanos() {
        let line = format_profile("SELECT 1", Duration::from_nanos(2_500_432));
        assert_eq!(line, "profile {\"SELECT 1\"}; time 2500432 ns");
    }
}
