//! The browse battery.
//!
//! For each user: a digest pass over every year with assets, then a full
//! walk of the configured year range with per-year, per-month, and
//! per-calendar-day listings. Every step validates the bearer token and
//! runs in its own transaction; the first error aborts the battery.

use std::path::Path;

use chrono::{Datelike, Months, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use photovault_db::{browse_day, browse_month, browse_year, browse_years, trace, BrowseReport};

use crate::CliError;

pub(crate) fn run_battery(
    db_path: &Path,
    users: &[String],
    token: &str,
    from_year: i32,
    to_year: i32,
) -> Result<(), CliError> {
    if !db_path.exists() {
        return Err(CliError::database(format!(
            "No vault database at {}; run 'photovault seed' to create one",
            db_path.display()
        )));
    }
    if from_year > to_year {
        return Err(CliError::other(format!(
            "--from-year {from_year} is after --to-year {to_year}"
        )));
    }

    // The error-log hook must be in place before the first connection
    trace::install_error_log()
        .map_err(|e| CliError::database(format!("Failed to install SQLite error log: {}", e)))?;

    let mut conn = photovault_db::open_database(db_path)
        .map_err(|e| CliError::database(format!("Failed to open vault database: {}", e)))?;
    trace::install(&mut conn);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap()
            .tick_chars("/-\\|"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let mut total = Totals::default();
    for user in users {
        pb.set_message(format!("Browsing as {user}..."));

        total.add(browse_years(&conn, user, token).map_err(browse_err)?);
        for year in from_year..=to_year {
            pb.set_message(format!("Browsing as {user}: {year}..."));

            total.add(browse_year(&conn, user, token, year).map_err(browse_err)?);
            for month in 1..=12 {
                total.add(browse_month(&conn, user, token, year, month).map_err(browse_err)?);
                for day in 1..=days_in_month(year, month) {
                    total.add(
                        browse_day(&conn, user, token, year, month, day).map_err(browse_err)?,
                    );
                }
            }
        }
    }
    pb.finish_and_clear();

    log::info!(
        "{}",
        "--------- complete --------".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!(
        "Visited {} days, listed {} asset rows ({} users, years {}-{})",
        total.days,
        total.assets,
        users.len(),
        from_year,
        to_year,
    );

    Ok(())
}

#[derive(Default)]
struct Totals {
    days: usize,
    assets: usize,
}

impl Totals {
    fn add(&mut self, report: BrowseReport) {
        self.days += report.days;
        self.assets += report.assets;
    }
}

fn browse_err(e: photovault_db::OperationError) -> CliError {
    CliError::database(e.to_string())
}

/// Number of days in a calendar month.
fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_database_is_an_error() {
        let missing = std::env::temp_dir().join("photovault-missing-vault.db");
        let _ = std::fs::remove_file(&missing);
        let users = vec!["alice".to_string()];
        let err = run_battery(&missing, &users, "1234567", 2007, 2007).unwrap_err();
        assert!(matches!(err, CliError::Database(_)));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2019, 1), 31);
        assert_eq!(days_in_month(2019, 4), 30);
        assert_eq!(days_in_month(2019, 2), 28);
        assert_eq!(days_in_month(2012, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2019, 12), 31);
    }
}
