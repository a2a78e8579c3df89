pub mod accounts;
pub mod categories;
pub mod import;
pub mod init;
pub mod payees;
pub mod status;

use chrono::Datelike;
use clap::{Parser, Subcommand};

use crate::error::{MabelError, Result};

#[derive(Parser)]
#[command(name = "mabel", about = "Household finance tracker CLI with spreadsheet import.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up Mabel: choose a data directory and initialize the database.
    Init {
        /// Path for Mabel data (default: ~/Documents/mabel)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Manage accounts.
    Accounts {
        #[command(subcommand)]
        command: AccountsCommands,
    },
    /// Manage categories.
    Categories {
        #[command(subcommand)]
        command: CategoriesCommands,
    },
    /// List payees (created on demand during import).
    Payees,
    /// Import a spreadsheet of expenses, reconciling duplicates interactively.
    Import {
        /// Path to XLSX or CSV file with columns:
        /// date, account, payee, category, memo, outflow, inflow
        file: String,
        /// Month to display after import: YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
    },
    /// Show current database and summary statistics.
    Status,
}

#[derive(Subcommand)]
pub enum AccountsCommands {
    /// Add a new account.
    Add {
        /// Account name (matched case-insensitively during import)
        name: String,
    },
    /// List accounts.
    List,
}

#[derive(Subcommand)]
pub enum CategoriesCommands {
    /// Add a new category.
    Add {
        /// Category name
        name: String,
    },
    /// List categories.
    List,
}

fn parse_month(m: &str) -> Option<(i32, u32)> {
    let parts: Vec<&str> = m.split('-').collect();
    if parts.len() != 2 {
        return None;
    }
    let year = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some((year, month))
}

/// Resolve the month to display: an explicit `--month YYYY-MM` argument,
/// or the current month when absent. A malformed argument is an error, not
/// a silent fallback.
pub(crate) fn resolve_display_month(month: &Option<String>) -> Result<(i32, u32)> {
    match month.as_deref() {
        Some(m) => parse_month(m).ok_or_else(|| {
            MabelError::InvalidArg(format!("month '{m}' is not in YYYY-MM format"))
        }),
        None => {
            let today = chrono::Local::now().date_naive();
            Ok((today.year(), today.month()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-04"), Some((2025, 4)));
        assert_eq!(parse_month("2025-13"), None);
        assert_eq!(parse_month("April"), None);
    }

    #[test]
    fn test_resolve_display_month_rejects_bad_argument() {
        let bad = resolve_display_month(&Some("April".to_string()));
        assert!(matches!(bad, Err(MabelError::InvalidArg(_))));
        let err = bad.unwrap_err().to_string();
        assert!(err.contains("April"), "message should name the bad value: {err}");

        assert_eq!(
            resolve_display_month(&Some("2025-04".to_string())).unwrap(),
            (2025, 4)
        );
        assert!(resolve_display_month(&None).is_ok());
    }
}
