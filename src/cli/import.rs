use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{Cell, Table};
use dialoguer::Confirm;

use crate::cli::resolve_display_month;
use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::{money, short_date};
use crate::models::ExpenseRecord;
use crate::parser;
use crate::pipeline::{run_import, DuplicateConfirmer, DuplicateDecision};
use crate::reporter::{summarize, Tone};
use crate::settings::get_data_dir;
use crate::store;

/// Terminal implementation of the confirmation boundary: render both
/// records, then ask. An interrupted or failed prompt read counts as Skip.
struct PromptConfirmer;

impl DuplicateConfirmer for PromptConfirmer {
    fn confirm(&mut self, incoming: &ExpenseRecord, existing: &ExpenseRecord) -> DuplicateDecision {
        println!();
        println!("{}", "Possible duplicate expense".yellow().bold());
        println!("An expense with the same date, account, and amount already exists:");
        print_record(existing, "Existing expense");
        print_record(incoming, "New expense");

        let add_anyway = Confirm::new()
            .with_prompt("Add it anyway?")
            .default(false)
            .interact()
            .unwrap_or(false);
        if add_anyway {
            DuplicateDecision::AddAnyway
        } else {
            DuplicateDecision::Skip
        }
    }
}

fn print_record(record: &ExpenseRecord, title: &str) {
    println!("{}", "\u{2500}".repeat(60));
    println!("  {title}");
    println!("  Date:     {}", short_date(&record.date));
    println!("  Account:  {}", record.account);
    if !record.payee.is_empty() {
        println!("  Payee:    {}", record.payee);
    }
    if !record.category.is_empty() {
        println!("  Category: {}", record.category);
    }
    if !record.memo.is_empty() {
        println!("  Memo:     {}", record.memo);
    }
    if let Some(inflow) = record.inflow {
        println!("  Inflow:   {}", money(inflow).green());
    } else {
        println!("  Outflow:  {}", money(record.outflow.unwrap_or(0.0)).red());
    }
}

fn print_month_grid(expenses: &[ExpenseRecord]) {
    let mut table = Table::new();
    table.set_header(vec![
        "Date", "Account", "Payee", "Category", "Memo", "Outflow", "Inflow",
    ]);
    for e in expenses {
        table.add_row(vec![
            Cell::new(short_date(&e.date)),
            Cell::new(&e.account),
            Cell::new(&e.payee),
            Cell::new(&e.category),
            Cell::new(&e.memo),
            Cell::new(e.outflow.map(money).unwrap_or_default()),
            Cell::new(e.inflow.map(money).unwrap_or_default()),
        ]);
    }
    println!("{table}");
}

pub fn run(file: &str, month: Option<String>) -> Result<()> {
    // reject a malformed --month before any rows are processed
    let (year, display_month) = resolve_display_month(&month)?;

    let file_path = PathBuf::from(file);
    let conn = get_connection(&get_data_dir().join("mabel.db"))?;

    let accounts = store::list_accounts(&conn)?;
    let categories = store::list_categories(&conn)?;
    let mut payees = store::list_payees(&conn)?;

    let rows = parser::parse(&file_path, &accounts)?;
    if rows.is_empty() {
        println!("{}", "No valid expenses found in the file".red());
        return Ok(());
    }
    println!("{}", format!("Processing {} expenses...", rows.len()).cyan());

    let mut confirmer = PromptConfirmer;
    let counters = run_import(&conn, &rows, &accounts, &categories, &mut payees, &mut confirmer)?;

    // refresh the visible view before reporting, so the summary describes
    // what the user is about to see
    let expenses = store::month_expenses(&conn, year, display_month)?;

    let summary = summarize(&counters);
    let line = match summary.tone {
        Tone::Success => summary.message.green().to_string(),
        Tone::Info => summary.message.cyan().to_string(),
        Tone::Error => summary.message.red().to_string(),
    };
    println!("{line}");

    if !expenses.is_empty() {
        println!("\nExpenses for {year:04}-{display_month:02}");
        print_month_grid(&expenses);
    }

    Ok(())
}
