use rusqlite::Connection;

use crate::categorizer::categorize;
use crate::dedup::{find_duplicate, DuplicateCandidate};
use crate::error::Result;
use crate::models::{EntityRef, ExpenseRecord, ImportedRow, NewExpense};
use crate::parser::parse_row_date;
use crate::resolver::{resolve_account, resolve_payee, PayeeKey};
use crate::store::{insert_expense, list_payees};

/// Outcome accumulator for one import run. Owned exclusively by that run;
/// read once at the end by the reporter.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportCounters {
    pub success_count: usize,
    pub duplicate_count: usize,
    pub skipped_count: usize,
    pub error_count: usize,
}

/// The user's answer for one (new row, existing match) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateDecision {
    AddAnyway,
    Skip,
}

/// The interactive suspension point: the pipeline does not advance past a
/// flagged row until this returns. Implementations must produce exactly one
/// decision per call.
pub trait DuplicateConfirmer {
    fn confirm(&mut self, incoming: &ExpenseRecord, existing: &ExpenseRecord) -> DuplicateDecision;
}

/// Drive every parsed row through resolve -> categorize -> duplicate check
/// -> insert, strictly in file order, one row at a time. Row i+1 never
/// starts until row i's side effects and any user decision have completed.
///
/// Per-row failures (payee creation, duplicate query, insert) are absorbed
/// into `error_count` and the run continues; rows are never retried. Once
/// the sequence is exhausted the payee cache is refreshed from storage so
/// the caller sees lazily created payees.
pub fn run_import(
    conn: &Connection,
    rows: &[ImportedRow],
    accounts: &[EntityRef],
    categories: &[EntityRef],
    payees: &mut Vec<EntityRef>,
    confirmer: &mut dyn DuplicateConfirmer,
) -> Result<ImportCounters> {
    let mut counters = ImportCounters::default();

    for row in rows {
        process_row(conn, row, accounts, categories, payees, confirmer, &mut counters);
    }

    *payees = list_payees(conn)?;
    Ok(counters)
}

fn process_row(
    conn: &Connection,
    row: &ImportedRow,
    accounts: &[EntityRef],
    categories: &[EntityRef],
    payees: &mut Vec<EntityRef>,
    confirmer: &mut dyn DuplicateConfirmer,
    counters: &mut ImportCounters,
) {
    // The parser's filter guarantees this resolves; a miss here means the
    // caller handed us unfiltered rows, and the row is skipped quietly.
    let Some(account) = resolve_account(accounts, &row.account) else {
        counters.skipped_count += 1;
        return;
    };

    let Some(date) = parse_row_date(&row.date) else {
        counters.error_count += 1;
        return;
    };
    let stored_date = format!("{}T00:00:00", date.format("%Y-%m-%d"));

    let category = categorize(row, categories);

    let duplicate = match find_duplicate(
        conn,
        &DuplicateCandidate {
            date,
            account_id: account.id,
            outflow: row.outflow,
            inflow: row.inflow,
        },
    ) {
        Ok(result) => result,
        Err(_) => {
            counters.error_count += 1;
            return;
        }
    };

    match duplicate {
        Some(existing) => {
            counters.duplicate_count += 1;
            let incoming = display_record(row, &stored_date, account, category);
            match confirmer.confirm(&incoming, &existing) {
                DuplicateDecision::AddAnyway => {
                    match persist_row(conn, row, &stored_date, account.id, category, payees) {
                        Ok(()) => {
                            counters.success_count += 1;
                            // imported after all, so no longer an unresolved duplicate
                            counters.duplicate_count -= 1;
                        }
                        Err(_) => counters.error_count += 1,
                    }
                }
                DuplicateDecision::Skip => {}
            }
        }
        None => match persist_row(conn, row, &stored_date, account.id, category, payees) {
            Ok(()) => counters.success_count += 1,
            Err(_) => counters.error_count += 1,
        },
    }
}

fn persist_row(
    conn: &Connection,
    row: &ImportedRow,
    stored_date: &str,
    account_id: i64,
    category: Option<&EntityRef>,
    payees: &mut Vec<EntityRef>,
) -> Result<()> {
    let payee_id = match row.payee.as_deref() {
        Some(name) => resolve_payee(conn, payees, PayeeKey::Name(name))?,
        None => None,
    };
    insert_expense(
        conn,
        &NewExpense {
            date: stored_date.to_string(),
            account_id,
            payee_id,
            category_id: category.map(|c| c.id),
            memo: row.memo.clone(),
            outflow: row.outflow,
            inflow: row.inflow,
        },
    )?;
    Ok(())
}

/// Display form of a not-yet-persisted row for the duplicate prompt. The
/// sentinel id -1 marks that it has no identity yet.
fn display_record(
    row: &ImportedRow,
    stored_date: &str,
    account: &EntityRef,
    category: Option<&EntityRef>,
) -> ExpenseRecord {
    ExpenseRecord {
        id: -1,
        date: stored_date.to_string(),
        account: account.label.clone(),
        payee: row.payee.clone().unwrap_or_default(),
        category: category.map(|c| c.label.clone()).unwrap_or_default(),
        memo: row.memo.clone(),
        outflow: row.outflow,
        inflow: row.inflow,
    }
}
