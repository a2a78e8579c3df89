use chrono::NaiveDate;
use rusqlite::Connection;

use crate::error::Result;
use crate::models::ExpenseRecord;

/// The duplicate-detection key for one candidate row: calendar day, account,
/// and the inflow-or-outflow amount (null compared as zero).
#[derive(Debug, Clone)]
pub struct DuplicateCandidate {
    pub date: NaiveDate,
    pub account_id: i64,
    pub outflow: Option<f64>,
    pub inflow: Option<f64>,
}

/// Look for an already-stored expense on the candidate's day, in the same
/// account, with a matching outflow or inflow. Only the amount sides the
/// candidate actually carries participate in the match; a stored null amount
/// compares as zero. A candidate with neither amount matches stored rows
/// whose amounts are both null or zero. Returns the first match in display
/// form; tie-breaks among equally exact duplicates are whatever the storage
/// layer returns first.
pub fn find_duplicate(
    conn: &Connection,
    candidate: &DuplicateCandidate,
) -> Result<Option<ExpenseRecord>> {
    let day_start = format!("{}T00:00:00", candidate.date.format("%Y-%m-%d"));
    let day_end = format!("{}T23:59:59", candidate.date.format("%Y-%m-%d"));

    let mut stmt = conn.prepare(
        "SELECT e.id, e.date, a.name, COALESCE(p.name, ''), COALESCE(c.name, ''), e.memo, e.outflow, e.inflow \
         FROM expenses e \
         JOIN accounts a ON e.account_id = a.id \
         LEFT JOIN payees p ON e.payee_id = p.id \
         LEFT JOIN categories c ON e.category_id = c.id \
         WHERE e.date >= ?1 AND e.date <= ?2 \
           AND e.account_id = ?3 \
           AND ((?4 IS NOT NULL AND COALESCE(e.outflow, 0) = ?4) \
             OR (?5 IS NOT NULL AND COALESCE(e.inflow, 0) = ?5) \
             OR (?4 IS NULL AND ?5 IS NULL \
                 AND COALESCE(e.outflow, 0) = 0 AND COALESCE(e.inflow, 0) = 0)) \
         LIMIT 1",
    )?;
    let mut rows = stmt.query_map(
        rusqlite::params![
            day_start,
            day_end,
            candidate.account_id,
            candidate.outflow,
            candidate.inflow,
        ],
        |row| {
            Ok(ExpenseRecord {
                id: row.get(0)?,
                date: row.get(1)?,
                account: row.get(2)?,
                payee: row.get(3)?,
                category: row.get(4)?,
                memo: row.get(5)?,
                outflow: row.get(6)?,
                inflow: row.get(7)?,
            })
        },
    )?;
    match rows.next() {
        Some(record) => Ok(Some(record?)),
        None => Ok(None),
    }
}
