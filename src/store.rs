use rusqlite::Connection;

use crate::error::Result;
use crate::models::{EntityRef, ExpenseRecord, NewExpense};

fn list_entities(conn: &Connection, table: &str) -> Result<Vec<EntityRef>> {
    let mut stmt = conn.prepare(&format!("SELECT id, name FROM {table} ORDER BY name"))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(EntityRef {
                id: row.get(0)?,
                label: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn list_accounts(conn: &Connection) -> Result<Vec<EntityRef>> {
    list_entities(conn, "accounts")
}

pub fn list_categories(conn: &Connection) -> Result<Vec<EntityRef>> {
    list_entities(conn, "categories")
}

pub fn list_payees(conn: &Connection) -> Result<Vec<EntityRef>> {
    list_entities(conn, "payees")
}

pub fn insert_account(conn: &Connection, name: &str) -> Result<i64> {
    conn.execute("INSERT INTO accounts (name) VALUES (?1)", [name])?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_category(conn: &Connection, name: &str) -> Result<i64> {
    conn.execute("INSERT INTO categories (name) VALUES (?1)", [name])?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_payee(conn: &Connection, name: &str) -> Result<i64> {
    conn.execute("INSERT INTO payees (name) VALUES (?1)", [name])?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_expense(conn: &Connection, expense: &NewExpense) -> Result<i64> {
    conn.execute(
        "INSERT INTO expenses (date, account_id, payee_id, category_id, memo, outflow, inflow) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            expense.date,
            expense.account_id,
            expense.payee_id,
            expense.category_id,
            expense.memo,
            expense.outflow,
            expense.inflow,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Denormalized expense rows for one calendar month, oldest first. This is
/// the view the import command re-reads after a run so new rows show up.
pub fn month_expenses(conn: &Connection, year: i32, month: u32) -> Result<Vec<ExpenseRecord>> {
    let start = format!("{year:04}-{month:02}-01T00:00:00");
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let end = format!("{next_year:04}-{next_month:02}-01T00:00:00");

    let mut stmt = conn.prepare(
        "SELECT e.id, e.date, a.name, COALESCE(p.name, ''), COALESCE(c.name, ''), e.memo, e.outflow, e.inflow \
         FROM expenses e \
         JOIN accounts a ON e.account_id = a.id \
         LEFT JOIN payees p ON e.payee_id = p.id \
         LEFT JOIN categories c ON e.category_id = c.id \
         WHERE e.date >= ?1 AND e.date < ?2 \
         ORDER BY e.date, e.id",
    )?;
    let rows = stmt
        .query_map([&start, &end], |row| {
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
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
