use rusqlite::Connection;

use crate::error::Result;
use crate::models::EntityRef;
use crate::store::insert_payee;

/// Exact case-insensitive label match. Guaranteed to succeed for any row
/// that passed the parser's account filter.
pub fn resolve_account<'a>(accounts: &'a [EntityRef], label: &str) -> Option<&'a EntityRef> {
    let wanted = label.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    accounts.iter().find(|a| a.label.to_lowercase() == wanted)
}

/// Payee input for [`resolve_payee`]: either an id that is already resolved
/// (manual-entry path) or free text from a spreadsheet.
pub enum PayeeKey<'a> {
    Id(i64),
    Name(&'a str),
}

/// Resolve a payee to its id, creating the payee on demand. Newly created
/// payees are appended to the in-memory cache so a later row with the same
/// text reuses the id instead of inserting twice.
pub fn resolve_payee(
    conn: &Connection,
    payees: &mut Vec<EntityRef>,
    key: PayeeKey,
) -> Result<Option<i64>> {
    let name = match key {
        PayeeKey::Id(id) => return Ok(Some(id)),
        PayeeKey::Name(name) => name.trim(),
    };
    if name.is_empty() {
        return Ok(None);
    }

    let wanted = name.to_lowercase();
    if let Some(existing) = payees.iter().find(|p| p.label.to_lowercase() == wanted) {
        return Ok(Some(existing.id));
    }

    let id = insert_payee(conn, name)?;
    payees.push(EntityRef::new(id, name));
    Ok(Some(id))
}
