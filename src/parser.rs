use std::path::Path;

use calamine::{Data, Reader};
use chrono::NaiveDate;

use crate::error::{MabelError, Result};
use crate::models::{EntityRef, ImportedRow};
use crate::resolver::resolve_account;

// Fixed positional schema shared by the XLSX and CSV paths:
// date, account, payee, category, memo, outflow, inflow
const COL_DATE: usize = 0;
const COL_ACCOUNT: usize = 1;
const COL_PAYEE: usize = 2;
const COL_CATEGORY: usize = 3;
const COL_MEMO: usize = 4;
const COL_OUTFLOW: usize = 5;
const COL_INFLOW: usize = 6;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn parse_amount_opt(raw: &str) -> Option<f64> {
    let s = raw.replace(',', "").replace('"', "").replace('$', "");
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return inner.trim().parse::<f64>().ok().map(|v| -v);
    }
    s.parse().ok()
}

pub fn excel_serial_to_date(serial: f64) -> String {
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    let base = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
    let date = base + chrono::Duration::days(serial as i64);
    date.format("%Y-%m-%d").to_string()
}

/// Parse the free-text date of an imported row. Serial dates were already
/// normalized to ISO by the parser, so this mostly sees ISO strings, but
/// hand-edited sheets show up with slashed or long-form dates too.
pub fn parse_row_date(raw: &str) -> Option<NaiveDate> {
    let mut raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    // Trim fractional seconds / zone suffix off ISO timestamps
    if raw.contains('T') {
        if let Some(idx) = raw.find(['.', 'Z', '+']) {
            raw = &raw[..idx];
        }
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y", "%b %d, %Y", "%B %d, %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    None
}

fn known_account(accounts: &[EntityRef], row: &ImportedRow) -> bool {
    resolve_account(accounts, &row.account).is_some()
}

// ---------------------------------------------------------------------------
// XLSX
// ---------------------------------------------------------------------------

fn cell_text(row: &[Data], idx: usize) -> String {
    match row.get(idx) {
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Float(f)) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Bool(b)) => b.to_string(),
        Some(Data::DateTime(dt)) => excel_serial_to_date(dt.as_f64()),
        _ => String::new(),
    }
}

fn cell_date(row: &[Data]) -> String {
    match row.get(COL_DATE) {
        Some(Data::DateTime(dt)) => excel_serial_to_date(dt.as_f64()),
        Some(Data::Float(f)) => excel_serial_to_date(*f),
        Some(Data::Int(i)) => excel_serial_to_date(*i as f64),
        Some(Data::DateTimeIso(s)) => s.trim().to_string(),
        Some(Data::String(s)) => s.trim().to_string(),
        _ => String::new(),
    }
}

fn cell_amount(row: &[Data], idx: usize) -> Option<f64> {
    match row.get(idx) {
        Some(Data::Float(f)) => Some(*f),
        Some(Data::Int(i)) => Some(*i as f64),
        Some(Data::String(s)) => parse_amount_opt(s),
        _ => None,
    }
}

fn parse_workbook(file_path: &Path) -> Result<Vec<ImportedRow>> {
    let mut workbook = calamine::open_workbook_auto(file_path)
        .map_err(|e| MabelError::Parse(e.to_string()))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| MabelError::Parse("workbook has no sheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| MabelError::Parse(e.to_string()))?;

    // Row 1 of the sheet holds the column labels; always a fixed offset.
    let rows = range
        .rows()
        .skip(1)
        .map(|row| ImportedRow {
            date: cell_date(row),
            account: cell_text(row, COL_ACCOUNT),
            payee: non_empty(cell_text(row, COL_PAYEE)),
            category: non_empty(cell_text(row, COL_CATEGORY)),
            memo: cell_text(row, COL_MEMO),
            outflow: cell_amount(row, COL_OUTFLOW),
            inflow: cell_amount(row, COL_INFLOW),
        })
        .collect();
    Ok(rows)
}

// ---------------------------------------------------------------------------
// CSV (same positional columns)
// ---------------------------------------------------------------------------

fn parse_csv(file_path: &Path) -> Result<Vec<ImportedRow>> {
    let file = std::fs::File::open(file_path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        if i == 0 {
            // header-label row, same fixed offset as the XLSX path
            continue;
        }
        let field = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();
        rows.push(ImportedRow {
            date: field(COL_DATE),
            account: field(COL_ACCOUNT),
            payee: non_empty(field(COL_PAYEE)),
            category: non_empty(field(COL_CATEGORY)),
            memo: field(COL_MEMO),
            outflow: parse_amount_opt(&field(COL_OUTFLOW)),
            inflow: parse_amount_opt(&field(COL_INFLOW)),
        });
    }
    Ok(rows)
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

/// Parse an uploaded spreadsheet into importable rows. Rows whose account
/// text matches no known account label never reach the pipeline; they are
/// dropped here without touching any counter.
pub fn parse(file_path: &Path, accounts: &[EntityRef]) -> Result<Vec<ImportedRow>> {
    let is_csv = file_path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    let rows = if is_csv {
        parse_csv(file_path)?
    } else {
        parse_workbook(file_path)?
    };
    Ok(rows
        .into_iter()
        .filter(|row| known_account(accounts, row))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn known_accounts() -> Vec<EntityRef> {
        vec![
            EntityRef::new(1, "Chequing"),
            EntityRef::new(2, "Nick Visa"),
        ]
    }

    fn write_csv(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let content = format!("date,account,payee,category,memo,outflow,inflow\n{body}");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_amount_opt() {
        assert_eq!(parse_amount_opt("1,234.56"), Some(1234.56));
        assert_eq!(parse_amount_opt("$3.00"), Some(3.0));
        assert_eq!(parse_amount_opt("(50.00)"), Some(-50.0));
        assert_eq!(parse_amount_opt(""), None);
        assert_eq!(parse_amount_opt("n/a"), None);
    }

    #[test]
    fn test_excel_serial_to_date() {
        assert_eq!(excel_serial_to_date(45667.0), "2025-01-10");
    }

    #[test]
    fn test_parse_row_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
        assert_eq!(parse_row_date("2025-04-02"), Some(expected));
        assert_eq!(parse_row_date("2025-04-02T00:00:00"), Some(expected));
        assert_eq!(parse_row_date("2025-04-02T00:00:00.000Z"), Some(expected));
        assert_eq!(parse_row_date("04/02/2025"), Some(expected));
        assert_eq!(parse_row_date("Apr 02, 2025"), Some(expected));
        assert_eq!(parse_row_date("April 02, 2025"), Some(expected));
        assert_eq!(parse_row_date("not a date"), None);
        assert_eq!(parse_row_date(""), None);
    }

    #[test]
    fn test_parse_csv_maps_columns_positionally() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "import.csv",
            "2025-04-02,Chequing,Tim Hortons,Coffee,morning run,3.00,\n",
        );
        let rows = parse(&path, &known_accounts()).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.date, "2025-04-02");
        assert_eq!(row.account, "Chequing");
        assert_eq!(row.payee.as_deref(), Some("Tim Hortons"));
        assert_eq!(row.category.as_deref(), Some("Coffee"));
        assert_eq!(row.memo, "morning run");
        assert_eq!(row.outflow, Some(3.0));
        assert_eq!(row.inflow, None);
    }

    #[test]
    fn test_parse_drops_header_artifact_row() {
        let dir = tempfile::tempdir().unwrap();
        // The first line is always treated as the header-label row even when
        // it happens to look like data.
        let path = dir.path().join("import.csv");
        std::fs::write(
            &path,
            "2025-04-01,Chequing,Dropped Row,,,1.00,\n2025-04-02,Chequing,Kept Row,,,2.00,\n",
        )
        .unwrap();
        let rows = parse(&path, &known_accounts()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].payee.as_deref(), Some("Kept Row"));
    }

    #[test]
    fn test_parse_filters_unknown_accounts() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "import.csv",
            "2025-04-02,Nonexistent Bank,Vendor,,,5.00,\n\
             2025-04-03,chequing,Vendor,,,6.00,\n",
        );
        let rows = parse(&path, &known_accounts()).unwrap();
        // unknown account dropped, case-insensitive match kept
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].account, "chequing");
    }

    #[test]
    fn test_parse_empty_optional_fields_become_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "import.csv", "2025-04-02,Chequing,,,,,\n");
        let rows = parse(&path, &known_accounts()).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].payee.is_none());
        assert!(rows[0].category.is_none());
        assert!(rows[0].outflow.is_none());
        assert!(rows[0].inflow.is_none());
    }

    #[test]
    fn test_parse_unreadable_workbook_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bogus.xlsx");
        std::fs::write(&path, b"this is not a workbook").unwrap();
        let result = parse(&path, &known_accounts());
        assert!(matches!(result, Err(MabelError::Parse(_))));
    }
}
