/// A lookup row (account, payee, or category): id plus display label.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRef {
    pub id: i64,
    pub label: String,
}

impl EntityRef {
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// One parsed spreadsheet line, pre-persistence. All entity fields are still
/// free text at this point; the date stays raw until the pipeline parses it.
#[derive(Debug, Clone)]
pub struct ImportedRow {
    pub date: String,
    pub account: String,
    pub payee: Option<String>,
    pub category: Option<String>,
    pub memo: String,
    pub outflow: Option<f64>,
    pub inflow: Option<f64>,
}

/// Denormalized display form of a stored expense (labels, not ids).
/// An unpersisted row shown in the duplicate prompt carries id -1.
#[derive(Debug, Clone)]
pub struct ExpenseRecord {
    pub id: i64,
    pub date: String,
    pub account: String,
    pub payee: String,
    pub category: String,
    pub memo: String,
    pub outflow: Option<f64>,
    pub inflow: Option<f64>,
}

/// Insert form for the expenses table.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub date: String,
    pub account_id: i64,
    pub payee_id: Option<i64>,
    pub category_id: Option<i64>,
    pub memo: String,
    pub outflow: Option<f64>,
    pub inflow: Option<f64>,
}
