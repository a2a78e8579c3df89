use crate::models::{EntityRef, ImportedRow};

/// Outflow-amount constraint on a heuristic rule.
enum Amount {
    Any,
    Eq(f64),
    Below(f64),
    AtLeast(f64),
}

/// One heuristic: if any payee needle matches (and the optional account and
/// amount constraints hold), categorize into the first category whose label
/// contains `category`.
struct Rule {
    payee: &'static [&'static str],
    account: Option<&'static str>,
    outflow: Amount,
    category: &'static str,
}

impl Rule {
    fn applies(&self, payee: &str, account: &str, outflow: Option<f64>) -> bool {
        if !self.payee.iter().any(|needle| payee.contains(needle)) {
            return false;
        }
        if let Some(needle) = self.account {
            if !account.contains(needle) {
                return false;
            }
        }
        match self.outflow {
            Amount::Any => true,
            Amount::Eq(x) => outflow == Some(x),
            Amount::Below(x) => outflow.is_some_and(|v| v < x),
            Amount::AtLeast(x) => outflow.is_some_and(|v| v >= x),
        }
    }
}

const fn rule(payee: &'static [&'static str], category: &'static str) -> Rule {
    Rule {
        payee,
        account: None,
        outflow: Amount::Any,
        category,
    }
}

// Household vendor rules, evaluated top to bottom; the first match wins, so
// ordering is load-bearing (e.g. the two communauto amount bands).
const RULES: &[Rule] = &[
    rule(&["amazon prime"], "amazon"),
    Rule {
        payee: &["apple bill"],
        account: Some("nick"),
        outflow: Amount::Eq(4.51),
        category: "nick apple icloud",
    },
    Rule {
        payee: &["apple bill"],
        account: None,
        outflow: Amount::Eq(4.51),
        category: "jill apple icloud",
    },
    rule(&["monthly fee"], "bank fee"),
    rule(&["tim hortons", "second cup", "cafe", "coffee"], "coffee"),
    Rule {
        payee: &["communauto"],
        account: None,
        outflow: Amount::Below(7.0),
        category: "communauto subscription",
    },
    Rule {
        payee: &["communauto"],
        account: None,
        outflow: Amount::AtLeast(7.0),
        category: "communauto usage",
    },
    rule(&["costco"], "costco"),
    rule(&["optometry"], "essential"),
    rule(&["enbridge"], "gas"),
    rule(&["food basics", "fortino", "zarky"], "groceries"),
    Rule {
        payee: &["revive"],
        account: Some("nick"),
        outflow: Amount::Any,
        category: "nick gym",
    },
    Rule {
        payee: &["revive"],
        account: Some("jill"),
        outflow: Amount::Any,
        category: "jill gym",
    },
    rule(&["maison fritz", "prime choice"], "haircut"),
    rule(&["insurance"], "insurance"),
    rule(&["alectra"], "hydro"),
    rule(&["bell canada"], "internet"),
    rule(&["netflix"], "netflix"),
    rule(&["nespresso"], "nespresso"),
    rule(&["nslsc"], "osap"),
    Rule {
        payee: &["koodo"],
        account: Some("nick"),
        outflow: Amount::Any,
        category: "nick phone",
    },
    Rule {
        payee: &["koodo"],
        account: Some("jill"),
        outflow: Amount::Any,
        category: "jill phone",
    },
    rule(
        &["osteopathy", "wellness collectiv", "wellness inc"],
        "preventative",
    ),
    rule(&["questrade"], "nick retirement"),
    rule(&["mutual funds"], "jill retirement"),
    rule(&["vehikl"], "nick salary"),
    rule(&["mcmaster univ - payroll deposit"], "jill salary"),
    rule(&["sobi"], "sobi"),
    rule(&["spotify"], "spotify"),
    rule(&["sweat"], "sweat"),
    rule(&["uber", "shell", "presto", "esso"], "transportation"),
    rule(&["digital ocean", "hostpapa"], "website hosting"),
];

fn find_category<'a>(categories: &'a [EntityRef], needle: &str) -> Option<&'a EntityRef> {
    categories
        .iter()
        .find(|c| c.label.to_lowercase().contains(needle))
}

/// Classify an imported row into a category reference, or `None`.
///
/// An explicit category label on the row is matched first; only rows with
/// both an account and a payee fall through to the heuristic table. On a
/// heuristic hit the label lookup result is returned as-is, even when the
/// label is missing from the known categories — later rules are not tried.
pub fn categorize<'a>(row: &ImportedRow, categories: &'a [EntityRef]) -> Option<&'a EntityRef> {
    if let Some(text) = row.category.as_deref() {
        let text = text.trim().to_lowercase();
        if !text.is_empty() {
            if let Some(matched) = find_category(categories, &text) {
                return Some(matched);
            }
        }
    }

    let account = row.account.trim().to_lowercase();
    let payee = match row.payee.as_deref() {
        Some(p) if !p.trim().is_empty() => p.trim().to_lowercase(),
        _ => return None,
    };
    if account.is_empty() {
        return None;
    }

    for rule in RULES {
        if rule.applies(&payee, &account, row.outflow) {
            return find_category(categories, rule.category);
        }
    }
    None
}
