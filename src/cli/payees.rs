use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::Result;
use crate::settings::get_data_dir;
use crate::store::list_payees;

pub fn list() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("mabel.db"))?;
    let payees = list_payees(&conn)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name"]);
    for payee in payees {
        table.add_row(vec![Cell::new(payee.id), Cell::new(payee.label)]);
    }
    println!("Payees\n{table}");
    Ok(())
}
