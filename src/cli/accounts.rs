use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::Result;
use crate::settings::get_data_dir;
use crate::store::{insert_account, list_accounts};

pub fn add(name: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("mabel.db"))?;
    insert_account(&conn, name)?;
    println!("Added account: {name}");
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("mabel.db"))?;
    let accounts = list_accounts(&conn)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name"]);
    for account in accounts {
        table.add_row(vec![Cell::new(account.id), Cell::new(account.label)]);
    }
    println!("Accounts\n{table}");
    Ok(())
}
