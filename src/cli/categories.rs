use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::Result;
use crate::settings::get_data_dir;
use crate::store::{insert_category, list_categories};

pub fn add(name: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("mabel.db"))?;
    insert_category(&conn, name)?;
    println!("Added category: {name}");
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("mabel.db"))?;
    let categories = list_categories(&conn)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name"]);
    for category in categories {
        table.add_row(vec![Cell::new(category.id), Cell::new(category.label)]);
    }
    println!("Categories\n{table}");
    Ok(())
}
