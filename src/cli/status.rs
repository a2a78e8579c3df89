use crate::db::get_connection;
use crate::error::Result;
use crate::settings::get_data_dir;

pub fn run() -> Result<()> {
    let db_path = get_data_dir().join("mabel.db");
    let conn = get_connection(&db_path)?;

    println!("Database: {}", db_path.display());
    for table in ["accounts", "payees", "categories", "expenses"] {
        let count: i64 =
            conn.query_row(&format!("SELECT count(*) FROM {table}"), [], |r| r.get(0))?;
        println!("  {table}: {count}");
    }
    Ok(())
}
