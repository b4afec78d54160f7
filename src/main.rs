use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;

use bank_client_analysis::{
    recreate_store, run_analysis, seed_data, setup_database, DEFAULT_DB_PATH,
};

fn main() -> Result<()> {
    println!("Bank Client Analysis");
    println!("{}", "=".repeat(30));

    let db_path = Path::new(DEFAULT_DB_PATH);

    // Old store is always discarded; connection closes when `conn` drops
    let mut conn = recreate_store(db_path)?;

    setup_database(&conn).context("Failed to initialize schema")?;
    println!("✓ Database created: {}", db_path.display());

    let summary = seed_data(&mut conn).context("Failed to seed data")?;
    println!(
        "✓ Test data added: {} clients, {} details, {} cards",
        summary.clients, summary.client_details, summary.cards
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_analysis(&conn, &mut out)?;
    out.flush()?;

    Ok(())
}
