use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::fs;
use std::path::Path;

use crate::models::{Card, Client, ClientDetail};
use crate::seed::load_seed;

/// Store file used when no override is configured
pub const DEFAULT_DB_PATH: &str = "bank_clients.db";

/// Tables created by `setup_database`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Clients,
    ClientDetails,
    Cards,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Clients => "clients",
            Table::ClientDetails => "client_details",
            Table::Cards => "cards",
        }
    }
}

/// Rows inserted by `seed_data`, per table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub clients: usize,
    pub client_details: usize,
    pub cards: usize,
}

/// Delete any existing store at `path` and open a fresh, empty one.
///
/// The returned connection closes when dropped.
pub fn recreate_store(path: &Path) -> Result<Connection> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove old store {}", path.display()))?;
    }

    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open store {}", path.display()))?;

    Ok(conn)
}

/// Create the three tables. Expects an empty store: fails if any of them
/// already exists.
pub fn setup_database(conn: &Connection) -> Result<()> {
    // SQLite ignores FOREIGN KEY clauses unless this is on
    conn.pragma_update(None, "foreign_keys", "ON")?;

    // ==========================================================================
    // Clients
    // ==========================================================================
    conn.execute(
        "CREATE TABLE clients (
            client_id INTEGER PRIMARY KEY,
            active INTEGER NOT NULL,
            balance REAL NOT NULL
        )",
        [],
    )
    .context("Failed to create clients table")?;

    // ==========================================================================
    // Client details (1:1 with clients)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE client_details (
            client_id INTEGER PRIMARY KEY,
            country TEXT NOT NULL,
            credit_rating INTEGER NOT NULL,
            salary REAL NOT NULL,
            gender TEXT NOT NULL,
            FOREIGN KEY(client_id) REFERENCES clients(client_id)
        )",
        [],
    )
    .context("Failed to create client_details table")?;

    // ==========================================================================
    // Cards (N:1 with clients)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE cards (
            card_id INTEGER PRIMARY KEY,
            client_id INTEGER NOT NULL,
            card_type TEXT NOT NULL,
            FOREIGN KEY(client_id) REFERENCES clients(client_id)
        )",
        [],
    )
    .context("Failed to create cards table")?;

    Ok(())
}

/// Insert the fixed sample dataset in a single transaction
pub fn seed_data(conn: &mut Connection) -> Result<SeedSummary> {
    let seed = load_seed()?;

    let tx = conn.transaction()?;
    let summary = SeedSummary {
        clients: insert_clients(&tx, &seed.clients)?,
        client_details: insert_client_details(&tx, &seed.client_details)?,
        cards: insert_cards(&tx, &seed.cards)?,
    };
    tx.commit()?;

    Ok(summary)
}

pub fn insert_clients(conn: &Connection, clients: &[Client]) -> Result<usize> {
    let mut stmt =
        conn.prepare("INSERT INTO clients (client_id, active, balance) VALUES (?1, ?2, ?3)")?;

    for client in clients {
        stmt.execute(params![client.client_id, client.active, client.balance])?;
    }

    Ok(clients.len())
}

pub fn insert_client_details(conn: &Connection, details: &[ClientDetail]) -> Result<usize> {
    let mut stmt = conn.prepare(
        "INSERT INTO client_details (client_id, country, credit_rating, salary, gender)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;

    for detail in details {
        stmt.execute(params![
            detail.client_id,
            detail.country,
            detail.credit_rating,
            detail.salary,
            detail.gender,
        ])?;
    }

    Ok(details.len())
}

pub fn insert_cards(conn: &Connection, cards: &[Card]) -> Result<usize> {
    let mut stmt =
        conn.prepare("INSERT INTO cards (card_id, client_id, card_type) VALUES (?1, ?2, ?3)")?;

    for card in cards {
        stmt.execute(params![card.card_id, card.client_id, card.card_type])?;
    }

    Ok(cards.len())
}

pub fn count_rows(conn: &Connection, table: Table) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", table.as_str());
    let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;

    Ok(count)
}

/// Cards whose client_id does not resolve to a client
pub fn orphan_card_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*)
         FROM cards c
         LEFT JOIN clients cl ON c.client_id = cl.client_id
         WHERE cl.client_id IS NULL",
        [],
        |row| row.get(0),
    )?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_connection() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        seed_data(&mut conn).unwrap();
        conn
    }

    fn unique_temp_path(prefix: &str) -> std::path::PathBuf {
        use std::time::{SystemTime, UNIX_EPOCH};
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("{}_{}.db", prefix, nanos))
    }

    #[test]
    fn test_seed_counts() {
        let conn = seeded_connection();

        assert_eq!(count_rows(&conn, Table::Clients).unwrap(), 7);
        assert_eq!(count_rows(&conn, Table::ClientDetails).unwrap(), 7);
        assert_eq!(count_rows(&conn, Table::Cards).unwrap(), 9);
        assert_eq!(
            orphan_card_count(&conn).unwrap(),
            0,
            "Every card should reference an existing client"
        );

        println!("✅ Seed counts test PASSED");
    }

    #[test]
    fn test_seed_summary() {
        let mut conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();

        let summary = seed_data(&mut conn).unwrap();

        assert_eq!(
            summary,
            SeedSummary { clients: 7, client_details: 7, cards: 9 }
        );
    }

    #[test]
    fn test_active_flag_stored_as_integer() {
        let conn = seeded_connection();

        let active: i64 = conn
            .query_row("SELECT active FROM clients WHERE client_id = 2", [], |row| row.get(0))
            .unwrap();
        let inactive: i64 = conn
            .query_row("SELECT active FROM clients WHERE client_id = 1", [], |row| row.get(0))
            .unwrap();

        assert_eq!(active, 1);
        assert_eq!(inactive, 0);
    }

    #[test]
    fn test_card_with_unknown_client_rejected() {
        let conn = seeded_connection();

        let orphan = Card {
            card_id: 999,
            client_id: 42,
            card_type: "Visa".to_string(),
        };
        let err = insert_cards(&conn, &[orphan]).unwrap_err();

        match err.downcast_ref::<rusqlite::Error>() {
            Some(rusqlite::Error::SqliteFailure(e, _)) => {
                assert_eq!(e.code, rusqlite::ErrorCode::ConstraintViolation);
            }
            other => panic!("Expected constraint violation, got {:?}", other),
        }
        assert_eq!(count_rows(&conn, Table::Cards).unwrap(), 9);

        println!("✅ Referential integrity test PASSED");
    }

    #[test]
    fn test_detail_with_unknown_client_rejected() {
        let conn = seeded_connection();

        let detail = ClientDetail {
            client_id: 42,
            country: "Spain".to_string(),
            credit_rating: 600,
            salary: 40000.0,
            gender: "F".to_string(),
        };

        assert!(insert_client_details(&conn, &[detail]).is_err());
    }

    #[test]
    fn test_setup_twice_fails() {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();

        assert!(
            setup_database(&conn).is_err(),
            "Schema setup should fail when tables already exist"
        );
    }

    #[test]
    fn test_seed_twice_fails() {
        let mut conn = seeded_connection();

        assert!(seed_data(&mut conn).is_err(), "Duplicate primary keys should be rejected");
        // The failed transaction rolls back
        assert_eq!(count_rows(&conn, Table::Clients).unwrap(), 7);
    }

    #[test]
    fn test_recreate_store_replaces_existing_file() {
        let path = unique_temp_path("bank_analysis_recreate");
        fs::write(&path, b"not a sqlite database").unwrap();

        {
            let mut conn = recreate_store(&path).unwrap();
            setup_database(&conn).unwrap();
            seed_data(&mut conn).unwrap();
        }

        // Second run starts from an empty store again
        {
            let conn = recreate_store(&path).unwrap();
            setup_database(&conn).unwrap();
            assert_eq!(count_rows(&conn, Table::Clients).unwrap(), 0);
        }

        fs::remove_file(&path).unwrap();

        println!("✅ Store recreation test PASSED");
    }

    #[test]
    fn test_recreate_store_without_existing_file() {
        let path = unique_temp_path("bank_analysis_fresh");
        assert!(!path.exists());

        let conn = recreate_store(&path).unwrap();
        setup_database(&conn).unwrap();
        drop(conn);

        assert!(path.exists());
        fs::remove_file(&path).unwrap();
    }
}
