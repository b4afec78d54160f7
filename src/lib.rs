// Bank Client Analysis - Core Library
// Exposes the store setup and the query battery for the CLI and tests

pub mod models;
pub mod seed;
pub mod db;
pub mod format;
pub mod analysis;

// Re-export commonly used types
pub use models::{Client, ClientDetail, Card};
pub use seed::{load_seed, SeedData};
pub use db::{
    Table, SeedSummary, DEFAULT_DB_PATH,
    recreate_store, setup_database, seed_data,
    insert_clients, insert_client_details, insert_cards,
    count_rows, orphan_card_count,
};
pub use format::{display_value, render_table};
pub use analysis::{
    AnalyticalQuery, ResultShape, QueryResult, ResultTable, ANALYTICAL_QUERIES,
    execute_query, execute_and_print, run_queries, run_analysis,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
