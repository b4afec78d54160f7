// 🌱 Seed Data - fixed sample dataset
// The dataset lives in data/*.csv and is compiled into the binary.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::models::{Card, Client, ClientDetail};

const CLIENTS_CSV: &str = include_str!("../data/clients.csv");
const CLIENT_DETAILS_CSV: &str = include_str!("../data/client_details.csv");
const CARDS_CSV: &str = include_str!("../data/cards.csv");

/// Complete seed dataset, in insertion order
#[derive(Debug, Clone)]
pub struct SeedData {
    pub clients: Vec<Client>,
    pub client_details: Vec<ClientDetail>,
    pub cards: Vec<Card>,
}

/// Parse the embedded CSV files into typed records
pub fn load_seed() -> Result<SeedData> {
    Ok(SeedData {
        clients: parse_csv(CLIENTS_CSV, "clients")?,
        client_details: parse_csv(CLIENT_DETAILS_CSV, "client_details")?,
        cards: parse_csv(CARDS_CSV, "cards")?,
    })
}

fn parse_csv<T: DeserializeOwned>(data: &str, name: &str) -> Result<Vec<T>> {
    let mut rdr = csv::Reader::from_reader(data.as_bytes());

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: T =
            result.with_context(|| format!("Failed to deserialize {} seed row", name))?;
        records.push(record);
    }

    Ok(records)
}
