// 👥 Record Models - Clients, Client Details, Cards
// One struct per table; field names match the CSV headers and column names.

use serde::Deserialize;

// ============================================================================
// CLIENT
// ============================================================================

/// Bank client account state
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Client {
    pub client_id: i64,

    /// false = churned / inactive
    pub active: bool,

    pub balance: f64,
}

// ============================================================================
// CLIENT DETAIL
// ============================================================================

/// Demographic details, exactly one per client
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientDetail {
    /// References `Client::client_id`
    pub client_id: i64,

    pub country: String,

    pub credit_rating: i64,

    pub salary: f64,

    /// Single-letter code ("M" / "F")
    pub gender: String,
}

// ============================================================================
// CARD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Card {
    pub card_id: i64,

    /// Owning client, references `Client::client_id`
    pub client_id: i64,

    /// Free-text category (Visa, MasterCard, Amex, ...)
    pub card_type: String,
}
