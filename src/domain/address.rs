use chrono::NaiveDateTime;
use serde::Serialize;

/// Countries a client address can have without counting as international.
/// Compared after lower-casing.
const DOMESTIC_COUNTRIES: [&str; 2] = ["españa", "spain"];

/// A postal address owned by one client.
#[derive(Debug, Clone, Serialize)]
pub struct Address {
    pub id: i32,
    pub client_id: i32,
    pub address_type: String,
    pub street: String,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: String,
    pub is_default: bool,
    pub created_at: NaiveDateTime,
}

impl Address {
    /// Render the address on one line: street, city, then state and postal
    /// code when present, then country.
    pub fn full_address(&self) -> String {
        let mut parts = vec![self.street.as_str(), self.city.as_str()];
        if let Some(state) = &self.state {
            parts.push(state);
        }
        if let Some(postal_code) = &self.postal_code {
            parts.push(postal_code);
        }
        parts.push(&self.country);
        parts.join(", ")
    }

    /// Whether the address is outside Spain.
    pub fn is_international(&self) -> bool {
        !DOMESTIC_COUNTRIES.contains(&self.country.to_lowercase().as_str())
    }
}
