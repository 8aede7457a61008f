use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::Address;

/// A client with the addresses it owns, as served by the API.
#[derive(Debug, Clone, Serialize)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: NaiveDateTime,
    pub addresses: Vec<Address>,
}

/// Contact fields of a client: name, email, and phone when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl Client {
    /// The address flagged as default, or the first one in insertion order
    /// when none is flagged. `None` for a client without addresses.
    ///
    /// More than one address may carry the flag; the first flagged one
    /// wins.
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses
            .iter()
            .find(|address| address.is_default)
            .or_else(|| self.addresses.first())
    }

    /// All addresses with the given type tag, in insertion order. Exact
    /// string match on the tag.
    pub fn addresses_by_type(&self, address_type: &str) -> Vec<&Address> {
        self.addresses
            .iter()
            .filter(|address| address.address_type == address_type)
            .collect()
    }

    /// Whether any of the client's addresses is outside Spain.
    pub fn has_international_addresses(&self) -> bool {
        self.addresses.iter().any(Address::is_international)
    }

    pub fn contact_info(&self) -> ContactInfo {
        ContactInfo {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}
