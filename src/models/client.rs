use crate::domain::Client;
use crate::models::AddressRecord;

/// Persisted row of the `clients` table.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct ClientRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

impl ClientRecord {
    /// Convert the persisted row into its domain value.
    ///
    /// `addresses` are the rows owned by this client, in insertion order.
    /// They are mapped along when `include_addresses` is set; otherwise the
    /// domain value carries an empty collection. Every scalar field is
    /// copied verbatim.
    pub fn to_domain(&self, addresses: &[AddressRecord], include_addresses: bool) -> Client {
        let addresses = if include_addresses {
            addresses.iter().map(AddressRecord::to_domain).collect()
        } else {
            Vec::new()
        };

        Client {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            created_at: self.created_at,
            addresses,
        }
    }
}
