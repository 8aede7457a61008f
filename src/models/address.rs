use crate::domain::Address;

/// Persisted row of the `addresses` table.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct AddressRecord {
    pub id: i32,
    pub client_id: i32,
    pub address_type: String,
    pub street: String,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: String,
    pub is_default: bool,
    pub created_at: chrono::NaiveDateTime,
}

impl AddressRecord {
    /// Convert the persisted row into its domain value, copying every
    /// scalar field verbatim.
    pub fn to_domain(&self) -> Address {
        Address {
            id: self.id,
            client_id: self.client_id,
            address_type: self.address_type.clone(),
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            postal_code: self.postal_code.clone(),
            country: self.country.clone(),
            is_default: self.is_default,
            created_at: self.created_at,
        }
    }
}
