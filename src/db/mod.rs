use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;
use crate::domain::Client;
use crate::models::{AddressRecord, ClientRecord};

/// Read access to the client directory, as the transport layer sees it.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// List clients with their addresses. With a filter, only clients whose
    /// email contains it as a case-insensitive substring are returned.
    async fn list_clients(&self, email_filter: Option<&str>) -> Result<Vec<Client>>;
}

/// Database connection pool
pub struct Database {
    pool: PgPool,
}

const LIST_CLIENTS: &str = r#"
SELECT
    c.id,
    c.name,
    c.email,
    c.phone,
    c.created_at,
    a.id AS address_id,
    a.address_type,
    a.street,
    a.city,
    a.state,
    a.postal_code,
    a.country,
    a.is_default,
    a.created_at AS address_created_at
FROM clients c
LEFT JOIN addresses a ON a.client_id = c.id
ORDER BY c.id ASC, a.id ASC
"#;

const LIST_CLIENTS_BY_EMAIL: &str = r#"
SELECT
    c.id,
    c.name,
    c.email,
    c.phone,
    c.created_at,
    a.id AS address_id,
    a.address_type,
    a.street,
    a.city,
    a.state,
    a.postal_code,
    a.country,
    a.is_default,
    a.created_at AS address_created_at
FROM clients c
LEFT JOIN addresses a ON a.client_id = c.id
WHERE c.email ILIKE $1
ORDER BY c.id ASC, a.id ASC
"#;

/// One row of the clients-to-addresses join. The address columns are NULL
/// for a client without any address.
#[derive(sqlx::FromRow)]
struct ClientAddressRow {
    id: i32,
    name: String,
    email: String,
    phone: Option<String>,
    created_at: chrono::NaiveDateTime,
    address_id: Option<i32>,
    address_type: Option<String>,
    street: Option<String>,
    city: Option<String>,
    state: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
    is_default: Option<bool>,
    address_created_at: Option<chrono::NaiveDateTime>,
}

impl ClientAddressRow {
    fn split(self) -> (ClientRecord, Option<AddressRecord>) {
        let address = match (
            self.address_id,
            self.address_type,
            self.street,
            self.city,
            self.country,
            self.is_default,
            self.address_created_at,
        ) {
            (
                Some(id),
                Some(address_type),
                Some(street),
                Some(city),
                Some(country),
                Some(is_default),
                Some(created_at),
            ) => Some(AddressRecord {
                id,
                client_id: self.id,
                address_type,
                street,
                city,
                state: self.state,
                postal_code: self.postal_code,
                country,
                is_default,
                created_at,
            }),
            _ => None,
        };

        let client = ClientRecord {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            created_at: self.created_at,
        };

        (client, address)
    }
}

impl Database {
    /// Create a new Database instance with a connection pool
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(config.database_url())
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ClientStore for Database {
    async fn list_clients(&self, email_filter: Option<&str>) -> Result<Vec<Client>> {
        let rows = match email_filter {
            Some(filter) => {
                let pattern = format!("%{filter}%");
                sqlx::query_as::<_, ClientAddressRow>(LIST_CLIENTS_BY_EMAIL)
                    .bind(pattern)
                    .fetch_all(self.get_pool())
                    .await?
            }
            None => {
                sqlx::query_as::<_, ClientAddressRow>(LIST_CLIENTS)
                    .fetch_all(self.get_pool())
                    .await?
            }
        };

        Ok(group_rows(rows))
    }
}

/// Fold join rows into one domain client each. The join repeats a client
/// row once per address, so clients are deduplicated by id, keeping
/// first-seen order; addresses stay in join order.
fn group_rows(rows: Vec<ClientAddressRow>) -> Vec<Client> {
    let mut order: Vec<i32> = Vec::new();
    let mut grouped: HashMap<i32, (ClientRecord, Vec<AddressRecord>)> = HashMap::new();

    for row in rows {
        let (client, address) = row.split();
        let id = client.id;
        let entry = grouped.entry(id).or_insert_with(|| {
            order.push(id);
            (client, Vec::new())
        });
        if let Some(address) = address {
            entry.1.push(address);
        }
    }

    order
        .into_iter()
        .filter_map(|id| grouped.remove(&id))
        .map(|(client, addresses)| client.to_domain(&addresses, true))
        .collect()
}

/// Initialize the database connection pool and bring the schema up to date
pub async fn init(config: &Config) -> Result<Database> {
    let db = Database::new(config).await?;

    sqlx::migrate!().run(db.get_pool()).await?;

    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timestamp() -> chrono::NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn row(client_id: i32, email: &str, address_id: Option<i32>) -> ClientAddressRow {
        ClientAddressRow {
            id: client_id,
            name: format!("Client {client_id}"),
            email: email.to_string(),
            phone: None,
            created_at: timestamp(),
            address_id,
            address_type: address_id.map(|_| "home".to_string()),
            street: address_id.map(|id| format!("Street {id}")),
            city: address_id.map(|_| "Madrid".to_string()),
            state: None,
            postal_code: None,
            country: address_id.map(|_| "España".to_string()),
            is_default: address_id.map(|_| false),
            address_created_at: address_id.map(|_| timestamp()),
        }
    }

    #[test]
    fn group_rows_dedups_repeated_client_rows() {
        let clients = group_rows(vec![
            row(1, "anna@example.com", Some(10)),
            row(1, "anna@example.com", Some(11)),
            row(2, "bob@example.com", Some(12)),
        ]);

        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].id, 1);
        assert_eq!(
            clients[0].addresses.iter().map(|a| a.id).collect::<Vec<_>>(),
            vec![10, 11]
        );
        assert_eq!(clients[1].id, 2);
        assert_eq!(clients[1].addresses.len(), 1);
    }

    #[test]
    fn group_rows_keeps_first_seen_order() {
        let clients = group_rows(vec![
            row(5, "eve@example.com", None),
            row(2, "bob@example.com", None),
            row(5, "eve@example.com", None),
        ]);

        assert_eq!(clients.iter().map(|c| c.id).collect::<Vec<_>>(), vec![5, 2]);
    }

    #[test]
    fn group_rows_maps_null_join_columns_to_no_address() {
        let clients = group_rows(vec![row(1, "anna@example.com", None)]);

        assert_eq!(clients.len(), 1);
        assert!(clients[0].addresses.is_empty());
    }

    #[test]
    fn group_rows_of_nothing_is_empty() {
        assert!(group_rows(Vec::new()).is_empty());
    }
}
