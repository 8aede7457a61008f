mod client;
mod address;

pub use client::ClientRecord;
pub use address::AddressRecord;
