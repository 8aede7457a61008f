mod client;
mod address;

pub use client::{Client, ContactInfo};
pub use address::Address;
