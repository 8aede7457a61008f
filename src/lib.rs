//! Read-only HTTP directory of clients and their addresses, backed by
//! PostgreSQL.

pub mod config;
pub mod db;
pub mod domain;
pub mod http;
pub mod models;
