//! Schema Manager (§4.4): declares and idempotently creates per-dataset
//! tables, their aggregating materialized views, TTL policies, and the
//! shared metadatabase.
//!
//! All DDL is expressed as functions that `format!` a `CREATE ... IF NOT
//! EXISTS` string, the same way the broader example pack's ClickHouse
//! integrations build per-tenant schema — collected into an ordered
//! `Vec<String>` and run one at a time through [`rita_store::Session`].
//! Writing to a staging table is a contract that transparently populates
//! the paired materialized view; this crate never aggregates client-side.

pub mod manager;
pub mod metadatabase;
pub mod tables;

pub use manager::{create_dataset_schema, create_metadatabase_schema};
