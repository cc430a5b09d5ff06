//! Storage module for property records
//!
//! Provides the `PropertyStore` seam and its flat-file JSON implementation.
//! A real embedded or client-server database can substitute for the flat file
//! behind the same trait without touching repository or filter code.

mod json_store;

pub use json_store::{JsonFileStore, PropertyStore};
