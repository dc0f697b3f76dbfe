//! Handles for talking to the store task.

pub mod store_client;

pub use store_client::*;
