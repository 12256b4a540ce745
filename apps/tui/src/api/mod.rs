pub mod client;
pub mod models;

pub use client::{FetchError, SalesApi};
pub use models::Transaction;
