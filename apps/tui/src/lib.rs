// Export our modules for use in binaries and tests
pub mod aggregate;
pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod format;

pub use api::Transaction;
pub use domain::Region;
