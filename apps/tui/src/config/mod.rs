pub mod config;

pub use config::{debug_enabled, init_app_config, ApiConfig, DEFAULT_BASE_URL};
