pub mod config;

pub use config::{AppConfig, Overrides, CONFIG_ENV_VAR};
