pub mod config;

pub use config::{HostConfig, DEFAULT_CONFIG_PATH, LOCAL_CONFIG_PATH};
