pub mod config;
pub mod network;

pub use config::{parse_env_config, read_env_config_file, ConfigError, EnvironmentConfig};
pub use network::NetworkKind;
