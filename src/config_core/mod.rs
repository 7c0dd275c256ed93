pub use console_config::{
    ConfigError, ConsoleConfig, NavOrder, DEFAULT_CONFIG_FILE, DEFAULT_ENDPOINT,
};

mod console_config;
