mod loader;
mod validation;

pub use loader::{load_config, load_config_str, ConfigError, CONFIG_FILE_NAME};
pub use validation::validate;
