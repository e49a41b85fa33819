//! `.interp-i18n.json` workspace settings.
mod loader;
mod manager;
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    I18nSettings,
    ValidationError,
};
