mod settings;

pub use settings::{
    DatabaseConfig, PreferenceSeed, PreferencesConfig, ServerConfig, Settings,
};
