mod settings;

pub use settings::{LlmSettings, LoggingSettings, ServerSettings, Settings, StorageSettings};
