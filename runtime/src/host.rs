use common::ExtensionSettings;
use log::{error, info};

/// Log sink visible to whoever debugs the tag manager property.
pub trait Logger {
    fn log(&self, message: &str);

    fn error(&self, message: &str);
}

/// The tag manager runtime the extension runs in.
pub trait Host: Logger {
    /// Extension-level settings saved from the configuration view.
    fn extension_settings(&self) -> ExtensionSettings;
}

/// [`Logger`] writing to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLogger;

impl Logger for LogLogger {
    fn log(&self, message: &str) {
        info!(target: "pixel", "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: "pixel", "{message}");
    }
}
