pub mod content;
pub mod extension;
pub mod parameter;
pub mod settings;

pub use content::ContentItem;
pub use extension::ExtensionSettings;
pub use parameter::Parameter;
pub use settings::Settings;
