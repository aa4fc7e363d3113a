//! Pixel start-up: the `init` command and the outcome of loading the
//! library script.

use std::fmt::Display;

use common::ExtensionSettings;
use log::debug;
use serde_json::{Map, Value};

use crate::host::{Host, Logger};
use crate::queue::{BufferedQueue, Queue, QueueCommand, QueueMethod};

pub const PIXEL_SCRIPT_URL: &str = "https://connect.facebook.net/en_US/fbevents.js";

/// Identifies the integration to the pixel.
pub const AGENT: &str = "adobe_launch";

/// `fbq("init", pixelId, {}, {agent})`, or `None` without a pixel id.
pub fn init_command(settings: &ExtensionSettings) -> Option<QueueCommand> {
    let pixel_id = settings.pixel_id()?;
    let mut extra = Map::new();
    extra.insert("agent".to_string(), Value::String(AGENT.to_string()));
    Some(
        QueueCommand::new(QueueMethod::Init, pixel_id)
            .with_params(Map::new())
            .with_extra(extra),
    )
}

/// Initializes the pixel. Returns whether `init` was queued.
pub fn boot(host: &dyn Host, queue: &dyn Queue) -> bool {
    match init_command(&host.extension_settings()) {
        Some(command) => {
            debug!("initializing pixel {}", command.name);
            queue.push(command);
            true
        }
        None => {
            host.error("No Meta Pixel ID is configured. The pixel was not initialized.");
            false
        }
    }
}

/// Hands `queue` the pixel's command queue once it exists. `ready` is the
/// outcome of creating that queue; when it failed commands stay buffered
/// until the library script defines one.
pub fn attach_pixel_queue<E: Display>(
    logger: &dyn Logger,
    queue: &BufferedQueue,
    ready: Result<(), E>,
    sink: impl FnOnce() -> Box<dyn Queue>,
) -> bool {
    match ready {
        Ok(()) => {
            queue.attach(sink());
            true
        }
        Err(err) => {
            debug!("fbq stub: {err}");
            logger.error("The Meta Pixel queue could not be created. Events wait for the Base Code.");
            false
        }
    }
}

pub fn report_script_load<E: Display>(logger: &dyn Logger, outcome: Result<(), E>) {
    match outcome {
        Ok(()) => logger.log("Meta Pixel Base Code was successfully loaded."),
        Err(err) => {
            debug!("{PIXEL_SCRIPT_URL}: {err}");
            logger.error("Meta Pixel Base Code could not be loaded.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_carries_the_agent() {
        let settings = ExtensionSettings {
            pixel_id: Some("12345".into()),
            event_id: None,
        };
        let command = init_command(&settings).unwrap();

        assert_eq!(command.method, QueueMethod::Init);
        assert_eq!(command.name, "12345");
        assert_eq!(command.params, Some(Map::new()));
        assert_eq!(command.extra.get("agent"), Some(&Value::from("adobe_launch")));
    }

    #[test]
    fn no_init_without_a_pixel_id() {
        let settings = ExtensionSettings {
            pixel_id: Some(String::new()),
            event_id: None,
        };
        assert_eq!(init_command(&settings), None);
        assert_eq!(init_command(&ExtensionSettings::default()), None);
    }
}
