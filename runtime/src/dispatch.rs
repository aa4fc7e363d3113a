//! Event dispatch.
//!
//! Shaping is pure: [`track_event`], [`track_custom_event`] and
//! [`track_standard_event`] turn an action's settings into the queue command
//! and the log line describing it. [`Dispatcher`] sends both to the host.
//!
//! Two log formats coexist. The generic one mirrors the call itself,
//! `Queue command: fbq("track", "Purchase", {...}, {"eventID":"x"}).`, while
//! the historical per-event actions report
//! `Queue command: fbq("track", "Search", {...}) with eventId: x.`

use common::values::{is_truthy, js_string};
use common::Settings;
use log::warn;
use serde_json::{Map, Value};

use crate::error::RuntimeError;
use crate::host::Host;
use crate::queue::{Queue, QueueCommand, QueueMethod};

const EVENT_ID: &str = "event_id";

/// What an action sends and how it is reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub command: QueueCommand,
    pub log_line: String,
}

/// Events that kept their dedicated actions and log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardEvent {
    AddPaymentInfo,
    AddToCart,
    Donate,
    FindLocation,
    Lead,
    PageView,
    Search,
}

impl StandardEvent {
    pub const ALL: [StandardEvent; 7] = [
        StandardEvent::AddPaymentInfo,
        StandardEvent::AddToCart,
        StandardEvent::Donate,
        StandardEvent::FindLocation,
        StandardEvent::Lead,
        StandardEvent::PageView,
        StandardEvent::Search,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StandardEvent::AddPaymentInfo => "AddPaymentInfo",
            StandardEvent::AddToCart => "AddToCart",
            StandardEvent::Donate => "Donate",
            StandardEvent::FindLocation => "FindLocation",
            StandardEvent::Lead => "Lead",
            StandardEvent::PageView => "PageView",
            StandardEvent::Search => "Search",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.name() == name)
    }
}

/// Takes the action's own `event_id` out of its settings, falling back to
/// the extension-wide default. A falsy `event_id` stays in the settings.
fn take_event_id(settings: Option<&mut Settings>, default: Option<&str>) -> Option<Value> {
    let own = settings
        .filter(|settings| settings.get(EVENT_ID).is_some_and(is_truthy))
        .and_then(|settings| settings.remove(EVENT_ID));
    own.or_else(|| default.map(|id| Value::String(id.to_string())))
}

fn extra_arguments(event_id: Option<&Value>) -> Map<String, Value> {
    let mut extra = Map::new();
    if let Some(id) = event_id {
        extra.insert("eventID".to_string(), id.clone());
    }
    extra
}

/// `Queue command: fbq("<method>", "<name>"[, params][, extra]).`, leaving
/// out empty objects.
fn generic_log_line(command: &QueueCommand) -> String {
    let mut line = format!(
        "Queue command: fbq(\"{}\", \"{}\"",
        command.method.as_str(),
        command.name
    );
    for segment in [command.params.as_ref(), Some(&command.extra)]
        .into_iter()
        .flatten()
    {
        if !segment.is_empty() {
            line.push_str(", ");
            line.push_str(&Value::Object(segment.clone()).to_string());
        }
    }
    line.push_str(").");
    line
}

/// Shapes a `track` call for `name`.
///
/// # Arguments
/// * `settings` - The action's settings, `None` when the action has none.
///   A truthy `event_id` is not forwarded as a parameter.
/// * `default_event_id` - The extension-wide event id.
pub fn track_event(
    name: &str,
    mut settings: Option<Settings>,
    default_event_id: Option<&str>,
) -> Dispatch {
    let event_id = take_event_id(settings.as_mut(), default_event_id);
    let command = QueueCommand {
        method: QueueMethod::Track,
        name: name.to_string(),
        params: settings.map(Settings::into_map),
        extra: extra_arguments(event_id.as_ref()),
    };
    let log_line = generic_log_line(&command);
    Dispatch { command, log_line }
}

/// Shapes a `trackCustom` call. `parameters` rows are folded into one object;
/// rows without a key are skipped and a repeated key keeps its last value.
pub fn track_custom_event(
    mut settings: Settings,
    default_event_id: Option<&str>,
) -> Result<Dispatch, RuntimeError> {
    let name = settings
        .get("name")
        .filter(|name| is_truthy(name))
        .map(js_string)
        .ok_or(RuntimeError::MissingEventName)?;
    let event_id = take_event_id(Some(&mut settings), default_event_id);

    let mut params = Map::new();
    if let Some(Value::Array(rows)) = settings.get("parameters") {
        for row in rows {
            let Some(key) = row.get("key").filter(|key| is_truthy(key)) else {
                warn!("skipping a parameter of {name:?} without a key");
                continue;
            };
            let value = row.get("value").cloned().unwrap_or(Value::Null);
            params.insert(js_string(key), value);
        }
    }

    let command = QueueCommand {
        method: QueueMethod::TrackCustom,
        name,
        params: Some(params),
        extra: extra_arguments(event_id.as_ref()),
    };
    let log_line = generic_log_line(&command);
    Ok(Dispatch { command, log_line })
}

fn search_params(settings: Option<&Settings>) -> Map<String, Value> {
    let mut params = Map::new();
    let term = settings.and_then(|settings| {
        ["search_string", "searchString", "search_event"]
            .into_iter()
            .filter_map(|key| settings.get(key))
            .find(|value| is_truthy(value))
    });
    if let Some(term) = term {
        params.insert("search_string".to_string(), term.clone());
    }
    params
}

/// Shapes one of the [`StandardEvent`]s.
///
/// Settings are forwarded as they are, except for `PageView`, which sends an
/// empty object, and `Search`, which only sends the search term.
pub fn track_standard_event(
    event: StandardEvent,
    mut settings: Option<Settings>,
    default_event_id: Option<&str>,
) -> Dispatch {
    let event_id = take_event_id(settings.as_mut(), default_event_id);
    let params = match event {
        StandardEvent::PageView => Some(Map::new()),
        StandardEvent::Search => Some(search_params(settings.as_ref())),
        _ => settings.map(Settings::into_map),
    };

    let mut log_line = format!("Queue command: fbq(\"track\", \"{}\"", event.name());
    if event != StandardEvent::PageView {
        let shown = params
            .as_ref()
            .map(|params| Value::Object(params.clone()).to_string())
            .unwrap_or_else(|| "undefined".to_string());
        log_line.push_str(", ");
        log_line.push_str(&shown);
    }
    log_line.push(')');
    if let Some(id) = &event_id {
        log_line.push_str(" with eventId: ");
        log_line.push_str(&js_string(id));
    }
    log_line.push('.');

    let command = QueueCommand {
        method: QueueMethod::Track,
        name: event.name().to_string(),
        params,
        extra: extra_arguments(event_id.as_ref()),
    };
    Dispatch { command, log_line }
}

/// Sends shaped events to the queue and logs them with the host.
pub struct Dispatcher<'a> {
    host: &'a dyn Host,
    queue: &'a dyn Queue,
}

impl<'a> Dispatcher<'a> {
    pub fn new(host: &'a dyn Host, queue: &'a dyn Queue) -> Self {
        Self { host, queue }
    }

    fn send(&self, dispatch: Dispatch) {
        self.queue.call(dispatch.command);
        self.host.log(&dispatch.log_line);
    }

    pub fn send_event(&self, name: &str, settings: Option<Settings>) {
        let defaults = self.host.extension_settings();
        self.send(track_event(name, settings, defaults.default_event_id()));
    }

    pub fn send_custom_event(&self, settings: Settings) -> Result<(), RuntimeError> {
        let defaults = self.host.extension_settings();
        let dispatch = track_custom_event(settings, defaults.default_event_id())?;
        self.send(dispatch);
        Ok(())
    }

    pub fn send_standard_event(&self, event: StandardEvent, settings: Option<Settings>) {
        let defaults = self.host.extension_settings();
        self.send(track_standard_event(
            event,
            settings,
            defaults.default_event_id(),
        ));
    }
}
