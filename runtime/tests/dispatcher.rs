use std::cell::RefCell;
use std::rc::Rc;

use common::{ExtensionSettings, Settings};
use pixel_runtime::boot::{attach_pixel_queue, boot, report_script_load};
use pixel_runtime::{
    BufferedQueue, Dispatcher, Host, Logger, Queue, QueueCommand, QueueMethod, StandardEvent,
};
use serde_json::{json, Map, Value};

#[derive(Default)]
struct RecordingHost {
    settings: ExtensionSettings,
    logs: RefCell<Vec<String>>,
    errors: RefCell<Vec<String>>,
}

impl RecordingHost {
    fn with_event_id(event_id: &str) -> Self {
        Self {
            settings: ExtensionSettings {
                pixel_id: Some("12345".into()),
                event_id: Some(event_id.into()),
            },
            ..Default::default()
        }
    }
}

impl Logger for RecordingHost {
    fn log(&self, message: &str) {
        self.logs.borrow_mut().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}

impl Host for RecordingHost {
    fn extension_settings(&self) -> ExtensionSettings {
        self.settings.clone()
    }
}

#[derive(Clone, Default)]
struct RecordingQueue(Rc<RefCell<Vec<QueueCommand>>>);

impl Queue for RecordingQueue {
    fn call(&self, command: QueueCommand) {
        self.0.borrow_mut().push(command);
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn settings(value: Value) -> Settings {
    Settings::from_value(value).unwrap()
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn search_is_sent_with_the_default_event_id() {
    init_logging();
    let host = RecordingHost::with_event_id("11111");
    let queue = RecordingQueue::default();
    let dispatcher = Dispatcher::new(&host, &queue);

    dispatcher.send_standard_event(
        StandardEvent::Search,
        Some(settings(json!({"search_string": "search"}))),
    );

    let sent = queue.0.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, QueueMethod::Track);
    assert_eq!(sent[0].name, "Search");
    assert_eq!(sent[0].params, Some(object(json!({"search_string": "search"}))));
    assert_eq!(sent[0].extra, object(json!({"eventID": "11111"})));
    assert_eq!(
        *host.logs.borrow(),
        [r#"Queue command: fbq("track", "Search", {"search_string":"search"}) with eventId: 11111."#]
    );
}

#[test]
fn search_without_any_event_id_has_no_suffix() {
    let host = RecordingHost::default();
    let queue = RecordingQueue::default();
    Dispatcher::new(&host, &queue).send_standard_event(
        StandardEvent::Search,
        Some(settings(json!({"searchString": "search"}))),
    );

    assert!(queue.0.borrow()[0].extra.is_empty());
    assert_eq!(
        *host.logs.borrow(),
        [r#"Queue command: fbq("track", "Search", {"search_string":"search"})."#]
    );
}

#[test]
fn custom_events_use_the_extension_event_id_as_fallback() {
    let host = RecordingHost::with_event_id("AZA");
    let queue = RecordingQueue::default();
    Dispatcher::new(&host, &queue)
        .send_custom_event(settings(json!({
            "name": "custom event",
            "parameters": [{"key": "value", "value": "100"}]
        })))
        .unwrap();

    let sent = queue.0.borrow();
    assert_eq!(sent[0].method, QueueMethod::TrackCustom);
    assert_eq!(sent[0].params, Some(object(json!({"value": "100"}))));
    assert_eq!(sent[0].extra, object(json!({"eventID": "AZA"})));
}

#[test]
fn commands_before_the_library_loads_are_replayed_after_init() {
    init_logging();
    let host = RecordingHost::with_event_id("11111");
    let buffer = BufferedQueue::new();

    assert!(boot(&host, &buffer));
    Dispatcher::new(&host, &buffer).send_event(
        "Purchase",
        Some(settings(json!({"value": 10, "currency": "USD"}))),
    );
    assert_eq!(buffer.pending(), 2);

    let pixel = RecordingQueue::default();
    buffer.attach(Box::new(pixel.clone()));
    report_script_load::<String>(&host, Ok(()));

    let sent = pixel.0.borrow();
    assert_eq!(sent[0].method, QueueMethod::Init);
    assert_eq!(sent[0].name, "12345");
    assert_eq!(sent[0].extra, object(json!({"agent": "adobe_launch"})));
    assert_eq!(sent[1].name, "Purchase");
    assert_eq!(
        *host.logs.borrow(),
        [
            r#"Queue command: fbq("track", "Purchase", {"value":10,"currency":"USD"}, {"eventID":"11111"})."#,
            "Meta Pixel Base Code was successfully loaded.",
        ]
    );
}

#[test]
fn boot_without_a_pixel_id_logs_an_error() {
    let host = RecordingHost::default();
    let queue = RecordingQueue::default();

    assert!(!boot(&host, &queue));
    assert!(queue.0.borrow().is_empty());
    assert_eq!(host.errors.borrow().len(), 1);

    report_script_load(&host, Err("network error"));
    assert_eq!(
        host.errors.borrow().last().map(String::as_str),
        Some("Meta Pixel Base Code could not be loaded.")
    );
}

#[test]
fn the_pixel_queue_takes_commands_as_soon_as_it_exists() {
    let host = RecordingHost::with_event_id("11111");
    let buffer = BufferedQueue::new();
    let pixel = RecordingQueue::default();

    let sink = pixel.clone();
    assert!(attach_pixel_queue::<String>(&host, &buffer, Ok(()), move || {
        Box::new(sink) as Box<dyn Queue>
    }));
    assert!(boot(&host, &buffer));

    assert_eq!(buffer.pending(), 0);
    assert_eq!(pixel.0.borrow()[0].method, QueueMethod::Init);
    assert!(host.errors.borrow().is_empty());
}

#[test]
fn commands_stay_buffered_when_the_pixel_queue_cannot_be_created() {
    let host = RecordingHost::with_event_id("11111");
    let buffer = BufferedQueue::new();

    assert!(!attach_pixel_queue(&host, &buffer, Err("no global window"), || {
        Box::new(RecordingQueue::default()) as Box<dyn Queue>
    }));
    assert!(boot(&host, &buffer));

    assert!(!buffer.is_attached());
    assert_eq!(buffer.pending(), 1);
    assert_eq!(host.errors.borrow().len(), 1);
}
