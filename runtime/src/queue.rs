//! The pixel command queue.
//!
//! `fbq` accepts calls before its library has loaded and replays them once it
//! is ready. Here that behavior is explicit: [`BufferedQueue`] holds commands
//! until a real [`Queue`] is attached, then forwards everything in order.

use std::cell::RefCell;

use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QueueMethod {
    Init,
    Track,
    TrackCustom,
}

impl QueueMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            QueueMethod::Init => "init",
            QueueMethod::Track => "track",
            QueueMethod::TrackCustom => "trackCustom",
        }
    }
}

/// One `fbq(method, name, params, extra)` call.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueCommand {
    pub method: QueueMethod,
    /// Event name, or the pixel id for `init`.
    pub name: String,
    /// `None` is passed to `fbq` as `undefined`.
    pub params: Option<Map<String, Value>>,
    pub extra: Map<String, Value>,
}

impl QueueCommand {
    pub fn new(method: QueueMethod, name: impl Into<String>) -> Self {
        Self {
            method,
            name: name.into(),
            params: None,
            extra: Map::new(),
        }
    }

    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }
}

/// Sink of queue commands.
pub trait Queue {
    fn call(&self, command: QueueCommand);

    /// `fbq.push` is the same function as `fbq`.
    fn push(&self, command: QueueCommand) {
        self.call(command);
    }
}

/// Queue that buffers until the pixel library is ready.
#[derive(Default)]
pub struct BufferedQueue {
    pending: RefCell<Vec<QueueCommand>>,
    target: RefCell<Option<Box<dyn Queue>>>,
}

impl BufferedQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.target.borrow().is_some()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Forwards the buffered commands to `target`, oldest first, and sends
    /// every later command straight to it.
    pub fn attach(&self, target: Box<dyn Queue>) {
        let pending = std::mem::take(&mut *self.pending.borrow_mut());
        debug!("flushing {} buffered queue command(s)", pending.len());
        for command in pending {
            target.call(command);
        }
        *self.target.borrow_mut() = Some(target);
    }
}

impl Queue for BufferedQueue {
    fn call(&self, command: QueueCommand) {
        if let Some(target) = self.target.borrow().as_ref() {
            target.call(command);
            return;
        }
        debug!(
            "buffering {}({:?}) until the pixel library is loaded",
            command.method.as_str(),
            command.name
        );
        self.pending.borrow_mut().push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl Queue for Recorder {
        fn call(&self, command: QueueCommand) {
            self.0.borrow_mut().push(command.name);
        }
    }

    #[test]
    fn replays_buffered_commands_in_order() {
        let queue = BufferedQueue::new();
        queue.call(QueueCommand::new(QueueMethod::Init, "123"));
        queue.push(QueueCommand::new(QueueMethod::Track, "PageView"));
        assert_eq!(queue.pending(), 2);

        let recorder = Recorder::default();
        queue.attach(Box::new(recorder.clone()));
        queue.call(QueueCommand::new(QueueMethod::Track, "Lead"));

        assert!(queue.is_attached());
        assert_eq!(queue.pending(), 0);
        assert_eq!(*recorder.0.borrow(), ["123", "PageView", "Lead"]);
    }
}
