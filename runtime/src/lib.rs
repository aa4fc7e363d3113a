//! Run-time side of the Meta Pixel extension.
//!
//! Actions configured in the tag manager end up here with their saved
//! settings. This crate shapes them into `fbq` queue commands, logs what it
//! sends through the host logger and boots the pixel library itself.
//!
//! The browser is reached only through two ports, [`Host`] and [`Queue`];
//! [`browser`] implements them on top of `turbine` and `window.fbq`.

pub mod boot;
pub mod browser;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod queue;

pub use dispatch::{Dispatch, Dispatcher, StandardEvent};
pub use error::RuntimeError;
pub use host::{Host, LogLogger, Logger};
pub use queue::{BufferedQueue, Queue, QueueCommand, QueueMethod};
