//! Browser implementations of the ports and the functions exported to the
//! tag manager's action modules.
//!
//! The runtime starts on the first exported call: it installs the `fbq`
//! command queue unless the page already has one, queues `init` and begins
//! loading the pixel script. Commands are buffered only while no `fbq`
//! exists.
//!
//! Interop failures go to the browser console; the `log` facade has no
//! backend here.

use std::cell::RefCell;
use std::rc::Rc;

use common::{ExtensionSettings, Settings};
use js_sys::{Array, Function, Promise, Reflect, JSON};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlScriptElement;

use crate::boot::{attach_pixel_queue, boot, report_script_load, PIXEL_SCRIPT_URL};
use crate::dispatch::{Dispatcher, StandardEvent};
use crate::error::RuntimeError;
use crate::host::{Host, Logger};
use crate::queue::{BufferedQueue, Queue, QueueCommand};

fn property(target: &JsValue, name: &str) -> Result<JsValue, RuntimeError> {
    Ok(Reflect::get(target, &JsValue::from_str(name))?)
}

fn function(target: &JsValue, name: &str) -> Result<Function, RuntimeError> {
    property(target, name)?
        .dyn_into()
        .map_err(|_| RuntimeError::Js(format!("{name} is not a function")))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, RuntimeError> {
    let text = serde_json::to_string(value).map_err(|err| RuntimeError::Js(err.to_string()))?;
    Ok(JSON::parse(&text)?)
}

fn from_js<T: DeserializeOwned>(value: &JsValue) -> Result<T, RuntimeError> {
    let text: String = JSON::stringify(value)?.into();
    serde_json::from_str(&text).map_err(|err| RuntimeError::Js(err.to_string()))
}

fn window() -> Result<web_sys::Window, RuntimeError> {
    web_sys::window().ok_or_else(|| RuntimeError::Js("no global window".to_string()))
}

/// The `turbine` object the tag manager injects into extension modules.
#[derive(Clone)]
pub struct TurbineHost {
    turbine: JsValue,
}

impl TurbineHost {
    pub fn from_global() -> Result<Self, RuntimeError> {
        let turbine = property(&js_sys::global(), "turbine")?;
        if turbine.is_undefined() || turbine.is_null() {
            return Err(RuntimeError::Js("turbine is not defined".to_string()));
        }
        Ok(Self { turbine })
    }

    fn write(&self, level: &str, message: &str) {
        let written = property(&self.turbine, "logger").and_then(|logger| {
            let log = function(&logger, level)?;
            log.call1(&logger, &JsValue::from_str(message))?;
            Ok(())
        });
        if let Err(err) = written {
            gloo_console::error!(format!("turbine.logger.{level} failed: {err}"));
        }
    }
}

impl Logger for TurbineHost {
    fn log(&self, message: &str) {
        self.write("log", message);
    }

    fn error(&self, message: &str) {
        self.write("error", message);
    }
}

impl Host for TurbineHost {
    fn extension_settings(&self) -> ExtensionSettings {
        let settings = function(&self.turbine, "getExtensionSettings")
            .and_then(|get| Ok(get.call0(&self.turbine)?))
            .and_then(|value| {
                if value.is_undefined() || value.is_null() {
                    Ok(ExtensionSettings::default())
                } else {
                    from_js(&value)
                }
            });
        settings.unwrap_or_else(|err| {
            gloo_console::warn!(format!("could not read the extension settings: {err}"));
            ExtensionSettings::default()
        })
    }
}

/// Body of the function building the `fbq` stub. Calls are kept in
/// `queue` until the library sets `callMethod`.
const FBQ_STUB: &str = "var fbq = function () { \
    fbq.callMethod ? fbq.callMethod.apply(fbq, arguments) : fbq.queue.push(arguments); \
}; \
fbq.push = fbq; fbq.loaded = true; fbq.version = '2.0'; fbq.queue = []; \
return fbq;";

/// Defines `window.fbq` (and `window._fbq` when missing) as the command queue
/// the pixel script drains on load. A page that already has `fbq` keeps it.
pub fn install_fbq_stub() -> Result<(), RuntimeError> {
    let window = window()?;
    if property(&window, "fbq")?.is_truthy() {
        return Ok(());
    }

    let fbq = Function::new_no_args(FBQ_STUB).call0(&JsValue::NULL)?;
    Reflect::set(&window, &JsValue::from_str("fbq"), &fbq)?;
    if !property(&window, "_fbq")?.is_truthy() {
        Reflect::set(&window, &JsValue::from_str("_fbq"), &fbq)?;
    }
    Ok(())
}

/// `window.fbq`.
pub struct WindowQueue;

impl WindowQueue {
    pub fn is_available() -> bool {
        window()
            .and_then(|window| property(&window, "fbq"))
            .is_ok_and(|fbq| fbq.is_function())
    }

    fn send(command: &QueueCommand) -> Result<(), RuntimeError> {
        let window = window()?;
        let fbq = function(&window, "fbq")?;

        let args = Array::new();
        args.push(&JsValue::from_str(command.method.as_str()));
        args.push(&JsValue::from_str(&command.name));
        args.push(&match &command.params {
            Some(params) => to_js(params)?,
            None => JsValue::UNDEFINED,
        });
        args.push(&to_js(&command.extra)?);
        fbq.apply(&JsValue::NULL, &args)?;
        Ok(())
    }
}

impl Queue for WindowQueue {
    fn call(&self, command: QueueCommand) {
        if let Err(err) = Self::send(&command) {
            let method = command.method.as_str();
            gloo_console::error!(format!("fbq(\"{method}\") failed: {err}"));
        }
    }
}

/// Appends a `<script>` tag for `url` and waits for it to load.
pub async fn load_script(url: &str) -> Result<(), RuntimeError> {
    let document = window()?
        .document()
        .ok_or_else(|| RuntimeError::Js("no document".to_string()))?;
    let script: HtmlScriptElement = document
        .create_element("script")?
        .dyn_into()
        .map_err(|_| RuntimeError::Js("could not create a script element".to_string()))?;
    script.set_src(url);
    script.set_async(true);

    let loaded = Promise::new(&mut |resolve: Function, reject: Function| {
        script.set_onload(Some(&resolve));
        script.set_onerror(Some(&reject));
    });

    let head = document
        .head()
        .ok_or_else(|| RuntimeError::Js("no document head".to_string()))?;
    head.append_child(&script)?;

    JsFuture::from(loaded)
        .await
        .map_err(|_| RuntimeError::ScriptLoad {
            url: url.to_string(),
        })?;
    Ok(())
}

struct Runtime {
    host: TurbineHost,
    queue: Rc<BufferedQueue>,
}

impl Runtime {
    fn start() -> Result<Self, RuntimeError> {
        let host = TurbineHost::from_global()?;
        let queue = Rc::new(BufferedQueue::new());
        attach_pixel_queue(&host, queue.as_ref(), install_fbq_stub(), || {
            Box::new(WindowQueue) as Box<dyn Queue>
        });
        boot(&host, queue.as_ref());

        let pending = Rc::clone(&queue);
        let logger = host.clone();
        spawn_local(async move {
            let outcome = load_script(PIXEL_SCRIPT_URL).await;
            if outcome.is_ok() && !pending.is_attached() && WindowQueue::is_available() {
                pending.attach(Box::new(WindowQueue));
            }
            report_script_load(&logger, outcome);
        });

        Ok(Self { host, queue })
    }

    fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(&self.host, self.queue.as_ref())
    }
}

thread_local! {
    static RUNTIME: RefCell<Option<Rc<Runtime>>> = const { RefCell::new(None) };
}

fn runtime() -> Result<Rc<Runtime>, RuntimeError> {
    RUNTIME.with(|slot| {
        if let Some(runtime) = slot.borrow().as_ref() {
            return Ok(Rc::clone(runtime));
        }
        let runtime = Rc::new(Runtime::start()?);
        *slot.borrow_mut() = Some(Rc::clone(&runtime));
        Ok(runtime)
    })
}

fn optional_settings(value: &JsValue) -> Result<Option<Settings>, RuntimeError> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    let text: String = JSON::stringify(value)?.into();
    Ok(Some(Settings::from_json(&text)?))
}

/// Sends a standard pixel event with the action's settings.
#[wasm_bindgen(js_name = sendEvent)]
pub fn send_event(name: &str, settings: JsValue) -> Result<(), JsValue> {
    let runtime = runtime()?;
    let settings = optional_settings(&settings)?;
    runtime.dispatcher().send_event(name, settings);
    Ok(())
}

#[wasm_bindgen(js_name = sendCustomEvent)]
pub fn send_custom_event(settings: JsValue) -> Result<(), JsValue> {
    let runtime = runtime()?;
    let settings = optional_settings(&settings)?.unwrap_or_default();
    runtime.dispatcher().send_custom_event(settings)?;
    Ok(())
}

/// Entry point of the events with a dedicated action (`PageView`, `Search`,
/// `AddToCart`, ...).
#[wasm_bindgen(js_name = sendStandardEvent)]
pub fn send_standard_event(name: &str, settings: JsValue) -> Result<(), JsValue> {
    let event = StandardEvent::from_name(name)
        .ok_or_else(|| RuntimeError::UnknownEvent(name.to_string()))?;
    let runtime = runtime()?;
    let settings = optional_settings(&settings)?;
    runtime.dispatcher().send_standard_event(event, settings);
    Ok(())
}
