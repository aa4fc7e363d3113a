//! JavaScript surface of the extension views.
//!
//! A page hosting one view calls `registerView("<view name>")` once; the
//! returned handle is also what the presentational layer uses to push edits
//! (`update`) and read the layout and the latest errors.
//!
//! Payloads cross the boundary as JSON: `JsValue`s are stringified with the
//! host's `JSON` object and read with `serde_json`, which keeps object key
//! order intact.

use std::cell::RefCell;
use std::rc::Rc;

use common::Settings;
use js_sys::{Function, Object, Reflect, JSON};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::ExtensionBridge;
use crate::editor::FormMsg;

/// Argument of the host's `init` call.
#[derive(Debug, Default, Deserialize)]
struct InitInfo {
    #[serde(default)]
    settings: Option<Value>,
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(value).map_err(js_error)?;
    JSON::parse(&text)
}

fn from_js<T: DeserializeOwned + Default>(value: &JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    let text: String = JSON::stringify(value)?.into();
    serde_json::from_str(&text).map_err(js_error)
}

fn init_bridge(bridge: &RefCell<ExtensionBridge>, info: &JsValue) -> Result<(), JsValue> {
    let info: InitInfo = from_js(info)?;
    let settings = match info.settings {
        Some(value) => Some(Settings::from_value(value).map_err(js_error)?),
        None => None,
    };
    bridge.borrow_mut().init(settings);
    Ok(())
}

#[wasm_bindgen]
pub struct WasmBridge {
    inner: Rc<RefCell<ExtensionBridge>>,
}

#[wasm_bindgen]
impl WasmBridge {
    #[wasm_bindgen(constructor)]
    pub fn new(view_name: &str) -> Result<WasmBridge, JsValue> {
        let bridge = ExtensionBridge::for_view(view_name)
            .ok_or_else(|| js_error(format!("unknown view {view_name:?}")))?;
        Ok(Self {
            inner: Rc::new(RefCell::new(bridge)),
        })
    }

    pub fn init(&self, info: JsValue) -> Result<(), JsValue> {
        init_bridge(&self.inner, &info)
    }

    #[wasm_bindgen(js_name = getSettings)]
    pub fn get_settings(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.borrow().get_settings())
    }

    pub fn validate(&self) -> bool {
        self.inner.borrow_mut().validate()
    }

    pub fn errors(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.borrow().errors())
    }

    /// Applies one edit; returns whether the view needs to re-render.
    pub fn update(&self, msg: JsValue) -> Result<bool, JsValue> {
        let text: String = JSON::stringify(&msg)?.into();
        let msg: FormMsg = serde_json::from_str(&text).map_err(js_error)?;
        Ok(self.inner.borrow_mut().update(msg))
    }

    pub fn layout(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.borrow().layout())
    }
}

/// Creates the bridge of `view_name` and registers its lifecycle callbacks
/// with `window.extensionBridge`.
#[wasm_bindgen(js_name = registerView)]
pub fn register_view(view_name: &str) -> Result<WasmBridge, JsValue> {
    let handle = WasmBridge::new(view_name)?;
    let window = web_sys::window().ok_or_else(|| js_error("no global window"))?;
    let host = Reflect::get(&window, &JsValue::from_str("extensionBridge"))?;
    let register: Function = Reflect::get(&host, &JsValue::from_str("register"))?
        .dyn_into()
        .map_err(|_| js_error("extensionBridge.register is not a function"))?;

    let bridge = Rc::clone(&handle.inner);
    let init = Closure::<dyn FnMut(JsValue)>::new(move |info: JsValue| {
        if let Err(err) = init_bridge(&bridge, &info) {
            gloo_console::error!("could not initialize the view:", err);
        }
    });

    let bridge = Rc::clone(&handle.inner);
    let get_settings = Closure::<dyn FnMut() -> JsValue>::new(move || {
        to_js(&bridge.borrow().get_settings()).unwrap_or_else(|err| {
            gloo_console::error!("could not serialize the settings:", err);
            JsValue::NULL
        })
    });

    let bridge = Rc::clone(&handle.inner);
    let validate = Closure::<dyn FnMut() -> bool>::new(move || bridge.borrow_mut().validate());

    let callbacks = Object::new();
    Reflect::set(&callbacks, &JsValue::from_str("init"), init.as_ref())?;
    Reflect::set(
        &callbacks,
        &JsValue::from_str("getSettings"),
        get_settings.as_ref(),
    )?;
    Reflect::set(&callbacks, &JsValue::from_str("validate"), validate.as_ref())?;
    register.call1(&host, &callbacks)?;

    // The host keeps calling these for the lifetime of the page.
    init.forget();
    get_settings.forget();
    validate.forget();

    Ok(handle)
}
