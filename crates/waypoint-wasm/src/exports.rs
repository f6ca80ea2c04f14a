//! `wasm-bindgen` exports.
//!
//! Wraps the application's navigation manager with JS-friendly types.

use std::cell::RefCell;

use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use waypoint_core::{App, BrowserNavigationManager, LocationChangedEvent};

use crate::host::{config_from_option, ListenerRegistry, ListenerSubscriptions};
use crate::runtime::{describe, to_js, GlobalJsRuntime};

thread_local! {
    // JS functions are not Send; handlers registered with the manager look
    // them up here by id. The page has exactly one thread.
    static LISTENERS: RefCell<ListenerRegistry<Function>> = RefCell::new(ListenerRegistry::new());
}

/// JS listeners still registered across all handles.
#[wasm_bindgen(js_name = liveListenerCount)]
pub fn live_listener_count() -> usize {
    LISTENERS.with(|l| l.borrow().len())
}

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn deliver(listener_id: u32, event: &LocationChangedEvent) {
    let Some(callback) = LISTENERS.with(|l| l.borrow().get(listener_id).cloned()) else {
        return;
    };

    let payload = match serde_json::to_value(event) {
        Ok(value) => value,
        Err(e) => {
            console_error(&format!("locationchanged: {e}"));
            return;
        }
    };
    let payload = match to_js(&payload) {
        Ok(value) => value,
        Err(message) => {
            console_error(&format!("locationchanged: {message}"));
            return;
        }
    };

    // A throwing listener must not stop the others.
    if let Err(e) = callback.call1(&JsValue::NULL, &payload) {
        console_error(&format!("locationchanged listener threw: {}", describe(&e)));
    }
}

/// The application's navigation manager, as seen from JavaScript.
#[wasm_bindgen]
pub struct NavigationHandle {
    navigation: BrowserNavigationManager<GlobalJsRuntime>,
    subscriptions: RefCell<ListenerSubscriptions>,
}

#[wasm_bindgen]
impl NavigationHandle {
    /// Create the handle. `config` is an optional JSON document, e.g.
    /// `{"interopNamespace": "app.navigation"}`.
    ///
    /// The host must create exactly one handle per page and route every
    /// `setLocation` call to it. Each handle owns its own navigation state
    /// and queries the host on its own, so a second handle would not see
    /// locations pushed to the first.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<NavigationHandle, JsError> {
        install_panic_hook();

        let config = config_from_option(config.as_deref())?;
        let app = App::new(config, GlobalJsRuntime)?;

        Ok(Self {
            navigation: app.navigation(),
            subscriptions: RefCell::new(ListenerSubscriptions::new()),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn uri(&self) -> Result<String, JsError> {
        Ok(self.navigation.uri()?)
    }

    #[wasm_bindgen(getter, js_name = baseUri)]
    pub fn base_uri(&self) -> Result<String, JsError> {
        Ok(self.navigation.base_uri()?)
    }

    /// Ask the host to navigate. `null`/`undefined` is rejected before the
    /// host is contacted; any string, the empty one included, is forwarded.
    #[wasm_bindgen(js_name = navigateTo)]
    pub fn navigate_to(&self, uri: Option<String>, force_load: bool) -> Result<(), JsError> {
        Ok(self.navigation.navigate_to(uri.as_deref(), force_load)?)
    }

    /// Called by the host when the browser location changed.
    #[wasm_bindgen(js_name = setLocation)]
    pub fn set_location(&self, uri: String, is_intercepted_link: bool) {
        self.navigation.set_location(&uri, is_intercepted_link);
    }

    #[wasm_bindgen(js_name = toAbsoluteUri)]
    pub fn to_absolute_uri(&self, relative: &str) -> Result<String, JsError> {
        Ok(self.navigation.to_absolute_uri(relative)?.to_string())
    }

    #[wasm_bindgen(js_name = toBaseRelativePath)]
    pub fn to_base_relative_path(&self, uri: &str) -> Result<String, JsError> {
        Ok(self.navigation.to_base_relative_path(uri)?)
    }

    /// Register `callback(event)` for location changes. Returns an id for
    /// [`unsubscribe`](Self::unsubscribe).
    #[wasm_bindgen(js_name = onLocationChanged)]
    pub fn on_location_changed(&self, callback: Function) -> u32 {
        let listener_id = LISTENERS.with(|l| l.borrow_mut().insert(callback));
        let subscription = self.subscriptions.borrow_mut().subscribe(
            &self.navigation,
            listener_id,
            move |event| deliver(listener_id, event),
        );

        tracing::debug!(listener_id, %subscription, "Registered JS location listener");
        listener_id
    }

    pub fn unsubscribe(&self, listener_id: u32) -> bool {
        let removed = self
            .subscriptions
            .borrow_mut()
            .unsubscribe(&self.navigation, listener_id);
        if removed {
            LISTENERS.with(|l| l.borrow_mut().remove(listener_id));
        }
        removed
    }

    /// Number of JS listeners currently attached to this handle.
    #[wasm_bindgen(getter, js_name = listenerCount)]
    pub fn listener_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }
}

impl Drop for NavigationHandle {
    fn drop(&mut self) {
        let released = self.subscriptions.get_mut().release_all(&self.navigation);
        LISTENERS.with(|l| {
            let mut listeners = l.borrow_mut();
            for listener_id in released {
                listeners.remove(listener_id);
            }
        });
    }
}
