use cardsearch_core::{HistoryState, Navigator};
use js_sys::{Object, Reflect};
use tracing::warn;
use wasm_bindgen::JsValue;

/// Address bar and history of the current window
pub struct WebNavigator {
    window: web_sys::Window,
}

impl WebNavigator {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }

    pub fn from_window() -> Result<Self, JsValue> {
        web_sys::window()
            .map(Self::new)
            .ok_or_else(|| JsValue::from_str("no window available"))
    }
}

/// `{ query: "<text>" }`
fn state_object(state: &HistoryState) -> Result<JsValue, JsValue> {
    let object = Object::new();
    Reflect::set(
        &object,
        &JsValue::from_str("query"),
        &JsValue::from_str(&state.query),
    )?;
    Ok(object.into())
}

impl Navigator for WebNavigator {
    fn origin(&self) -> String {
        self.window.location().origin().unwrap_or_default()
    }

    fn pathname(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    fn push_state(&self, state: &HistoryState, url: &str) {
        let result = state_object(state).and_then(|object| {
            self.window
                .history()?
                .push_state_with_url(&object, "", Some(url))
        });
        if let Err(err) = result {
            warn!(url = %url, error = ?err, "history.pushState failed");
        }
    }

    fn assign(&self, url: &str) {
        if let Err(err) = self.window.location().assign(url) {
            warn!(url = %url, error = ?err, "location.assign failed");
        }
    }
}
