//! Live DOM document
//!
//! Mounts view trees with `web_sys` and attaches their handlers as event
//! listeners. The listener closures for a container are owned here and
//! released as soon as that container is re-rendered. A closure dropped while
//! it is still running (a handler re-rendering its own container) is freed by
//! wasm-bindgen once the call returns.

use std::cell::RefCell;
use std::collections::HashMap;

use cardsearch_core::view::{DomEvent, Handler, Trigger};
use cardsearch_core::{Document, Element, Node};
use tracing::{debug, error};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, KeyboardEvent};

type Listener = Closure<dyn FnMut(Event)>;

pub struct WebDocument {
    document: web_sys::Document,
    listeners: RefCell<HashMap<String, Vec<Listener>>>,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self {
            document,
            listeners: RefCell::new(HashMap::new()),
        }
    }

    /// Document of the current window
    pub fn from_window() -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        Ok(Self::new(document))
    }

    /// Listeners currently attached inside container `id`
    pub fn listener_count(&self, id: &str) -> usize {
        self.listeners.borrow().get(id).map_or(0, Vec::len)
    }

    fn build(&self, node: &Node, listeners: &mut Vec<Listener>) -> Result<web_sys::Node, JsValue> {
        match node {
            Node::Text(text) => Ok(self.document.create_text_node(text).into()),
            Node::Element(el) => self.build_element(el, listeners).map(Into::into),
        }
    }

    fn build_element(
        &self,
        el: &Element,
        listeners: &mut Vec<Listener>,
    ) -> Result<web_sys::Element, JsValue> {
        let dom = self.document.create_element(el.tag())?;
        if !el.classes().is_empty() {
            dom.set_class_name(&el.classes().join(" "));
        }
        for (name, value) in el.attrs() {
            dom.set_attribute(name, value)?;
        }
        for child in el.child_nodes() {
            dom.append_child(&self.build(child, listeners)?)?;
        }
        for handler in el.handlers() {
            let listener = listener_for(handler.clone());
            dom.add_event_listener_with_callback(
                handler.trigger.event_name(),
                listener.as_ref().unchecked_ref(),
            )?;
            listeners.push(listener);
        }
        Ok(dom)
    }

    fn mount(&self, id: &str, nodes: &[Node]) -> Result<bool, JsValue> {
        let Some(container) = self.document.get_element_by_id(id) else {
            return Ok(false);
        };

        // Build detached first so a failure leaves the container untouched
        let mut listeners = Vec::new();
        let built = nodes
            .iter()
            .map(|node| self.build(node, &mut listeners))
            .collect::<Result<Vec<_>, _>>()?;

        container.set_text_content(None);
        for node in &built {
            container.append_child(node)?;
        }

        // Released outside the borrow
        let previous = self.listeners.borrow_mut().insert(id.to_string(), listeners);
        drop(previous);
        debug!(container = %id, nodes = nodes.len(), "mounted view");
        Ok(true)
    }
}

fn listener_for(handler: Handler) -> Listener {
    Closure::wrap(Box::new(move |event: Event| match handler.trigger {
        Trigger::Click => handler.fire(),
        Trigger::Keys(_) => {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            if handler.trigger.matches(&DomEvent::Key(key)) {
                // Space would otherwise scroll the page
                event.prevent_default();
                handler.fire();
            }
        }
    }) as Box<dyn FnMut(Event)>)
}

impl Document for WebDocument {
    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn replace_children(&self, id: &str, nodes: Vec<Node>) -> bool {
        match self.mount(id, &nodes) {
            Ok(mounted) => mounted,
            Err(err) => {
                error!(container = %id, error = ?err, "failed to mount view");
                false
            }
        }
    }

    fn has_style(&self, style_id: &str) -> bool {
        self.document.get_element_by_id(style_id).is_some()
    }

    fn append_style(&self, style_id: &str, css: &str) {
        let result = (|| -> Result<(), JsValue> {
            let head = self
                .document
                .head()
                .ok_or_else(|| JsValue::from_str("document has no <head>"))?;
            let style = self.document.create_element("style")?;
            style.set_id(style_id);
            style.set_text_content(Some(css));
            head.append_child(&style)?;
            Ok(())
        })();
        if let Err(err) = result {
            error!(style = %style_id, error = ?err, "failed to install style sheet");
        }
    }
}
