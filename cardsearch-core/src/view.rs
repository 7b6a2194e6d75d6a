//! Typed view tree
//!
//! Components describe what goes into a host element as a tree of [`Node`]s
//! with event handlers attached programmatically. Hosts either mount the tree
//! into a live DOM or keep it in memory; [`Node::to_html`] serializes it with
//! all text and attribute values escaped.
//!
//! ```text
//! div.sample-query-card [role=button, tabindex=0]   on: click, keydown(Enter, Space)
//! ├── div.query-text        "\"red dragon\""
//! ├── div.query-description "Red dragons"
//! └── div.query-meta
//!     ├── span.expected-results "5-40 results"
//!     └── div.query-tags
//!         ├── span.tag "color"
//!         └── span.tag "type"
//! ```

use std::fmt;
use std::rc::Rc;

/// Handler body. Handlers only capture `Rc` state, so trees stay cheap to clone.
pub type Callback = Rc<dyn Fn()>;

/// Keys that activate a focusable card: Enter and Space (`KeyboardEvent.key`)
pub const ACTIVATION_KEYS: &[&str] = &["Enter", " "];

/// An input event delivered to an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    Click,
    /// Key press carrying the `KeyboardEvent.key` value
    Key(String),
}

impl DomEvent {
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }
}

/// Which events a handler responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Click,
    Keys(&'static [&'static str]),
}

impl Trigger {
    pub fn matches(&self, event: &DomEvent) -> bool {
        match (self, event) {
            (Trigger::Click, DomEvent::Click) => true,
            (Trigger::Keys(keys), DomEvent::Key(key)) => keys.contains(&key.as_str()),
            _ => false,
        }
    }

    /// DOM event type to listen for
    pub fn event_name(&self) -> &'static str {
        match self {
            Trigger::Click => "click",
            Trigger::Keys(_) => "keydown",
        }
    }
}

#[derive(Clone)]
pub struct Handler {
    pub trigger: Trigger,
    callback: Callback,
}

impl Handler {
    pub fn new(trigger: Trigger, callback: Callback) -> Self {
        Self { trigger, callback }
    }

    pub fn fire(&self) {
        (self.callback)()
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("trigger", &self.trigger)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct Element {
    tag: &'static str,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
    handlers: Vec<Handler>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
            handlers: Vec::new(),
        }
    }

    // Builders

    /// Add one or more space-separated classes
    pub fn class(mut self, class: &str) -> Self {
        self.classes
            .extend(class.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn on(mut self, trigger: Trigger, callback: Callback) -> Self {
        self.handlers.push(Handler::new(trigger, callback));
        self
    }

    pub fn on_click(self, callback: Callback) -> Self {
        self.on(Trigger::Click, callback)
    }

    /// Make the element a keyboard-reachable button: focusable, announced as
    /// a button, and activated by click, Enter or Space. Every path runs the
    /// same callback once per activation.
    pub fn on_activate(self, callback: Callback) -> Self {
        self.attr("role", "button")
            .attr("tabindex", "0")
            .on(Trigger::Click, Rc::clone(&callback))
            .on(Trigger::Keys(ACTIVATION_KEYS), callback)
    }

    // Accessors

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    pub fn handlers(&self) -> &[Handler] {
        &self.handlers
    }

    /// Run every handler matching `event`; returns how many fired
    pub fn dispatch(&self, event: &DomEvent) -> usize {
        let mut fired = 0;
        for handler in self.handlers.iter().filter(|h| h.trigger.matches(event)) {
            handler.fire();
            fired += 1;
        }
        fired
    }

    /// This element and its descendants carrying `class`, in document order
    pub fn by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_by_class(self, class, &mut found);
        found
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write_text(&mut out);
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

fn collect_by_class<'a>(element: &'a Element, class: &str, found: &mut Vec<&'a Element>) {
    if element.has_class(class) {
        found.push(element);
    }
    for child in &element.children {
        if let Node::Element(el) = child {
            collect_by_class(el, class, found);
        }
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn by_class(&self, class: &str) -> Vec<&Element> {
        self.as_element()
            .map(|el| el.by_class(class))
            .unwrap_or_default()
    }

    /// Concatenated text of the subtree, like DOM `textContent`
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    /// Non-blank text leaves, trimmed, in document order
    pub fn text_fragments(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fragments(&mut out);
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                for child in &el.children {
                    child.write_text(out);
                }
            }
        }
    }

    fn collect_fragments<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    out.push(trimmed);
                }
            }
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_fragments(out);
                }
            }
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => escape_into(text, false, out),
            Node::Element(el) => write_element(el, out),
        }
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(el.tag);
    if !el.classes.is_empty() {
        write_attr("class", &el.classes.join(" "), out);
    }
    for (name, value) in &el.attrs {
        write_attr(name, value, out);
    }
    out.push('>');
    for child in &el.children {
        child.write_html(out);
    }
    out.push_str("</");
    out.push_str(el.tag);
    out.push('>');
}

fn write_attr(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_into(value, true, out);
    out.push('"');
}

fn escape_into(text: &str, in_attr: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attr => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

/// Serialize a list of sibling nodes
pub fn to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_html(&mut out);
    }
    out
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

pub fn div() -> Element {
    Element::new("div")
}

pub fn span() -> Element {
    Element::new("span")
}

pub fn p() -> Element {
    Element::new("p")
}

pub fn h2() -> Element {
    Element::new("h2")
}

pub fn h3() -> Element {
    Element::new("h3")
}

pub fn button() -> Element {
    Element::new("button").attr("type", "button")
}
