//! Live DOM tests, run with `wasm-pack test --headless --firefox cardsearch-web`

#![cfg(target_arch = "wasm32")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use cardsearch_core::memory::StaticCatalogSource;
use cardsearch_core::{
    Document, Element, Node, SampleBrowser, SampleCatalog, Scheduler, SearchTrigger, Trigger,
};
use cardsearch_web::{GlooScheduler, WebDocument, WebNavigator};
use gloo_timers::future::TimeoutFuture;
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{HtmlElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

const CATALOG: &str = r#"{"samples":[
    {"category":"Creatures","description":"By type","queries":[
        {"text":"red dragon","description":"Dragons","expected_min":5,"expected_max":40,"tags":["color","type"]},
        {"text":"1 mana elf","expected_min":3,"expected_max":30}
    ]}
]}"#;

fn page() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Fresh empty container appended to `<body>`
fn container(id: &str) -> web_sys::Element {
    let document = page();
    if let Some(old) = document.get_element_by_id(id) {
        old.remove();
    }
    let el = document.create_element("div").unwrap();
    el.set_id(id);
    document.body().unwrap().append_child(&el).unwrap();
    el
}

fn keydown(key: &str) -> KeyboardEvent {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_bubbles(true);
    init.set_cancelable(true);
    KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap()
}

#[wasm_bindgen_test]
async fn card_click_and_space_each_search_once() {
    let root = container("web-samples");
    let searches = Rc::new(RefCell::new(Vec::<String>::new()));
    let trigger: SearchTrigger = {
        let searches = Rc::clone(&searches);
        Rc::new(move |query: &str| searches.borrow_mut().push(query.to_string()))
    };

    let source = StaticCatalogSource::new().with_response(SampleCatalog::from_json(CATALOG));
    let browser = SampleBrowser::new(
        Box::new(source),
        Rc::new(WebDocument::from_window().unwrap()),
        Rc::new(WebNavigator::from_window().unwrap()),
        Some(trigger),
    );
    assert!(browser.load_catalog().await.is_some());
    assert!(browser.render("web-samples"));

    let card: HtmlElement = root
        .query_selector(".sample-query-card")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();

    card.click();
    assert_eq!(*searches.borrow(), ["red dragon"]);

    // pushState carries `{ query }`
    let state = web_sys::window().unwrap().history().unwrap().state().unwrap();
    let query = Reflect::get(&state, &JsValue::from_str("query")).unwrap();
    assert_eq!(query.as_string().as_deref(), Some("red dragon"));

    // dispatch_event returns false once preventDefault ran
    assert!(!card.dispatch_event(&keydown(" ")).unwrap());
    assert_eq!(searches.borrow().len(), 2);

    assert!(card.dispatch_event(&keydown("a")).unwrap());
    assert_eq!(searches.borrow().len(), 2);
}

#[wasm_bindgen_test]
async fn compact_button_searches_on_click() {
    let root = container("web-compact");
    let searches = Rc::new(Cell::new(0));
    let trigger: SearchTrigger = {
        let searches = Rc::clone(&searches);
        Rc::new(move |_: &str| searches.set(searches.get() + 1))
    };

    let source = StaticCatalogSource::new().with_response(SampleCatalog::from_json(CATALOG));
    let browser = SampleBrowser::new(
        Box::new(source),
        Rc::new(WebDocument::from_window().unwrap()),
        Rc::new(WebNavigator::from_window().unwrap()),
        Some(trigger),
    );
    browser.load_catalog().await;
    assert!(browser.render_compact("web-compact", Some(1)));

    let buttons = root.query_selector_all(".compact-query-btn").unwrap();
    assert_eq!(buttons.length(), 1);

    let button: HtmlElement = buttons.get(0).unwrap().dyn_into().unwrap();
    button.click();
    assert_eq!(searches.get(), 1);
}

#[wasm_bindgen_test]
async fn cancelled_timeout_never_runs() {
    let scheduler = GlooScheduler::new();
    let ran = Rc::new(Cell::new(0));

    let counter = Rc::clone(&ran);
    let cancelled = scheduler.schedule(
        Duration::from_millis(10),
        Box::new(move || counter.set(counter.get() + 1)),
    );
    let counter = Rc::clone(&ran);
    scheduler.schedule(
        Duration::from_millis(20),
        Box::new(move || counter.set(counter.get() + 10)),
    );

    scheduler.cancel(cancelled);
    assert_eq!(scheduler.pending_count(), 1);

    TimeoutFuture::new(60).await;
    assert_eq!(ran.get(), 10);
    assert_eq!(scheduler.pending_count(), 0);

    // Already gone; ignored
    scheduler.cancel(cancelled);
    assert_eq!(ran.get(), 10);
}

#[wasm_bindgen_test]
fn rerender_releases_previous_listeners() {
    container("web-rerender");
    let document = WebDocument::from_window().unwrap();

    let token = Rc::new(());
    let held = Rc::clone(&token);
    let view = vec![Node::from(
        Element::new("button")
            .text("go")
            .on(Trigger::Click, Rc::new(move || drop(Rc::clone(&held)))),
    )];

    assert!(document.replace_children("web-rerender", view));
    assert_eq!(document.listener_count("web-rerender"), 1);
    assert_eq!(Rc::strong_count(&token), 2);

    assert!(document.replace_children("web-rerender", Vec::new()));
    assert_eq!(document.listener_count("web-rerender"), 0);
    assert_eq!(Rc::strong_count(&token), 1);
}

#[wasm_bindgen_test]
fn missing_container_is_rejected() {
    let document = WebDocument::from_window().unwrap();
    assert!(!document.replace_children("web-nowhere", Vec::new()));
    assert_eq!(document.listener_count("web-nowhere"), 0);
}
