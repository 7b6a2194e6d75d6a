//! View construction for the sample browser
//!
//! Full view (one section per category):
//!
//! ```text
//! div.samples-header      h2 + p
//! div.sample-category     h3.category-title, p.category-description, div.queries-grid > cards
//! ...
//! ```
//!
//! Compact view: `h3 "Popular Searches"` followed by `div.compact-queries`
//! holding one `button.compact-query-btn` per query.

use std::rc::Rc;

use crate::catalog::{Category, SampleCatalog, SampleQuery};
use crate::samples::SampleNavigation;
use crate::view::{button, div, h2, h3, p, span, Callback, Element, Node};

pub const HEADER_TITLE: &str = "Try These Sample Searches";
pub const HEADER_SUBTITLE: &str = "Click any example to search immediately";
pub const COMPACT_TITLE: &str = "Popular Searches";

/// Header block followed by one section per category, in catalog order
pub fn full_view(catalog: &SampleCatalog, navigation: &Rc<SampleNavigation>) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(catalog.samples.len() + 1);
    nodes.push(samples_header().into());
    nodes.extend(
        catalog
            .samples
            .iter()
            .map(|category| Node::from(category_section(category, navigation))),
    );
    nodes
}

/// Heading plus a row of buttons for the first `max_queries` queries in
/// category-then-query order. Plain prefix truncation: no dedup, no shuffle.
pub fn compact_view(
    catalog: &SampleCatalog,
    max_queries: usize,
    navigation: &Rc<SampleNavigation>,
) -> Vec<Node> {
    let buttons = catalog
        .flatten()
        .take(max_queries)
        .map(|flat| compact_button(&flat.query.text, navigation));

    vec![
        h3().text(COMPACT_TITLE).into(),
        div().class("compact-queries").children(buttons).into(),
    ]
}

pub fn samples_header() -> Element {
    div()
        .class("samples-header")
        .child(h2().text(HEADER_TITLE))
        .child(p().text(HEADER_SUBTITLE))
}

pub fn category_section(category: &Category, navigation: &Rc<SampleNavigation>) -> Element {
    let cards = category
        .queries
        .iter()
        .map(|query| query_card(query, navigation));

    div()
        .class("sample-category")
        .child(h3().class("category-title").text(category.category.as_str()))
        .child(
            p().class("category-description")
                .text(category.description.as_str()),
        )
        .child(div().class("queries-grid").children(cards))
}

/// One interactive card. Click, Enter and Space all navigate once.
pub fn query_card(query: &SampleQuery, navigation: &Rc<SampleNavigation>) -> Element {
    let tags = query
        .tags
        .iter()
        .map(|tag| span().class("tag").text(tag.as_str()));

    div()
        .class("sample-query-card")
        .child(
            div()
                .class("query-text")
                .text(format!("\"{}\"", query.text)),
        )
        .child(
            div()
                .class("query-description")
                .text(query.description.as_str()),
        )
        .child(
            div()
                .class("query-meta")
                .child(
                    span()
                        .class("expected-results")
                        .text(query.expected_label()),
                )
                .child(div().class("query-tags").children(tags)),
        )
        .on_activate(navigate_to(navigation, &query.text))
}

fn compact_button(text: &str, navigation: &Rc<SampleNavigation>) -> Element {
    button()
        .class("compact-query-btn")
        .text(text)
        .on_click(navigate_to(navigation, text))
}

fn navigate_to(navigation: &Rc<SampleNavigation>, text: &str) -> Callback {
    let navigation = Rc::clone(navigation);
    let text = text.to_string();
    Rc::new(move || {
        navigation.navigate(&text);
    })
}
