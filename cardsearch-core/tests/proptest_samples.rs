use std::rc::Rc;
use std::time::Duration;

use cardsearch_core::cards;
use cardsearch_core::memory::{ManualScheduler, MemoryDocument, MemoryNavigator};
use cardsearch_core::{
    Category, Node, SampleCatalog, SampleNavigation, SampleQuery, WarmupIndicator,
};
use proptest::prelude::*;

fn arb_query() -> impl Strategy<Value = SampleQuery> {
    (
        "[a-z]{1,8}( [a-z]{1,8})?",
        0u32..100,
        0u32..100,
        prop::collection::vec("[a-z]{1,5}", 0..5),
    )
        .prop_map(|(text, a, b, tags)| SampleQuery {
            description: format!("{} cards", text),
            text,
            expected_min: a.min(b),
            expected_max: a.max(b),
            tags,
        })
}

fn arb_catalog() -> impl Strategy<Value = SampleCatalog> {
    prop::collection::vec(
        ("[A-Z][a-z]{2,10}", prop::collection::vec(arb_query(), 0..6)).prop_map(
            |(category, queries)| Category {
                description: format!("{} searches", category),
                category,
                queries,
            },
        ),
        0..5,
    )
    .prop_map(|samples| SampleCatalog { samples })
}

fn navigation() -> Rc<SampleNavigation> {
    let navigator = Rc::new(MemoryNavigator::new("https://cards.example.com", "/"));
    Rc::new(SampleNavigation::new(navigator, None))
}

fn elements_with_class<'a>(nodes: &'a [Node], class: &str) -> Vec<&'a cardsearch_core::Element> {
    nodes.iter().flat_map(|n| n.by_class(class)).collect()
}

proptest! {
    /// Property: compact view is exactly the first N queries in catalog order
    #[test]
    fn prop_compact_view_is_prefix(catalog in arb_catalog(), max in 0usize..20) {
        let nodes = cards::compact_view(&catalog, max, &navigation());
        let buttons: Vec<String> = elements_with_class(&nodes, "compact-query-btn")
            .iter()
            .map(|b| b.text_content())
            .collect();

        let expected: Vec<String> = catalog
            .flatten()
            .take(max)
            .map(|f| f.query.text.clone())
            .collect();

        prop_assert_eq!(buttons.len(), max.min(catalog.query_count()));
        prop_assert_eq!(buttons, expected);
    }

    /// Property: full view has one card per query and keeps tag order
    #[test]
    fn prop_full_view_keeps_cards_and_tags(catalog in arb_catalog()) {
        let nodes = cards::full_view(&catalog, &navigation());
        let rendered = elements_with_class(&nodes, "sample-query-card");
        prop_assert_eq!(rendered.len(), catalog.query_count());

        for (card, flat) in rendered.iter().zip(catalog.flatten()) {
            let tags: Vec<String> = card
                .by_class("tag")
                .iter()
                .map(|t| t.text_content())
                .collect();
            prop_assert_eq!(&tags, &flat.query.tags);
            prop_assert_eq!(card.handlers().len(), 2);
        }
    }

    /// Property: with repeated starts only the last one decides when the
    /// message appears
    #[test]
    fn prop_last_start_wins(gaps in prop::collection::vec(0u64..4000, 1..8)) {
        let scheduler = Rc::new(ManualScheduler::new());
        let document = Rc::new(MemoryDocument::with_elements(["search-indicator"]));
        let indicator = WarmupIndicator::new(scheduler.clone(), document.clone());

        for gap in &gaps {
            scheduler.advance(Duration::from_millis(*gap));
            indicator.start_timer("search-indicator");
        }
        prop_assert_eq!(scheduler.pending_count(), 1);

        scheduler.advance(Duration::from_millis(4999));
        prop_assert!(!indicator.is_shown());

        scheduler.advance(Duration::from_millis(1));
        prop_assert!(indicator.is_shown());
        prop_assert_eq!(document.by_class("search-indicator", "warmup-message").len(), 1);
    }

    /// Property: query text never escapes into markup
    #[test]
    fn prop_text_is_escaped(text in "[a-z<>&\" ]{1,20}") {
        prop_assume!(!text.trim().is_empty());
        let catalog = SampleCatalog {
            samples: vec![Category {
                category: "Any".into(),
                description: String::new(),
                queries: vec![SampleQuery {
                    text: text.clone(),
                    description: text.clone(),
                    expected_min: 0,
                    expected_max: 1,
                    tags: vec![text.clone()],
                }],
            }],
        };
        let html = cardsearch_core::view::to_html(&cards::full_view(&catalog, &navigation()));
        prop_assert!(!html.contains("<script"));
        prop_assert_eq!(html.matches('<').count(), html.matches('>').count());
        if text.contains('<') {
            prop_assert!(html.contains("&lt;"));
        }
    }
}
