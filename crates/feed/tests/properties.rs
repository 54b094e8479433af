//! Property tests for channel parsing.
//!
//! Generates small channels from arbitrary text and checks that parsing is
//! deterministic, that repeated elements keep their count and order, and
//! that coercion never fails hard.

use proptest::prelude::*;
use rsskit_feed::{parse_bool, parse_channel, parse_int, parse_long};

/// Escapes text for use as element content.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn document(title: &str, items: &[String], categories: usize) -> String {
    let mut xml = String::from("<rss version=\"2.0\"><channel>");
    xml.push_str(&format!("<title>{}</title>", escape(title)));
    for n in 0..categories {
        xml.push_str(&format!("<category>c{}</category>", n));
    }
    for item in items {
        xml.push_str(&format!("<item><title>{}</title></item>", escape(item)));
    }
    xml.push_str("</channel></rss>");
    xml
}

proptest! {
    #[test]
    fn parse_is_idempotent(title in "[a-zA-Z0-9 &<>]{1,20}", items in prop::collection::vec("[a-z]{1,8}", 0..5)) {
        let xml = document(&title, &items, 1);
        let first = parse_channel(&xml).unwrap();
        let second = parse_channel(&xml).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn item_titles_round_trip_in_order(items in prop::collection::vec("[a-zA-Z0-9&<> ]{1,12}", 1..6)) {
        let xml = document("t", &items, 0);
        let channel = parse_channel(&xml).unwrap();
        let titles: Vec<String> = channel
            .items()
            .iter()
            .map(|i| i.title.clone().unwrap_or_default())
            .collect();
        prop_assert_eq!(titles, items);
    }

    #[test]
    fn categories_absent_only_when_none_given(count in 0usize..4) {
        let xml = document("t", &[], count);
        let channel = parse_channel(&xml).unwrap();
        match channel.categories {
            None => prop_assert_eq!(count, 0),
            Some(cats) => prop_assert_eq!(cats.len(), count),
        }
        prop_assert!(channel.items.is_none());
    }

    #[test]
    fn documents_without_channel_fail(root in "[a-z]{1,8}", child in "[a-z]{1,8}") {
        prop_assume!(root != "channel" && child != "channel");
        let xml = format!("<{r}><{c}>x</{c}></{r}>", r = root, c = child);
        prop_assert!(parse_channel(&xml).unwrap_err().is_no_channel());
    }

    #[test]
    fn int_coercion_matches_display(n in any::<i32>()) {
        prop_assert_eq!(parse_int(&n.to_string()), Some(n));
    }

    #[test]
    fn long_coercion_matches_display(n in any::<i64>()) {
        prop_assert_eq!(parse_long(&n.to_string()), Some(n));
    }

    #[test]
    fn coercion_never_panics(s in ".*") {
        let _ = parse_int(&s);
        let _ = parse_long(&s);
        let _ = parse_bool(&s);
    }
}
