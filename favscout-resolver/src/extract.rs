use scraper::{Html, Selector};
use std::collections::HashMap;

/// An attribute snapshot of a single `<link>` element.
///
/// Attributes are copied out of the parsed document eagerly so the element
/// carries no DOM handle. An absent attribute is distinguishable from one
/// declared with an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkElement {
    attrs: HashMap<String, String>,
}

impl LinkElement {
    pub fn new(attrs: &[(&str, &str)]) -> Self {
        Self {
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }
}

/// Extract every `<link>` element from `markup` in document order.
///
/// html5ever recovers a tree from arbitrarily broken input, so this never
/// fails; malformed fragments simply yield whatever links survive recovery.
pub fn extract_links(markup: &str) -> Vec<LinkElement> {
    let document = Html::parse_document(markup);

    let link_selector = Selector::parse("link").unwrap();

    document
        .select(&link_selector)
        .map(|element| LinkElement {
            attrs: element
                .value()
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_links_in_document_order() {
        let html = r#"<html><head>
            <link rel="stylesheet" href="/style.css">
            <link rel="icon" href="/favicon.ico">
            <link rel="apple-touch-icon" sizes="180x180" href="/apple.png">
        </head><body></body></html>"#;

        let links = extract_links(html);

        assert_eq!(links.len(), 3);
        assert_eq!(links[0].attr("rel"), Some("stylesheet"));
        assert_eq!(links[1].attr("href"), Some("/favicon.ico"));
        assert_eq!(links[2].attr("sizes"), Some("180x180"));
    }

    #[test]
    fn absent_attribute_differs_from_empty() {
        let html = r#"<link rel="icon" sizes="">"#;

        let links = extract_links(html);

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].attr("sizes"), Some(""));
        assert!(links[0].has_attr("sizes"));
        assert!(!links[0].has_attr("href"));
        assert_eq!(links[0].attr("href"), None);
    }

    #[test]
    fn tolerates_malformed_markup() {
        let html = r#"<html><head><link rel="icon" href="/i.png"<link></head>"#;

        // No panic, and whatever the recovery produced is usable.
        let links = extract_links(html);
        assert!(!links.is_empty());
    }

    #[test]
    fn no_links_yields_empty_vec() {
        let links = extract_links("<html><body><p>hello</p></body></html>");
        assert!(links.is_empty());
    }
}
