use crate::extract::LinkElement;

/// A `<link>` element identified as an icon candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconCandidate {
    pub href: Option<String>,
    pub size_hint: Option<u32>,
}

impl IconCandidate {
    fn from_link(link: &LinkElement) -> Self {
        Self {
            href: link.attr("href").map(str::to_string),
            size_hint: link.attr("sizes").and_then(parse_size_hint),
        }
    }
}

/// Parse the leading integer of a `sizes` attribute value, e.g. `"32x32"`
/// yields 32. Anything unparsable yields `None`.
pub fn parse_size_hint(sizes: &str) -> Option<u32> {
    sizes.split('x').next()?.trim().parse().ok()
}

/// Pick the best icon among the page's `<link>` elements.
///
/// Links declaring a non-empty `sizes` attribute are preferred; among those
/// the largest parsed size wins, earlier candidates win ties, and a
/// malformed size compares as zero so it never beats a valid positive one.
/// With no sized links, the last link whose `rel` mentions `icon`
/// (case-insensitively) is taken. Otherwise there is no candidate.
pub fn select_best_icon(links: &[LinkElement]) -> Option<IconCandidate> {
    let best_sized = links
        .iter()
        .filter(|link| link.attr("sizes").is_some_and(|s| !s.is_empty()))
        .map(IconCandidate::from_link)
        .reduce(|best, current| {
            if current.size_hint.unwrap_or(0) > best.size_hint.unwrap_or(0) {
                current
            } else {
                best
            }
        });

    if best_sized.is_some() {
        return best_sized;
    }

    links
        .iter()
        .filter(|link| {
            link.attr("rel")
                .is_some_and(|rel| rel.to_ascii_lowercase().contains("icon"))
        })
        .last()
        .map(IconCandidate::from_link)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_leading_integer_of_sizes() {
        assert_eq!(parse_size_hint("32x32"), Some(32));
        assert_eq!(parse_size_hint("180x180"), Some(180));
        assert_eq!(parse_size_hint("64"), Some(64));
        assert_eq!(parse_size_hint("bogus"), None);
        assert_eq!(parse_size_hint(""), None);
        assert_eq!(parse_size_hint("x32"), None);
    }

    #[test]
    fn largest_size_wins_regardless_of_order() {
        let links = [
            LinkElement::new(&[("rel", "icon"), ("sizes", "16x16"), ("href", "/s.png")]),
            LinkElement::new(&[("rel", "icon"), ("sizes", "192x192"), ("href", "/l.png")]),
            LinkElement::new(&[("rel", "icon"), ("sizes", "32x32"), ("href", "/m.png")]),
        ];

        let best = select_best_icon(&links).unwrap();
        assert_eq!(best.href.as_deref(), Some("/l.png"));
        assert_eq!(best.size_hint, Some(192));
    }

    #[test]
    fn tie_keeps_earlier_candidate() {
        let links = [
            LinkElement::new(&[("rel", "icon"), ("sizes", "64x64"), ("href", "/first.png")]),
            LinkElement::new(&[("rel", "icon"), ("sizes", "64x64"), ("href", "/second.png")]),
        ];

        let best = select_best_icon(&links).unwrap();
        assert_eq!(best.href.as_deref(), Some("/first.png"));
    }

    #[test]
    fn malformed_size_never_beats_valid_size() {
        let links = [
            LinkElement::new(&[("rel", "icon"), ("sizes", "64x64"), ("href", "/good.png")]),
            LinkElement::new(&[("rel", "icon"), ("sizes", "bogus"), ("href", "/bad.png")]),
        ];

        let best = select_best_icon(&links).unwrap();
        assert_eq!(best.href.as_deref(), Some("/good.png"));

        // Same outcome with the malformed candidate first.
        let reversed = [links[1].clone(), links[0].clone()];
        let best = select_best_icon(&reversed).unwrap();
        assert_eq!(best.href.as_deref(), Some("/good.png"));
    }

    #[test]
    fn sized_link_beats_unsized_rel_icon() {
        let links = [
            LinkElement::new(&[("rel", "shortcut icon"), ("href", "/favicon.ico")]),
            LinkElement::new(&[("rel", "apple-touch-icon"), ("sizes", "180x180"), ("href", "/a.png")]),
        ];

        let best = select_best_icon(&links).unwrap();
        assert_eq!(best.href.as_deref(), Some("/a.png"));
    }

    #[test]
    fn empty_sizes_does_not_count_as_sized() {
        let links = [
            LinkElement::new(&[("rel", "icon"), ("sizes", ""), ("href", "/empty.png")]),
            LinkElement::new(&[("rel", "icon"), ("href", "/plain.ico")]),
        ];

        // No sized candidates, so the last rel-icon match is taken.
        let best = select_best_icon(&links).unwrap();
        assert_eq!(best.href.as_deref(), Some("/plain.ico"));
    }

    #[test]
    fn rel_matching_is_case_insensitive_and_takes_last() {
        let links = [
            LinkElement::new(&[("rel", "ICON"), ("href", "/upper.ico")]),
            LinkElement::new(&[("rel", "Shortcut Icon"), ("href", "/mixed.ico")]),
            LinkElement::new(&[("rel", "stylesheet"), ("href", "/style.css")]),
        ];

        let best = select_best_icon(&links).unwrap();
        assert_eq!(best.href.as_deref(), Some("/mixed.ico"));
    }

    #[test]
    fn no_icon_links_yields_none() {
        let links = [
            LinkElement::new(&[("rel", "stylesheet"), ("href", "/style.css")]),
            LinkElement::new(&[("rel", "canonical"), ("href", "https://example.com/")]),
        ];

        assert!(select_best_icon(&links).is_none());
        assert!(select_best_icon(&[]).is_none());
    }
}
