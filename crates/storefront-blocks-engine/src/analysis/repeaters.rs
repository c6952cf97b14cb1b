use scraper::ElementRef;
use serde::{Deserialize, Serialize};

use super::structure::ParsedTree;

/// A repeated sibling structure that becomes a `repeater` schema field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeaterCandidate {
    pub name: String,
    pub count: usize,
    pub sample_markup: String,
    pub tag: String,
    pub classes: Vec<String>,
}

/// Element predicate used by the pattern table.
#[derive(Debug, Clone, Copy)]
enum Matcher {
    Tags(&'static [&'static str]),
    Any,
    ClassToken(&'static str),
    /// The token itself or a `-` suffixed variant: `col`, `col-6`, `col-md-4`.
    ClassStem(&'static str),
    ClassContains(&'static str),
}

impl Matcher {
    fn matches(self, el: ElementRef<'_>) -> bool {
        let mut classes = el.value().attr("class").unwrap_or("").split_whitespace();
        match self {
            Matcher::Tags(tags) => tags.contains(&el.value().name()),
            Matcher::Any => true,
            Matcher::ClassToken(token) => classes.any(|c| c == token),
            Matcher::ClassStem(stem) => classes.any(|c| {
                c.strip_prefix(stem)
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('-'))
            }),
            Matcher::ClassContains(needle) => classes.any(|c| c.contains(needle)),
        }
    }
}

struct RepeaterPattern {
    name: &'static str,
    container: Matcher,
    child: Matcher,
}

/// Patterns are applied independently and in this order.
const PATTERNS: &[RepeaterPattern] = &[
    RepeaterPattern {
        name: "items",
        container: Matcher::Tags(&["ul", "ol"]),
        child: Matcher::Tags(&["li"]),
    },
    RepeaterPattern {
        name: "columns",
        container: Matcher::ClassToken("row"),
        child: Matcher::ClassStem("col"),
    },
    RepeaterPattern {
        name: "gridItems",
        container: Matcher::ClassContains("grid"),
        child: Matcher::Any,
    },
    RepeaterPattern {
        name: "listItems",
        container: Matcher::ClassContains("list"),
        child: Matcher::ClassContains("item"),
    },
    RepeaterPattern {
        name: "slides",
        container: Matcher::ClassContains("carousel"),
        child: Matcher::ClassContains("slide"),
    },
];

pub struct RepeaterDetector;

impl RepeaterDetector {
    pub fn detect(&self, tree: &ParsedTree) -> Vec<RepeaterCandidate> {
        PATTERNS
            .iter()
            .filter_map(|pattern| Self::apply(pattern, tree))
            .collect()
    }

    fn apply(pattern: &RepeaterPattern, tree: &ParsedTree) -> Option<RepeaterCandidate> {
        let matches: Vec<ElementRef<'_>> = tree
            .elements()
            .filter(|el| pattern.container.matches(*el))
            .flat_map(|container| container.children().filter_map(ElementRef::wrap))
            .filter(|child| pattern.child.matches(*child))
            .collect();

        if matches.len() < 2 {
            return None;
        }

        let first = matches[0];
        log::debug!("repeater `{}` matched {} elements", pattern.name, matches.len());
        Some(RepeaterCandidate {
            name: pattern.name.to_string(),
            count: matches.len(),
            sample_markup: first.html(),
            tag: first.value().name().to_string(),
            classes: first
                .value()
                .attr("class")
                .map(|c| c.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
        })
    }
}
