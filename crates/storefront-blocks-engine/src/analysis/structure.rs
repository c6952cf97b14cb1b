use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

use super::classes::CssClassSet;
use crate::error::AnalysisError;

/// A fragment parsed under a synthetic root element.
///
/// Any number of top-level nodes parse; malformed markup is repaired by the
/// HTML5 tree builder rather than rejected.
pub struct ParsedTree {
    html: Html,
}

impl std::fmt::Debug for ParsedTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedTree")
            .field("element_count", &self.elements().count())
            .finish()
    }
}

impl ParsedTree {
    /// Top-level elements of the fragment, in document order.
    pub fn roots(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html.root_element().children().filter_map(ElementRef::wrap)
    }

    /// Every element of the fragment in pre-order, synthetic root excluded.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
    }

    /// Elements with the given (lower-case) tag name, in document order.
    pub fn elements_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = ElementRef<'a>> {
        self.elements().filter(move |el| el.value().name() == tag)
    }
}

/// Shape metrics for a parsed fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureSummary {
    pub root_tag: String,
    pub root_classes: Vec<String>,
    pub depth: usize,
    pub element_count: usize,
    pub has_images: bool,
    pub has_links: bool,
    pub has_list: bool,
}

/// Parses a fragment. Fails only when the result holds no element at all.
pub fn parse_fragment(fragment: &str) -> Result<ParsedTree, AnalysisError> {
    let html = Html::parse_fragment(fragment);
    if !html.errors.is_empty() {
        log::debug!("ignored {} parser diagnostics", html.errors.len());
    }

    let tree = ParsedTree { html };
    if tree.roots().next().is_none() {
        return Err(AnalysisError::Parse {
            reason: "fragment contains no elements".to_string(),
        });
    }
    Ok(tree)
}

pub fn summarize(tree: &ParsedTree) -> StructureSummary {
    let (root_tag, root_classes) = match tree.roots().next() {
        Some(root) => (
            root.value().name().to_string(),
            root.value()
                .attr("class")
                .map(|c| c.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
        ),
        None => (String::new(), Vec::new()),
    };

    let mut element_count = 0;
    let mut has_images = false;
    let mut has_links = false;
    let mut has_list = false;
    for el in tree.elements() {
        element_count += 1;
        match el.value().name() {
            "img" => has_images = true,
            "a" => has_links = true,
            "ul" | "ol" => has_list = true,
            _ => {}
        }
    }

    StructureSummary {
        root_tag,
        root_classes,
        depth: tree.roots().map(element_depth).max().unwrap_or(0),
        element_count,
        has_images,
        has_links,
        has_list,
    }
}

/// Nesting depth of an element subtree; an element without element children
/// has depth 1. Walks with an explicit stack: fragments are untrusted and may
/// nest arbitrarily deep.
fn element_depth(root: ElementRef<'_>) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(root, 1)];
    while let Some((el, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        stack.extend(
            el.children()
                .filter_map(ElementRef::wrap)
                .map(|child| (child, depth + 1)),
        );
    }
    deepest
}

/// Collects class tokens of every element in pre-order.
pub fn collect_classes(tree: &ParsedTree) -> CssClassSet {
    tree.elements()
        .filter_map(|el| el.value().attr("class"))
        .collect()
}
