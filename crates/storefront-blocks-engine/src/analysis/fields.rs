use scraper::ElementRef;
use serde::{Deserialize, Serialize};

use super::structure::ParsedTree;

/// Paragraphs this short (trimmed, in chars) or shorter are not editable fields.
const MIN_PARAGRAPH_CHARS: usize = 10;

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Class fragments that mark an anchor as a button or call to action.
const BUTTON_CLASS_HINTS: [&str; 3] = ["btn", "button", "cta"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Image,
    Link,
}

/// One user-editable unit found in the fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub tag: String,
    pub current_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Hands out `base`, `base_2`, `base_3`, … in call order.
struct FieldNamer {
    base: String,
    label: String,
    seen: usize,
}

impl FieldNamer {
    fn new(base: &str, label: &str) -> Self {
        Self {
            base: base.to_string(),
            label: label.to_string(),
            seen: 0,
        }
    }

    fn next(&mut self) -> (String, String) {
        self.seen += 1;
        if self.seen == 1 {
            (self.base.clone(), self.label.clone())
        } else {
            (
                format!("{}_{}", self.base, self.seen),
                format!("{} {}", self.label, self.seen),
            )
        }
    }
}

pub struct ContentFieldExtractor;

impl ContentFieldExtractor {
    /// Runs the heading, paragraph, image and button passes in that order.
    pub fn extract(&self, tree: &ParsedTree) -> Vec<ContentField> {
        let mut fields = Vec::new();
        Self::headings(tree, &mut fields);
        Self::paragraphs(tree, &mut fields);
        Self::images(tree, &mut fields);
        Self::buttons(tree, &mut fields);
        log::debug!("extracted {} content fields", fields.len());
        fields
    }

    fn headings(tree: &ParsedTree, fields: &mut Vec<ContentField>) {
        for tag in HEADING_TAGS {
            let mut namer = FieldNamer::new(tag, &format!("Heading ({tag})"));
            for el in tree.elements_named(tag) {
                let (name, label) = namer.next();
                fields.push(ContentField {
                    name,
                    field_type: FieldType::Text,
                    label,
                    tag: tag.to_string(),
                    current_value: trimmed_text(el),
                    href: None,
                    alt: None,
                });
            }
        }
    }

    fn paragraphs(tree: &ParsedTree, fields: &mut Vec<ContentField>) {
        let mut namer = FieldNamer::new("paragraph", "Paragraph");
        for el in tree.elements_named("p") {
            let text = trimmed_text(el);
            if text.chars().count() <= MIN_PARAGRAPH_CHARS {
                continue;
            }
            let (name, label) = namer.next();
            fields.push(ContentField {
                name,
                field_type: FieldType::Textarea,
                label,
                tag: "p".to_string(),
                current_value: text,
                href: None,
                alt: None,
            });
        }
    }

    fn images(tree: &ParsedTree, fields: &mut Vec<ContentField>) {
        let mut namer = FieldNamer::new("image", "Image");
        for el in tree.elements_named("img") {
            let Some(src) = el.value().attr("src").filter(|s| !s.is_empty()) else {
                continue;
            };
            let (name, label) = namer.next();
            fields.push(ContentField {
                name,
                field_type: FieldType::Image,
                label,
                tag: "img".to_string(),
                current_value: src.to_string(),
                href: None,
                alt: Some(el.value().attr("alt").unwrap_or_default().to_string()),
            });
        }
    }

    fn buttons(tree: &ParsedTree, fields: &mut Vec<ContentField>) {
        let mut namer = FieldNamer::new("button", "Button");
        for el in tree.elements_named("a").filter(|el| is_button(*el)) {
            let (name, label) = namer.next();
            fields.push(ContentField {
                name,
                field_type: FieldType::Link,
                label,
                tag: "a".to_string(),
                current_value: trimmed_text(el),
                href: Some(el.value().attr("href").unwrap_or_default().to_string()),
                alt: None,
            });
        }
    }
}

fn trimmed_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn is_button(el: ElementRef<'_>) -> bool {
    el.value()
        .attr("class")
        .unwrap_or("")
        .split_whitespace()
        .any(|class| {
            let class = class.to_ascii_lowercase();
            BUTTON_CLASS_HINTS.iter().any(|hint| class.contains(hint))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::structure::parse_fragment;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn extract(html: &str) -> Vec<ContentField> {
        ContentFieldExtractor.extract(&parse_fragment(html).unwrap())
    }

    fn names(fields: &[ContentField]) -> Vec<&str> {
        fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[rstest]
    #[case(1, vec!["h2"])]
    #[case(3, vec!["h2", "h2_2", "h2_3"])]
    fn repeated_headings_are_suffixed_in_document_order(
        #[case] n: usize,
        #[case] expected: Vec<&str>,
    ) {
        let html: String = (1..=n).map(|i| format!("<h2>Heading {i}</h2>")).collect();
        let fields = extract(&format!("<div>{html}</div>"));

        assert_eq!(names(&fields), expected);
        assert!(fields.iter().all(|f| f.field_type == FieldType::Text));
        assert_eq!(fields[n - 1].current_value, format!("Heading {n}"));
    }

    #[test]
    fn passes_run_in_fixed_order() {
        let fields = extract(
            r#"<a class="btn" href="/buy">Buy now</a>
               <img src="/b.png">
               <p>This paragraph is long enough.</p>
               <h3>Sub</h3>
               <h1>Main</h1>"#,
        );

        assert_eq!(names(&fields), vec!["h1", "h3", "paragraph", "image", "button"]);
    }

    #[test]
    fn short_paragraphs_are_skipped_but_headings_are_not() {
        let fields = extract("<div><h2>  </h2><p>0123456789</p><p> 01234567890 </p></div>");

        assert_eq!(names(&fields), vec!["h2", "paragraph"]);
        assert_eq!(fields[0].current_value, "");
        assert_eq!(fields[1].current_value, "01234567890");
    }

    #[test]
    fn images_need_a_source() {
        let fields = extract(r#"<div><img alt="none"><img src=""><img src="/a.jpg"></div>"#);

        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].current_value, "/a.jpg");
        assert_eq!(fields[0].alt.as_deref(), Some(""));
    }

    #[test]
    fn only_button_like_anchors_are_links() {
        let fields = extract(
            r#"<p><a href="/plain">plain link</a></p>
               <a class="Button-primary" href="/a"> First </a>
               <a class="hero-cta" href="/b">Second</a>"#,
        );

        assert_eq!(names(&fields), vec!["button", "button_2"]);
        assert_eq!(fields[0].current_value, "First");
        assert_eq!(fields[0].href.as_deref(), Some("/a"));
        assert_eq!(fields[1].label, "Button 2");
    }
}
