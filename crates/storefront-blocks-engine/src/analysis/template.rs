use serde::{Deserialize, Serialize};

use super::family::TemplateFamily;
use super::fields::{ContentField, FieldType};
use super::repeaters::RepeaterCandidate;
use super::structure::StructureSummary;

/// Render expression for the raw HTML of a passthrough block.
pub const RAW_HTML_PLACEHOLDER: &str = "{{ content.html|raw }}";

pub fn content_placeholder(name: &str) -> String {
    format!("{{{{ content.{name} }}}}")
}

pub fn setting_placeholder(name: &str) -> String {
    format!("{{{{ settings.{name} }}}}")
}

/// Editor icon suggested for a generated block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockIcon {
    Photo,
    List,
    Grid,
    Banner,
    Stack,
    Badge,
    Square,
}

impl BlockIcon {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockIcon::Photo => "photo",
            BlockIcon::List => "list",
            BlockIcon::Grid => "grid",
            BlockIcon::Banner => "banner",
            BlockIcon::Stack => "stack",
            BlockIcon::Badge => "badge",
            BlockIcon::Square => "square",
        }
    }
}

/// Root-class keywords checked in order once the structural hints are exhausted.
const ICON_KEYWORDS: &[(&[&str], BlockIcon)] = &[
    (&["banner", "hero"], BlockIcon::Banner),
    (&["card", "box"], BlockIcon::Stack),
    (&["feature", "merit", "benefit"], BlockIcon::Badge),
];

pub fn suggest_icon(summary: &StructureSummary, repeaters: &[RepeaterCandidate]) -> BlockIcon {
    if summary.has_images {
        return BlockIcon::Photo;
    }
    if summary.has_list {
        return BlockIcon::List;
    }
    if !repeaters.is_empty() {
        return BlockIcon::Grid;
    }

    let root_classes = summary.root_classes.join(" ").to_lowercase();
    ICON_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| root_classes.contains(k)))
        .map_or(BlockIcon::Square, |(_, icon)| *icon)
}

pub struct RenderTemplateGenerator {
    namespace: String,
}

impl RenderTemplateGenerator {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn generate(
        &self,
        family: &TemplateFamily,
        fragment: &str,
        fields: &[ContentField],
    ) -> String {
        match family {
            TemplateFamily::Passthrough { .. } => RAW_HTML_PLACEHOLDER.to_string(),
            TemplateFamily::Generic => self.generic(fragment, fields),
        }
    }

    /// Substitutes the first occurrence of each field value, then wraps the
    /// markup in a single container element.
    ///
    /// Only the first occurrence is replaced, so a value that also appears
    /// earlier elsewhere in the fragment binds to that earlier spot.
    fn generic(&self, fragment: &str, fields: &[ContentField]) -> String {
        let mut html = fragment.to_string();

        for field in fields.iter().filter(|f| !f.current_value.is_empty()) {
            let placeholder = content_placeholder(&field.name);
            let replaced = match field.field_type {
                FieldType::Text | FieldType::Textarea => {
                    replace_text(&html, &field.current_value, &placeholder)
                }
                FieldType::Image => replace_src(&html, &field.current_value, &placeholder),
                // Button text and targets stay literal in the markup.
                FieldType::Link => continue,
            };
            match replaced {
                Some(next) => html = next,
                None => log::debug!("no literal occurrence for field `{}`", field.name),
            }
        }

        let ns = &self.namespace;
        format!(
            "<div class=\"{ns}-block {ns}-block--custom {}\">\n{html}\n</div>",
            setting_placeholder("cssClass")
        )
    }
}

impl Default for RenderTemplateGenerator {
    fn default() -> Self {
        Self::new(storefront_blocks_config::DEFAULT_NAMESPACE)
    }
}

/// Replaces the first `>value<`, trying the entity-encoded value when the
/// parser decoded entities out of the literal text.
fn replace_text(html: &str, value: &str, placeholder: &str) -> Option<String> {
    let encoded = html_escape::encode_text(value);
    [value, &*encoded].into_iter().find_map(|candidate| {
        replace_first(
            html,
            &format!(">{candidate}<"),
            &format!(">{placeholder}<"),
        )
    })
}

/// Replaces the first `src="value"` or `src='value'`, whichever comes first,
/// keeping its quote style.
fn replace_src(html: &str, value: &str, placeholder: &str) -> Option<String> {
    let double = format!("src=\"{value}\"");
    let single = format!("src='{value}'");
    let (pattern, quote) = match (html.find(&double), html.find(&single)) {
        (Some(d), Some(s)) if s < d => (single, '\''),
        (Some(_), _) => (double, '"'),
        (None, Some(_)) => (single, '\''),
        (None, None) => {
            let encoded = html_escape::encode_double_quoted_attribute(value);
            (format!("src=\"{encoded}\""), '"')
        }
    };
    replace_first(html, &pattern, &format!("src={quote}{placeholder}{quote}"))
}

fn replace_first(haystack: &str, needle: &str, replacement: &str) -> Option<String> {
    let start = haystack.find(needle)?;
    let mut out = String::with_capacity(haystack.len() + replacement.len());
    out.push_str(&haystack[..start]);
    out.push_str(replacement);
    out.push_str(&haystack[start + needle.len()..]);
    Some(out)
}
