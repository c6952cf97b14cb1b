use serde::{Deserialize, Serialize};

use super::classes::CssClassSet;

/// Class names owned by the external storefront template family. Markup
/// carrying any of them is styled by that family's stylesheet and must be
/// kept byte-identical.
pub const RESERVED_CLASS_PREFIXES: [&str; 14] = [
    "fs-section",
    "fs-container",
    "fs-block",
    "fs-row",
    "fs-col",
    "fs-heading",
    "fs-text",
    "fs-image",
    "fs-button",
    "fs-card",
    "fs-grid",
    "fs-list",
    "fs-media",
    "fs-layout",
];

pub const DEFAULT_SECTION_TYPE: &str = "block";

/// Ordered: the first section type with any pattern present in the joined
/// class list wins.
pub const SECTION_TYPE_PATTERNS: &[(&str, &[&str])] = &[
    ("hero", &["hero", "mainvisual", "keyvisual"]),
    ("feature", &["feature", "merit", "point"]),
    ("gallery", &["gallery", "slider", "carousel"]),
    ("faq", &["faq", "question"]),
    ("cta", &["cta", "contact"]),
    ("pricing", &["price", "pricing", "plan"]),
    ("testimonial", &["testimonial", "voice", "review"]),
    ("text", &["text", "lead"]),
];

/// Every section type a passthrough block may carry.
pub fn section_types() -> Vec<&'static str> {
    std::iter::once(DEFAULT_SECTION_TYPE)
        .chain(SECTION_TYPE_PATTERNS.iter().map(|(ty, _)| *ty))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum TemplateFamily {
    Passthrough { section_type: String },
    Generic,
}

impl TemplateFamily {
    pub fn is_passthrough(&self) -> bool {
        matches!(self, TemplateFamily::Passthrough { .. })
    }
}

pub struct TemplateFamilyClassifier;

impl TemplateFamilyClassifier {
    pub fn classify(&self, classes: &CssClassSet) -> TemplateFamily {
        if !classes.iter().any(is_reserved) {
            return TemplateFamily::Generic;
        }

        let section_type = Self::section_type(classes);
        log::debug!("passthrough block, section type `{section_type}`");
        TemplateFamily::Passthrough { section_type }
    }

    fn section_type(classes: &CssClassSet) -> String {
        let joined = classes.joined().to_lowercase();
        SECTION_TYPE_PATTERNS
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|p| joined.contains(p)))
            .map_or(DEFAULT_SECTION_TYPE, |(ty, _)| *ty)
            .to_string()
    }
}

fn is_reserved(class: &str) -> bool {
    RESERVED_CLASS_PREFIXES
        .iter()
        .any(|prefix| class == *prefix || class.starts_with(prefix))
}
