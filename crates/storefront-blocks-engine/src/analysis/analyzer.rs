use storefront_blocks_config::Config;

use super::family::TemplateFamilyClassifier;
use super::fields::ContentFieldExtractor;
use super::repeaters::RepeaterDetector;
use super::result::{BlockAnalysisResult, RawFragment};
use super::schema::SchemaGenerator;
use super::structure::{collect_classes, parse_fragment, summarize};
use super::template::{RenderTemplateGenerator, suggest_icon};
use crate::shop::ShopId;

/// Runs the analysis pipeline over one fragment.
pub struct BlockAnalyzer {
    templates: RenderTemplateGenerator,
}

impl BlockAnalyzer {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            templates: RenderTemplateGenerator::new(namespace),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.namespace.clone())
    }

    /// Parse failure is the only fatal outcome; every later step reports
    /// "nothing found" as empty collections.
    pub fn analyze(&self, html: &str, shop_id: Option<ShopId>) -> BlockAnalysisResult {
        let fragment = RawFragment {
            html: html.to_string(),
            shop_id,
        };

        let tree = match parse_fragment(html) {
            Ok(tree) => tree,
            Err(err) => {
                log::debug!("analysis stopped: {err}");
                return BlockAnalysisResult::failed(fragment, err);
            }
        };

        let structure = summarize(&tree);
        let classes = collect_classes(&tree);
        let repeaters = RepeaterDetector.detect(&tree);
        let fields = ContentFieldExtractor.extract(&tree);
        let family = TemplateFamilyClassifier.classify(&classes);
        let schema = SchemaGenerator.generate(&family, html, &classes, &fields, &repeaters);
        let render_template = self.templates.generate(&family, html, &fields);
        let icon = suggest_icon(&structure, &repeaters);

        BlockAnalysisResult {
            fragment,
            structure: Some(structure),
            classes,
            repeaters,
            fields,
            family: Some(family),
            schema: Some(schema),
            render_template,
            icon: Some(icon),
            errors: Vec::new(),
        }
    }
}

impl Default for BlockAnalyzer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::family::TemplateFamily;
    use crate::analysis::fields::FieldType;
    use crate::analysis::result::{BlockStore, NewBlockRecord, TypeSlugger, create_block};
    use crate::analysis::template::BlockIcon;
    use crate::error::PersistError;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    const CARD: &str = r#"<div class="card"><h2>Title</h2><p>Some long description text here</p><img src="/a.jpg" alt="x"></div>"#;

    struct NameSlugger;

    impl TypeSlugger for NameSlugger {
        fn slug(&self, name: &str, shop_id: Option<ShopId>) -> String {
            format!("{}-{}", shop_id.unwrap_or(0), name.to_lowercase().replace(' ', "-"))
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        records: RefCell<Vec<NewBlockRecord>>,
    }

    impl BlockStore for RecordingStore {
        fn create_block(&self, record: NewBlockRecord) -> Result<u64, PersistError> {
            self.records.borrow_mut().push(record);
            Ok(self.records.borrow().len() as u64)
        }
    }

    #[test]
    fn end_to_end_generic_card() {
        let result = BlockAnalyzer::default().analyze(CARD, Some(7));

        let structure = result.structure.as_ref().unwrap();
        assert_eq!(structure.root_tag, "div");
        assert_eq!(structure.root_classes, vec!["card"]);
        assert!(structure.has_images);
        assert!(!structure.has_links);

        let fields: Vec<(&str, FieldType, &str)> = result
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.field_type, f.current_value.as_str()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("h2", FieldType::Text, "Title"),
                ("paragraph", FieldType::Textarea, "Some long description text here"),
                ("image", FieldType::Image, "/a.jpg"),
            ]
        );
        assert!(result.repeaters.is_empty());
        assert_eq!(result.family, Some(TemplateFamily::Generic));
        assert_eq!(result.icon, Some(BlockIcon::Photo));

        let template = &result.render_template;
        assert!(template.contains("<h2>{{ content.h2 }}</h2>"));
        assert!(!template.contains(">Title<"));
        assert!(template.contains(r#"src="{{ content.image }}""#));
        assert!(template.starts_with("<div class=\"pd-block pd-block--custom"));
        assert_eq!(template.matches("pd-block--custom").count(), 1);
        assert!(result.is_valid());
    }

    #[test]
    fn reserved_class_gives_passthrough_regardless_of_structure() {
        let html = r#"<section class="fs-section"><ul><li><h2>A</h2></li><li><h2>B</h2></li></ul></section>"#;
        let result = BlockAnalyzer::default().analyze(html, None);

        assert_eq!(
            result.family,
            Some(TemplateFamily::Passthrough {
                section_type: "block".to_string()
            })
        );
        assert_eq!(result.render_template, "{{ content.html|raw }}");
        let schema = result.schema.as_ref().unwrap();
        assert_eq!(schema.content.keys().collect::<Vec<_>>(), vec!["html"]);
        assert!(result.is_valid());
    }

    #[test]
    fn parse_failure_short_circuits() {
        let result = BlockAnalyzer::default().analyze("no markup here", Some(1));

        assert!(!result.is_valid());
        assert_eq!(result.errors.len(), 1);
        assert!(result.structure.is_none());
        assert!(result.schema.is_none());
        assert!(result.render_template.is_empty());
        assert!(result.classes.is_empty());
    }

    #[test]
    fn deeply_nested_spans_are_analyzed() {
        let n = 50_000;
        let html = format!("{}x{}", "<span>".repeat(n), "</span>".repeat(n));

        let result = BlockAnalyzer::default().analyze(&html, Some(1));

        assert!(result.is_valid());
        assert_eq!(result.structure.as_ref().map(|s| s.depth), Some(n));
    }

    #[test]
    fn namespace_comes_from_config() {
        let config = Config {
            namespace: "acme".to_string(),
            ..Config::default()
        };
        let result = BlockAnalyzer::from_config(&config).analyze("<p>x</p>", None);

        assert!(result.render_template.starts_with("<div class=\"acme-block acme-block--custom"));
    }

    #[test]
    fn valid_result_is_stored_as_block_record() {
        let result = BlockAnalyzer::default().analyze(CARD, Some(7));
        let store = RecordingStore::default();

        let id = create_block(&result, "Product Card", Some(42), &NameSlugger, &store).unwrap();

        assert_eq!(id, 1);
        let records = store.records.borrow();
        let record = &records[0];
        assert_eq!(record.type_slug, "7-product-card");
        assert_eq!(record.category, "custom");
        assert_eq!(record.icon, BlockIcon::Photo);
        assert_eq!(record.css_classes, vec!["card"]);
        assert_eq!(record.sample_html, CARD);
        assert!(record.is_active);
        assert_eq!(record.created_by, Some(42));
        assert_eq!(record.description, "Generated from HTML: 3 fields, 0 repeaters");
    }

    #[test]
    fn invalid_result_is_not_stored() {
        let result = BlockAnalyzer::default().analyze("", None);
        let store = RecordingStore::default();

        let err = create_block(&result, "Broken", None, &NameSlugger, &store).unwrap_err();

        assert!(matches!(err, PersistError::InvalidAnalysis(_)));
        assert!(store.records.borrow().is_empty());
    }

    #[test]
    fn result_serializes_errors_as_messages() {
        let result = BlockAnalyzer::default().analyze("", None);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(
            json["errors"][0],
            "cannot parse fragment: fragment contains no elements"
        );
    }
}
