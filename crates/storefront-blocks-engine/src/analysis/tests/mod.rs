//! Fixture tests for the analysis pipeline.
//!
//! Fixtures (.html) live in `fixtures/`; each one is analyzed and checked
//! against the shared invariants before any fixture-specific assertions.


use pretty_assertions::assert_eq;

use crate::analysis::{BlockAnalysisResult, BlockAnalyzer, BlockIcon, TemplateFamily};

fn analyze_fixture(name: &str) -> BlockAnalysisResult {
    let path = format!(
        "{}/src/analysis/tests/fixtures/{name}.html",
        env!("CARGO_MANIFEST_DIR")
    );
    let html = std::fs::read_to_string(path).unwrap();

    let result = BlockAnalyzer::default().analyze(&html, Some(1));
    invariants::check(&result);
    result
}

fn field_names(result: &BlockAnalysisResult) -> Vec<&str> {
    result.fields.iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn fixture_product_card() {
    let result = analyze_fixture("product_card");

    assert_eq!(field_names(&result), vec!["h2", "paragraph", "image", "button"]);
    assert_eq!(result.classes.as_slice(), &["product-card", "shadow", "btn", "btn-primary"]);
    assert_eq!(result.icon, Some(BlockIcon::Photo));

    let schema = result.schema.as_ref().unwrap();
    assert_eq!(
        schema.content.keys().collect::<Vec<_>>(),
        vec!["h2", "paragraph", "image", "button", "button_href"]
    );
    // Button text is not templated
    assert!(result.render_template.contains(">Add to cart<"));
}

#[test]
fn fixture_feature_list() {
    let result = analyze_fixture("feature_list");

    let repeaters: Vec<(&str, usize)> = result
        .repeaters
        .iter()
        .map(|r| (r.name.as_str(), r.count))
        .collect();
    assert_eq!(repeaters, vec![("items", 3), ("listItems", 3)]);
    assert_eq!(field_names(&result), vec!["h2", "h2_2", "paragraph"]);
    assert_eq!(result.icon, Some(BlockIcon::List));
    assert!(result.render_template.contains("<h2>{{ content.h2 }}</h2>"));
    assert!(result.render_template.contains("<h2>{{ content.h2_2 }}</h2>"));
}

#[test]
fn fixture_storefront_hero() {
    let result = analyze_fixture("storefront_hero");

    assert_eq!(
        result.family,
        Some(TemplateFamily::Passthrough {
            section_type: "hero".to_string()
        })
    );
    assert!(result.is_valid());
}

#[test]
fn fixture_malformed_columns() {
    let result = analyze_fixture("malformed_columns");

    assert!(result.is_valid());
    assert_eq!(result.structure.as_ref().unwrap().root_tag, "div");
    assert!(field_names(&result).contains(&"h3_2"));
}
