//! # Block Analysis
//!
//! Turns a pasted HTML fragment into an editable block definition.
//!
//! ## Pipeline
//!
//! 1. **Structure** (`structure`): parse under a synthetic root, compute a
//!    `StructureSummary` and the document-ordered `CssClassSet`
//! 2. **Detection** (`repeaters`, `fields`): repeated sibling structures and
//!    editable leaf content
//! 3. **Classification** (`family`): passthrough (reserved storefront classes,
//!    markup kept byte-identical) or generic
//! 4. **Generation** (`schema`, `template`): editing schema, render template
//!    and suggested icon
//!
//! `BlockAnalyzer` (`analyzer`) runs the steps in order and collects them in a
//! `BlockAnalysisResult` (`result`).
//!
//! ## Key Invariants
//!
//! - Only a parse failure is fatal; "nothing detected" is an empty collection
//! - Content field names are unique within a result
//! - A passthrough template is exactly the raw HTML placeholder; a generic
//!   template is the original markup with one wrapper element

pub mod analyzer;
pub mod classes;
pub mod family;
pub mod fields;
pub mod repeaters;
pub mod result;
pub mod schema;
pub mod structure;
pub mod template;

#[cfg(test)]
mod tests;

pub use analyzer::BlockAnalyzer;
pub use classes::CssClassSet;
pub use family::{TemplateFamily, TemplateFamilyClassifier};
pub use fields::{ContentField, ContentFieldExtractor, FieldType};
pub use repeaters::{RepeaterCandidate, RepeaterDetector};
pub use result::{
    BlockAnalysisResult, BlockId, BlockStore, NewBlockRecord, RawFragment, TypeSlugger, UserId,
    create_block,
};
pub use schema::{BlockSchema, FieldSchema, SchemaGenerator, SettingSchema};
pub use structure::{ParsedTree, StructureSummary};
pub use template::{BlockIcon, RenderTemplateGenerator};
