use serde::{Serialize, Serializer};

use super::classes::CssClassSet;
use super::family::TemplateFamily;
use super::fields::ContentField;
use super::repeaters::RepeaterCandidate;
use super::schema::BlockSchema;
use super::structure::StructureSummary;
use super::template::BlockIcon;
use crate::error::{AnalysisError, PersistError};
use crate::shop::ShopId;

pub type UserId = u64;
pub type BlockId = u64;

/// Category every generated block is filed under.
pub const BLOCK_CATEGORY: &str = "custom";

/// Input markup and the tenant it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawFragment {
    pub html: String,
    pub shop_id: Option<ShopId>,
}

/// Everything learned from one fragment. Built fresh per request and never
/// stored as is; see [`BlockAnalysisResult::to_record`].
#[derive(Debug, Clone, Serialize)]
pub struct BlockAnalysisResult {
    pub fragment: RawFragment,
    pub structure: Option<StructureSummary>,
    pub classes: CssClassSet,
    pub repeaters: Vec<RepeaterCandidate>,
    pub fields: Vec<ContentField>,
    pub family: Option<TemplateFamily>,
    pub schema: Option<BlockSchema>,
    pub render_template: String,
    pub icon: Option<BlockIcon>,
    #[serde(serialize_with = "serialize_errors")]
    pub errors: Vec<AnalysisError>,
}

fn serialize_errors<S: Serializer>(errors: &[AnalysisError], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(errors.iter().map(ToString::to_string))
}

impl BlockAnalysisResult {
    /// A result carrying only the fragment and the error that stopped analysis.
    pub fn failed(fragment: RawFragment, error: AnalysisError) -> Self {
        Self {
            fragment,
            structure: None,
            classes: CssClassSet::new(),
            repeaters: Vec::new(),
            fields: Vec::new(),
            family: None,
            schema: None,
            render_template: String::new(),
            icon: None,
            errors: vec![error],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && !self.render_template.is_empty()
    }

    pub fn description(&self) -> String {
        match &self.family {
            Some(TemplateFamily::Passthrough { section_type }) => {
                format!("Imported {section_type} section, original markup preserved")
            }
            _ => format!(
                "Generated from HTML: {} fields, {} repeaters",
                self.fields.len(),
                self.repeaters.len()
            ),
        }
    }

    /// Builds the payload for the block store. Only valid analyses convert.
    pub fn to_record(
        &self,
        name: &str,
        slugger: &dyn TypeSlugger,
        created_by: Option<UserId>,
    ) -> Result<NewBlockRecord, PersistError> {
        if !self.is_valid() {
            let reason = self
                .errors
                .first()
                .map_or_else(|| "empty render template".to_string(), ToString::to_string);
            return Err(PersistError::InvalidAnalysis(reason));
        }

        Ok(NewBlockRecord {
            shop_id: self.fragment.shop_id,
            type_slug: slugger.slug(name, self.fragment.shop_id),
            name: name.to_string(),
            category: BLOCK_CATEGORY.to_string(),
            icon: self.icon.unwrap_or(BlockIcon::Square),
            description: self.description(),
            schema: self.schema.clone().unwrap_or_default(),
            render_template: self.render_template.clone(),
            css_classes: self.classes.as_slice().to_vec(),
            sample_html: self.fragment.html.clone(),
            is_active: true,
            created_by,
        })
    }
}

/// Durable block record as handed to the block store.
#[derive(Debug, Clone, Serialize)]
pub struct NewBlockRecord {
    pub shop_id: Option<ShopId>,
    pub type_slug: String,
    pub name: String,
    pub category: String,
    pub icon: BlockIcon,
    pub description: String,
    pub schema: BlockSchema,
    pub render_template: String,
    pub css_classes: Vec<String>,
    pub sample_html: String,
    pub is_active: bool,
    pub created_by: Option<UserId>,
}

/// Derives the unique block type slug for a display name within a shop.
pub trait TypeSlugger {
    fn slug(&self, name: &str, shop_id: Option<ShopId>) -> String;
}

/// Persists block records.
pub trait BlockStore {
    fn create_block(&self, record: NewBlockRecord) -> Result<BlockId, PersistError>;
}

/// Converts a valid analysis and hands it to the store.
pub fn create_block(
    result: &BlockAnalysisResult,
    name: &str,
    created_by: Option<UserId>,
    slugger: &dyn TypeSlugger,
    store: &dyn BlockStore,
) -> Result<BlockId, PersistError> {
    let record = result.to_record(name, slugger, created_by)?;
    log::debug!("creating block `{}` for shop {:?}", record.type_slug, record.shop_id);
    store.create_block(record)
}
