use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use super::classes::CssClassSet;
use super::family::{TemplateFamily, section_types};
use super::fields::{ContentField, FieldType};
use super::repeaters::RepeaterCandidate;

pub const CONTAINER_WIDTHS: [&str; 3] = ["full", "container", "narrow"];

/// Editing form for one content entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldSchema {
    Text {
        label: String,
        default: String,
    },
    Textarea {
        label: String,
        default: String,
    },
    Image {
        label: String,
        default: String,
        alt: String,
    },
    Link {
        label: String,
        default: String,
    },
    Code {
        label: String,
        language: String,
        required: bool,
        default: String,
    },
    Repeater {
        label: String,
        default: Vec<serde_json::Value>,
        fields: Vec<RepeaterItemField>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeaterItemField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SettingSchema {
    Text {
        name: String,
        label: String,
        default: String,
        readonly: bool,
    },
    Select {
        name: String,
        label: String,
        options: Vec<String>,
        default: String,
        readonly: bool,
    },
}

impl SettingSchema {
    pub fn name(&self) -> &str {
        match self {
            SettingSchema::Text { name, .. } | SettingSchema::Select { name, .. } => name,
        }
    }
}

/// Content entries keyed by field name, in generation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaContent(Vec<(String, FieldSchema)>);

impl SchemaContent {
    /// Inserts or replaces an entry; a replaced entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, field: FieldSchema) {
        let name = name.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = field,
            None => self.0.push((name, field)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.0.iter().find(|(key, _)| key == name).map(|(_, f)| f)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SchemaContent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, field) in &self.0 {
            map.serialize_entry(key, field)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockSchema {
    pub content: SchemaContent,
    pub settings: Vec<SettingSchema>,
}

pub struct SchemaGenerator;

impl SchemaGenerator {
    pub fn generate(
        &self,
        family: &TemplateFamily,
        fragment: &str,
        classes: &CssClassSet,
        fields: &[ContentField],
        repeaters: &[RepeaterCandidate],
    ) -> BlockSchema {
        match family {
            TemplateFamily::Passthrough { section_type } => {
                Self::passthrough(section_type, fragment, classes)
            }
            TemplateFamily::Generic => Self::generic(fields, repeaters),
        }
    }

    fn passthrough(section_type: &str, fragment: &str, classes: &CssClassSet) -> BlockSchema {
        let mut content = SchemaContent::default();
        content.insert(
            "html",
            FieldSchema::Code {
                label: "HTML".to_string(),
                language: "html".to_string(),
                required: true,
                default: fragment.to_string(),
            },
        );

        let settings = vec![
            SettingSchema::Select {
                name: "section_type".to_string(),
                label: "Section type".to_string(),
                options: section_types().into_iter().map(str::to_string).collect(),
                default: section_type.to_string(),
                readonly: true,
            },
            SettingSchema::Text {
                name: "original_classes".to_string(),
                label: "Original classes".to_string(),
                default: classes.joined(),
                readonly: true,
            },
        ];

        BlockSchema { content, settings }
    }

    fn generic(fields: &[ContentField], repeaters: &[RepeaterCandidate]) -> BlockSchema {
        let mut content = SchemaContent::default();

        for field in fields {
            let label = field.label.clone();
            let default = field.current_value.clone();
            let schema = match field.field_type {
                FieldType::Text => FieldSchema::Text { label, default },
                FieldType::Textarea => FieldSchema::Textarea { label, default },
                FieldType::Image => FieldSchema::Image {
                    label,
                    default,
                    alt: field.alt.clone().unwrap_or_default(),
                },
                FieldType::Link => FieldSchema::Link { label, default },
            };
            content.insert(field.name.clone(), schema);

            if field.field_type == FieldType::Link {
                content.insert(
                    format!("{}_href", field.name),
                    FieldSchema::Text {
                        label: format!("{} URL", field.label),
                        default: field.href.clone().unwrap_or_default(),
                    },
                );
            }
        }

        for repeater in repeaters {
            content.insert(
                repeater.name.clone(),
                FieldSchema::Repeater {
                    label: repeater.name.clone(),
                    default: Vec::new(),
                    fields: placeholder_item_fields(),
                },
            );
        }

        let settings = vec![
            SettingSchema::Text {
                name: "cssClass".to_string(),
                label: "CSS class".to_string(),
                default: String::new(),
                readonly: false,
            },
            SettingSchema::Select {
                name: "containerWidth".to_string(),
                label: "Container width".to_string(),
                options: CONTAINER_WIDTHS.iter().map(|w| w.to_string()).collect(),
                default: CONTAINER_WIDTHS[0].to_string(),
                readonly: false,
            },
        ];

        BlockSchema { content, settings }
    }
}

/// Repeater items always get the same two placeholder fields; the sample
/// markup is not inspected.
fn placeholder_item_fields() -> Vec<RepeaterItemField> {
    vec![
        RepeaterItemField {
            name: "text".to_string(),
            field_type: FieldType::Text,
            label: "Text".to_string(),
        },
        RepeaterItemField {
            name: "icon".to_string(),
            field_type: FieldType::Text,
            label: "Icon".to_string(),
        },
    ]
}
