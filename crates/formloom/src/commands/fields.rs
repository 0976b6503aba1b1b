//! `formloom fields`: the field type catalogue.

use formloom_core::FieldType;
use serde::Serialize;
use strum::IntoEnumIterator;

#[derive(Debug, Serialize)]
pub struct FieldTypeInfo {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub layout: bool,
    pub choice: bool,
    pub options: bool,
    pub placeholder: bool,
}

pub fn run() -> Vec<FieldTypeInfo> {
    FieldType::iter()
        .map(|field_type| FieldTypeInfo {
            field_type,
            layout: field_type.is_layout(),
            choice: field_type.is_choice(),
            options: field_type.has_options(),
            placeholder: field_type.accepts_placeholder(),
        })
        .collect()
}
