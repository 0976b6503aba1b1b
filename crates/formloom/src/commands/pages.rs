//! `formloom pages`: page segmentation summary.

use formloom_core::{segment, FieldId, FieldSpec, FieldType, FormDefinition};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct FieldSummary {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub required: bool,
}

impl From<&FieldSpec> for FieldSummary {
    fn from(field: &FieldSpec) -> Self {
        Self {
            id: field.id.clone(),
            field_type: field.field_type,
            label: field.label.clone(),
            required: field.is_required(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PageSummary {
    pub index: usize,
    pub fields: Vec<FieldSummary>,
}

#[derive(Debug, Serialize)]
pub struct PagesReport {
    pub title: String,
    pub page_count: usize,
    pub pages: Vec<PageSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thank_you: Option<FieldSummary>,
    /// Advisory schema problems, one line each
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

pub fn run(form: &FormDefinition) -> PagesReport {
    let pagination = segment(&form.elements);
    let pages = pagination
        .pages
        .iter()
        .enumerate()
        .map(|(index, page)| PageSummary {
            index,
            fields: page.fields.iter().map(FieldSummary::from).collect(),
        })
        .collect();

    PagesReport {
        title: form.title.clone(),
        page_count: pagination.page_count(),
        pages,
        thank_you: pagination.thank_you.as_ref().map(FieldSummary::from),
        warnings: form.elements.iter().flat_map(FieldSpec::check_shape).collect(),
    }
}
