//! Tabular projection of submissions for export.
//!
//! Columns follow the form's current field order. Rendering the rows as CSV
//! or anything else is left to the caller.

use serde::Serialize;

use crate::field::FieldId;
use crate::form::{FormDefinition, FormSubmission};

/// One export column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub id: FieldId,
    pub label: String,
}

/// Response-bearing fields in display order.
#[must_use]
pub fn columns(form: &FormDefinition) -> Vec<Column> {
    form.input_fields()
        .map(|field| Column {
            id: field.id.clone(),
            label: field.label.clone(),
        })
        .collect()
}

/// One row per submission, one cell per column. Missing answers are empty
/// cells; answers to fields no longer on the form are dropped.
#[must_use]
pub fn project(form: &FormDefinition, submissions: &[FormSubmission]) -> Vec<Vec<String>> {
    let columns = columns(form);
    submissions
        .iter()
        .map(|submission| {
            columns
                .iter()
                .map(|column| {
                    submission
                        .responses
                        .get(&column.id)
                        .map(|value| value.to_cell())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldSpec, FieldType, Value};
    use crate::form::Responses;

    fn form() -> FormDefinition {
        FormDefinition::new("Order").with_elements([
            FieldSpec::new(FieldId::new("name"), FieldType::Text).with_label("Name"),
            FieldSpec::new(FieldId::new("pb"), FieldType::Pagebreak),
            FieldSpec::new(FieldId::new("toppings"), FieldType::Checkbox).with_label("Toppings"),
            FieldSpec::new(FieldId::new("ty"), FieldType::Thankyou),
        ])
    }

    #[test]
    fn test_columns_skip_layout() {
        let labels: Vec<_> = columns(&form()).into_iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["Name", "Toppings"]);
    }

    #[test]
    fn test_project_fills_missing_cells_and_joins_lists() {
        let form = form();
        let full = FormSubmission::new(
            form.id.clone(),
            Responses::new()
                .update(FieldId::new("name"), Value::text("Ada"))
                .update(FieldId::new("toppings"), Value::list(["Option 1", "Option 3"]))
                .update(FieldId::new("retired"), Value::text("ignored")),
        );
        let partial = FormSubmission::new(
            form.id.clone(),
            Responses::unit(FieldId::new("toppings"), Value::list(["Option 2"])),
        );

        let rows = project(&form, &[full, partial]);
        assert_eq!(
            rows,
            vec![
                vec!["Ada".to_string(), "Option 1, Option 3".to_string()],
                vec![String::new(), "Option 2".to_string()],
            ]
        );
    }
}
