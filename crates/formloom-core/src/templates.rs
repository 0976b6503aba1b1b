//! Built-in starting points for new forms.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::field::{create_field, FieldSpec, FieldType, ValidationRules};
use crate::form::FormDefinition;

/// A named starter form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Template {
    Blank,
    Contact,
    Feedback,
    Registration,
    Survey,
}

fn field(field_type: FieldType, label: &str, required: bool) -> FieldSpec {
    create_field(field_type)
        .with_label(label)
        .with_required(required)
}

impl Template {
    /// Title given to forms built from this template.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Blank => "Untitled form",
            Self::Contact => "Contact us",
            Self::Feedback => "Feedback",
            Self::Registration => "Event registration",
            Self::Survey => "Survey",
        }
    }

    /// Build a fresh form. Every call yields new form and field ids.
    #[must_use]
    pub fn build(self) -> FormDefinition {
        let form = FormDefinition::new(self.title());
        match self {
            Self::Blank => form,
            Self::Contact => form
                .with_description("We usually reply within two working days.")
                .with_elements([
                    field(FieldType::Text, "Name", true),
                    field(FieldType::Email, "Email", true),
                    field(FieldType::Phone, "Phone", false),
                    field(FieldType::Textarea, "Message", true)
                        .with_validation(ValidationRules::length(Some(10), Some(2000))),
                    create_field(FieldType::Thankyou).with_label("Thanks, we'll be in touch."),
                ]),
            Self::Feedback => form.with_elements([
                field(FieldType::Rating, "How would you rate us?", true),
                field(FieldType::Radio, "Would you recommend us?", true)
                    .with_options(["Yes", "Maybe", "No"]),
                field(FieldType::Textarea, "What could we do better?", false),
                create_field(FieldType::Thankyou),
            ]),
            Self::Registration => form.with_elements([
                create_field(FieldType::Heading).with_label("About you"),
                field(FieldType::Text, "Full name", true),
                field(FieldType::Email, "Email", true),
                create_field(FieldType::Pagebreak),
                create_field(FieldType::Heading).with_label("Your visit"),
                field(FieldType::Date, "Arrival date", true),
                field(FieldType::Select, "Ticket", true)
                    .with_options(["Standard", "Student", "Supporter"]),
                field(FieldType::Checkbox, "Workshops", false)
                    .with_options(["Morning", "Afternoon", "Evening"]),
                field(FieldType::Toggle, "Subscribe to updates", false),
                create_field(FieldType::Thankyou).with_label("You're registered!"),
            ]),
            Self::Survey => form.with_elements([
                field(FieldType::Radio, "How often do you use the product?", true)
                    .with_options(["Daily", "Weekly", "Rarely"]),
                field(FieldType::Range, "How likely are you to continue?", false),
                create_field(FieldType::Pagebreak),
                field(FieldType::Tags, "Which features matter most?", false),
                field(FieldType::Textarea, "Anything else?", false),
                create_field(FieldType::Thankyou),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;
    use crate::pages::segment;

    #[test]
    fn test_template_names_parse() {
        assert_eq!(Template::from_str("survey"), Ok(Template::Survey));
        assert_eq!(Template::Registration.to_string(), "registration");
        assert!(Template::from_str("quiz").is_err());
    }

    #[test]
    fn test_templates_have_unique_fresh_ids() {
        let a = Template::Contact.build();
        let b = Template::Contact.build();
        assert_ne!(a.id, b.id);
        assert_ne!(a.elements[0].id, b.elements[0].id);

        for template in Template::iter() {
            let form = template.build();
            let mut ids: Vec<_> = form.elements.iter().map(|f| f.id.clone()).collect();
            let total = ids.len();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), total, "{template} reuses an id");
        }
    }

    #[test]
    fn test_templates_pass_shape_lint() {
        for template in Template::iter() {
            let form = template.build();
            assert!(
                form.elements.iter().all(|f| f.check_shape().is_empty()),
                "{template} has shape problems"
            );
        }
    }

    #[test]
    fn test_registration_spans_two_pages() {
        let pagination = segment(&Template::Registration.build().elements);
        assert_eq!(pagination.page_count(), 2);
        assert!(pagination.thank_you.is_some());
    }
}
