//! Page segmentation.
//!
//! A single pass over the field list: `pagebreak` closes the current page,
//! `thankyou` is pulled out as the terminal screen (first one wins, later
//! ones are dropped silently) and empty pages are never produced.

use im::Vector;
use serde::Serialize;

use crate::field::{FieldSpec, FieldType};

/// A contiguous run of fields between page breaks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub fields: Vector<FieldSpec>,
}

impl Page {
    /// Fields that take answers on this page.
    pub fn input_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.takes_value())
    }

    /// Number of elements on the page, layout included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false for pages produced by [`segment`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Result of segmenting a field list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Pagination {
    pub pages: Vec<Page>,
    pub thank_you: Option<FieldSpec>,
}

impl Pagination {
    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page at `index`, if any.
    #[must_use]
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }
}

/// Split an ordered field list into pages.
#[must_use]
pub fn segment<'a, I>(fields: I) -> Pagination
where
    I: IntoIterator<Item = &'a FieldSpec>,
{
    let (mut pages, current, thank_you) = fields.into_iter().fold(
        (Vec::new(), Vector::new(), None),
        |(mut pages, mut current, thank_you): (Vec<Page>, Vector<FieldSpec>, Option<FieldSpec>),
         field| {
            match field.field_type {
                FieldType::Pagebreak => {
                    if !current.is_empty() {
                        pages.push(Page { fields: current });
                        current = Vector::new();
                    }
                    (pages, current, thank_you)
                }
                FieldType::Thankyou => (pages, current, thank_you.or_else(|| Some(field.clone()))),
                _ => {
                    current.push_back(field.clone());
                    (pages, current, thank_you)
                }
            }
        },
    );

    if !current.is_empty() {
        pages.push(Page { fields: current });
    }

    Pagination { pages, thank_you }
}
