#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

//! Edit history: linear undo/redo over the field list.
//!
//! Every applied [`EditCommand`] is stored next to the inverse command that
//! exactly undoes it. The present list is an [`im::Vector`], so each state
//! is an independent value and nothing in `past` or `future` can observe a
//! later mutation.
//!
//! Rejected commands leave `present`, `past` and `future` untouched.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::collaborators::{FieldProposal, FieldSuggester, FormStore};
use crate::config::{Config, DEFAULT_MAX_FIELDS};
use crate::error::StructuralError;
use crate::field::{FieldId, FieldPatch, FieldSpec};
use crate::form::{FieldList, FormDefinition, FormId, FormStyle};
use crate::Result;

// ═══════════════════════════════════════════════════════════════════════════
// COMMANDS
// ═══════════════════════════════════════════════════════════════════════════

/// A described mutation of the field list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "args", rename_all = "snake_case")]
pub enum EditCommand {
    /// Append a field
    AddField(FieldSpec),
    /// Insert a field at a position (`index == len` appends)
    InsertField { index: usize, spec: FieldSpec },
    /// Remove a field by id
    RemoveField(FieldId),
    /// Patch a field in place
    UpdateField { id: FieldId, patch: FieldPatch },
    /// Remove the field at `from` and reinsert it at `to`
    MoveField { from: usize, to: usize },
    /// Insert a copy of `id` directly after it, under `new_id`
    DuplicateField { id: FieldId, new_id: FieldId },
}

impl EditCommand {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddField(_) => "add_field",
            Self::InsertField { .. } => "insert_field",
            Self::RemoveField(_) => "remove_field",
            Self::UpdateField { .. } => "update_field",
            Self::MoveField { .. } => "move_field",
            Self::DuplicateField { .. } => "duplicate_field",
        }
    }

    /// Apply to `fields`, returning the new list and the command that
    /// reverts it. `max_fields` caps growth; `None` skips the cap.
    ///
    /// # Errors
    ///
    /// Returns a [`StructuralError`] when the command does not fit `fields`.
    pub fn apply_to(
        &self,
        fields: &FieldList,
        max_fields: Option<usize>,
    ) -> std::result::Result<(FieldList, Self), StructuralError> {
        match self {
            Self::AddField(spec) => insert_at(fields, fields.len(), spec, max_fields),
            Self::InsertField { index, spec } => insert_at(fields, *index, spec, max_fields),
            Self::RemoveField(id) => {
                let index = position_of(fields, id)?;
                let mut next = fields.clone();
                let spec = next.remove(index);
                Ok((next, Self::InsertField { index, spec }))
            }
            Self::UpdateField { id, patch } => {
                if patch.is_empty() {
                    return Err(StructuralError::EmptyPatch(id.clone()));
                }
                let index = position_of(fields, id)?;
                let current = &fields[index];
                let inverse = patch.inverse_for(current);
                let next = fields.update(index, patch.apply(current));
                Ok((
                    next,
                    Self::UpdateField {
                        id: id.clone(),
                        patch: inverse,
                    },
                ))
            }
            Self::MoveField { from, to } => {
                let len = fields.len();
                for &index in [from, to] {
                    if index >= len {
                        return Err(StructuralError::IndexOutOfRange { index, len });
                    }
                }
                let mut next = fields.clone();
                let moved = next.remove(*from);
                next.insert(*to, moved);
                Ok((next, Self::MoveField { from: *to, to: *from }))
            }
            Self::DuplicateField { id, new_id } => {
                let index = position_of(fields, id)?;
                let copy = FieldSpec {
                    id: new_id.clone(),
                    ..fields[index].clone()
                };
                insert_at(fields, index.saturating_add(1), &copy, max_fields)
            }
        }
    }
}

fn position_of(fields: &FieldList, id: &FieldId) -> std::result::Result<usize, StructuralError> {
    fields
        .iter()
        .position(|field| &field.id == id)
        .ok_or_else(|| StructuralError::UnknownField(id.clone()))
}

fn insert_at(
    fields: &FieldList,
    index: usize,
    spec: &FieldSpec,
    max_fields: Option<usize>,
) -> std::result::Result<(FieldList, EditCommand), StructuralError> {
    let len = fields.len();
    if index > len {
        return Err(StructuralError::IndexOutOfRange { index, len });
    }
    if fields.iter().any(|field| field.id == spec.id) {
        return Err(StructuralError::DuplicateField(spec.id.clone()));
    }
    if let Some(limit) = max_fields.filter(|&limit| len >= limit) {
        return Err(StructuralError::TooManyFields { limit });
    }
    let mut next = fields.clone();
    next.insert(index, spec.clone());
    Ok((next, EditCommand::RemoveField(spec.id.clone())))
}

// ═══════════════════════════════════════════════════════════════════════════
// HISTORY
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    command: EditCommand,
    inverse: EditCommand,
}

/// Linear undo/redo history over a field list.
#[derive(Debug, Clone)]
pub struct EditHistory {
    present: FieldList,
    past: Vector<Entry>,
    future: Vec<Entry>,
    limit: Option<usize>,
    max_fields: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(FieldList::new())
    }
}

impl EditHistory {
    /// Start from `initial` with no history, unbounded depth.
    #[must_use]
    pub fn new(initial: FieldList) -> Self {
        Self {
            present: initial,
            past: Vector::new(),
            future: Vec::new(),
            limit: None,
            max_fields: DEFAULT_MAX_FIELDS,
        }
    }

    /// Keep at most `limit` undo entries, dropping the oldest.
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self.trim();
        self
    }

    /// Cap the number of fields add/insert/duplicate may grow the list to.
    #[must_use]
    pub const fn with_max_fields(mut self, max_fields: usize) -> Self {
        self.max_fields = max_fields;
        self
    }

    /// Current field list.
    #[must_use]
    pub const fn present(&self) -> &FieldList {
        &self.present
    }

    /// Whether [`EditHistory::undo`] would change anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether [`EditHistory::redo`] would change anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undoable commands.
    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.past.len()
    }

    /// Number of redoable commands.
    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.future.len()
    }

    /// Apply a command and make it the newest undo entry. Any redo entries
    /// are discarded.
    ///
    /// # Errors
    ///
    /// Returns a structural error, leaving history untouched, when the
    /// command does not fit the present list.
    pub fn apply(&mut self, command: EditCommand) -> Result<FieldList> {
        let (next, inverse) = command
            .apply_to(&self.present, Some(self.max_fields))
            .map_err(|e| {
                tracing::warn!(command = command.name(), "rejected edit: {e}");
                e
            })?;

        tracing::debug!(command = command.name(), fields = next.len(), "applied edit");
        self.present = next;
        self.past.push_back(Entry { command, inverse });
        self.future.clear();
        self.trim();
        Ok(self.present.clone())
    }

    /// Revert the newest command. No-op when there is nothing to undo.
    pub fn undo(&mut self) -> FieldList {
        if let Some(entry) = self.past.pop_back() {
            match entry.inverse.apply_to(&self.present, None) {
                Ok((previous, _)) => {
                    tracing::debug!(command = entry.command.name(), "undid edit");
                    self.present = previous;
                    self.future.push(entry);
                }
                Err(e) => {
                    tracing::error!(command = entry.command.name(), "undo failed: {e}");
                    self.past.push_back(entry);
                }
            }
        }
        self.present.clone()
    }

    /// Reapply the newest undone command. No-op when there is nothing to redo.
    pub fn redo(&mut self) -> FieldList {
        if let Some(entry) = self.future.pop() {
            match entry.command.apply_to(&self.present, None) {
                Ok((next, _)) => {
                    tracing::debug!(command = entry.command.name(), "redid edit");
                    self.present = next;
                    self.past.push_back(entry);
                }
                Err(e) => {
                    tracing::error!(command = entry.command.name(), "redo failed: {e}");
                    self.future.push(entry);
                }
            }
        }
        self.present.clone()
    }

    /// Drop all undo and redo entries, keeping the present list.
    pub fn clear(&mut self) {
        self.past = Vector::new();
        self.future.clear();
    }

    fn trim(&mut self) {
        if let Some(limit) = self.limit {
            while self.past.len() > limit {
                self.past.pop_front();
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// EDIT SESSION
// ═══════════════════════════════════════════════════════════════════════════

/// One author editing one form.
#[derive(Debug, Clone)]
pub struct EditSession {
    id: FormId,
    title: String,
    description: String,
    style: FormStyle,
    history: EditHistory,
}

impl EditSession {
    /// Open a form for editing with default limits.
    #[must_use]
    pub fn new(definition: FormDefinition) -> Self {
        Self::with_history(definition, |history| history)
    }

    /// Open a form for editing with limits from `config`.
    #[must_use]
    pub fn with_config(definition: FormDefinition, config: &Config) -> Self {
        Self::with_history(definition, |history| {
            history
                .with_limit(config.history.limit)
                .with_max_fields(config.forms.max_fields)
        })
    }

    fn with_history(
        definition: FormDefinition,
        configure: impl FnOnce(EditHistory) -> EditHistory,
    ) -> Self {
        let FormDefinition {
            id,
            title,
            description,
            elements,
            style,
        } = definition;
        Self {
            id,
            title,
            description,
            style,
            history: configure(EditHistory::new(elements)),
        }
    }

    /// Id of the form being edited.
    #[must_use]
    pub const fn id(&self) -> &FormId {
        &self.id
    }

    /// Underlying history.
    #[must_use]
    pub const fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Current field list.
    #[must_use]
    pub const fn fields(&self) -> &FieldList {
        self.history.present()
    }

    /// Apply an edit command.
    ///
    /// # Errors
    ///
    /// See [`EditHistory::apply`].
    pub fn apply(&mut self, command: EditCommand) -> Result<FieldList> {
        self.history.apply(command)
    }

    /// Undo the newest edit.
    pub fn undo(&mut self) -> FieldList {
        self.history.undo()
    }

    /// Redo the newest undone edit.
    pub fn redo(&mut self) -> FieldList {
        self.history.redo()
    }

    /// Whether there is anything to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether there is anything to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Rename the form. Metadata is not part of undo history.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replace the form description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Replace the form-wide style hints.
    pub fn set_style(&mut self, style: FormStyle) {
        self.style = style;
    }

    /// Add suggested fields, one undoable `AddField` each, under fresh ids.
    ///
    /// Stops at the first rejected proposal; fields added before it stay.
    ///
    /// # Errors
    ///
    /// Structural errors from [`EditHistory::apply`], typically
    /// `TooManyFields`.
    pub fn accept_suggestions<I>(&mut self, proposals: I) -> Result<Vec<FieldId>>
    where
        I: IntoIterator<Item = FieldProposal>,
    {
        proposals
            .into_iter()
            .map(|proposal| {
                let field = proposal.into_field();
                let id = field.id.clone();
                self.history.apply(EditCommand::AddField(field)).map(|_| id)
            })
            .collect()
    }

    /// Ask `suggester` for fields and accept all of them.
    ///
    /// # Errors
    ///
    /// Collaborator errors as reported, or structural errors from
    /// [`EditSession::accept_suggestions`].
    pub async fn suggest(
        &mut self,
        suggester: &dyn FieldSuggester,
        prompt: &str,
    ) -> Result<Vec<FieldId>> {
        let proposals = suggester.suggest_fields(prompt).await.map_err(|e| {
            tracing::warn!("field suggestion failed: {e}");
            e
        })?;
        self.accept_suggestions(proposals)
    }

    /// Snapshot of the form as currently edited.
    #[must_use]
    pub fn definition(&self) -> FormDefinition {
        FormDefinition {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            elements: self.history.present().clone(),
            style: self.style.clone(),
        }
    }

    /// Persist the current definition. The session adopts whatever id the
    /// store assigns.
    ///
    /// # Errors
    ///
    /// Collaborator errors as reported by the store.
    pub async fn save(&mut self, store: &dyn FormStore) -> Result<FormId> {
        let id = store.save_form(&self.definition()).await.map_err(|e| {
            tracing::warn!(form = %self.id, "saving form failed: {e}");
            e
        })?;
        tracing::info!(form = %id, fields = self.fields().len(), "form saved");
        self.id = id.clone();
        Ok(id)
    }
}
