//! End-to-end fill-session scenarios, including the storage handoff.

#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use formloom_core::{
    CollaboratorError, Error, FieldError, FieldId, FieldSpec, FieldType, FillSession, FillState,
    FormDefinition, FormId, FormStore, Responses, Result, Step, SubmissionId, SubmitOutcome,
    Value,
};

// ═══════════════════════════════════════════════════════════════════════════
// FIXTURES
// ═══════════════════════════════════════════════════════════════════════════

fn signup_form() -> FormDefinition {
    FormDefinition::new("Signup").with_elements([
        FieldSpec::new(FieldId::new("field1"), FieldType::Text).with_required(true),
        FieldSpec::new(FieldId::new("pb"), FieldType::Pagebreak),
        FieldSpec::new(FieldId::new("field2"), FieldType::Email).with_required(true),
    ])
}

/// In-memory store that can be told to fail.
#[derive(Default)]
struct MemoryStore {
    failing: AtomicBool,
    forms: Mutex<Vec<FormDefinition>>,
    submissions: Mutex<Vec<(FormId, Responses)>>,
}

impl MemoryStore {
    fn failing() -> Self {
        let store = Self::default();
        store.failing.store(true, Ordering::SeqCst);
        store
    }

    fn recover(&self) {
        self.failing.store(false, Ordering::SeqCst);
    }

    fn recorded(&self) -> Vec<(FormId, Responses)> {
        self.submissions
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl FormStore for MemoryStore {
    async fn save_form(&self, definition: &FormDefinition) -> Result<FormId> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::persistence("disk full"));
        }
        self.forms
            .lock()
            .map_err(|e| Error::persistence(e.to_string()))?
            .push(definition.clone());
        Ok(definition.id.clone())
    }

    async fn load_form(&self, id: &FormId) -> Result<FormDefinition> {
        self.forms
            .lock()
            .map_err(|e| Error::persistence(e.to_string()))?
            .iter()
            .find(|form| &form.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("form {id}")))
    }

    async fn record_submission(
        &self,
        form_id: &FormId,
        responses: &Responses,
    ) -> Result<SubmissionId> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::persistence("connection reset"));
        }
        self.submissions
            .lock()
            .map_err(|e| Error::persistence(e.to_string()))?
            .push((form_id.clone(), responses.clone()));
        Ok(SubmissionId::new("sub_1"))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SCENARIOS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn given_two_page_signup_when_filled_then_submitted_with_both_answers() -> Result<()> {
    let field1 = FieldId::new("field1");
    let field2 = FieldId::new("field2");
    let mut session = FillSession::new(&signup_form());

    // Page 0: empty answer blocks
    session.set_value(&field1, Value::text(""))?;
    let step = session.advance()?;
    assert_eq!(
        step,
        Step::Blocked(std::iter::once((field1.clone(), FieldError::Required)).collect())
    );
    assert_eq!(session.state(), FillState::Filling { page: 0 });

    // Page 0: valid answer advances
    session.set_value(&field1, Value::text("Alice"))?;
    assert_eq!(session.advance()?, Step::Moved { page: 1 });
    assert!(session.is_last_page());

    // Page 1: bad email rejected on submit
    session.set_value(&field2, Value::text("not-an-email"))?;
    match session.submit()? {
        SubmitOutcome::Rejected(errors) => {
            assert_eq!(errors.get(&field2).map(FieldError::reason), Some("format"));
        }
        SubmitOutcome::Submitted(_) => return Err(Error::invalid_transition("accepted bad email")),
    }
    assert_eq!(session.state(), FillState::Filling { page: 1 });

    // Page 1: good email submits
    session.set_value(&field2, Value::text("a@b.com"))?;
    let SubmitOutcome::Submitted(submission) = session.submit()? else {
        return Err(Error::invalid_transition("valid submission rejected"));
    };
    assert_eq!(session.state(), FillState::Submitted);

    let expected: Responses = [
        (field1, Value::text("Alice")),
        (field2, Value::text("a@b.com")),
    ]
    .into_iter()
    .collect();
    assert_eq!(submission.responses, expected);
    Ok(())
}

#[test]
fn given_layout_and_retreat_when_submitted_then_only_input_answers_kept() -> Result<()> {
    let form = FormDefinition::new("Mixed").with_elements([
        FieldSpec::new(FieldId::new("intro"), FieldType::Heading),
        FieldSpec::new(FieldId::new("name"), FieldType::Text),
        FieldSpec::new(FieldId::new("pb"), FieldType::Pagebreak),
        FieldSpec::new(FieldId::new("agree"), FieldType::Toggle).with_required(true),
        FieldSpec::new(FieldId::new("ty"), FieldType::Thankyou),
    ]);
    let mut session = FillSession::new(&form);
    session.set_value(&FieldId::new("name"), Value::text("Bo"))?;
    session.advance()?;
    session.retreat()?;
    session.set_value(&FieldId::new("name"), Value::text("Bob"))?;
    session.advance()?;
    session.set_value(&FieldId::new("agree"), Value::Bool(false))?;

    let SubmitOutcome::Submitted(submission) = session.submit()? else {
        return Err(Error::invalid_transition("false toggle should count as an answer"));
    };
    let keys: Vec<_> = submission.responses.keys().map(FieldId::as_str).collect();
    assert_eq!(keys, vec!["agree", "name"]);
    assert_eq!(
        session.thank_you().map(|f| f.id.as_str()),
        Some("ty")
    );
    Ok(())
}

#[tokio::test]
async fn given_store_when_submit_to_then_recorded() -> Result<()> {
    let store = MemoryStore::default();
    let form = signup_form();
    let mut session = FillSession::new(&form);
    session.set_value(&FieldId::new("field1"), Value::text("Alice"))?;
    session.advance()?;
    session.set_value(&FieldId::new("field2"), Value::text("a@b.com"))?;

    let SubmitOutcome::Submitted(submission) = session.submit_to(&store).await? else {
        return Err(Error::invalid_transition("valid submission rejected"));
    };
    assert_eq!(submission.id, SubmissionId::new("sub_1"));
    assert_eq!(store.recorded().len(), 1);
    assert_eq!(store.recorded()[0].0, form.id);
    Ok(())
}

#[tokio::test]
async fn given_failing_store_when_submit_to_then_session_kept_for_retry() -> Result<()> {
    let store = MemoryStore::failing();
    let mut session = FillSession::new(&signup_form());
    session.set_value(&FieldId::new("field1"), Value::text("Alice"))?;
    session.advance()?;
    session.set_value(&FieldId::new("field2"), Value::text("a@b.com"))?;

    let result = session.submit_to(&store).await;
    assert_eq!(
        result,
        Err(Error::Collaborator(CollaboratorError::Persistence(
            "connection reset".into()
        )))
    );
    assert_eq!(session.state(), FillState::Filling { page: 1 });
    assert_eq!(session.responses().len(), 2);
    assert!(store.recorded().is_empty());

    store.recover();
    assert!(matches!(
        session.submit_to(&store).await?,
        SubmitOutcome::Submitted(_)
    ));
    assert_eq!(store.recorded().len(), 1);
    Ok(())
}

#[tokio::test]
async fn given_invalid_last_page_when_submit_to_then_store_not_called() -> Result<()> {
    let store = MemoryStore::default();
    let form = FormDefinition::new("One")
        .with_elements([FieldSpec::new(FieldId::new("q"), FieldType::Email).with_required(true)]);
    let mut session = FillSession::new(&form);

    let outcome = session.submit_to(&store).await?;
    assert!(matches!(outcome, SubmitOutcome::Rejected(ref e) if e.len() == 1));
    assert!(store.recorded().is_empty());
    Ok(())
}

#[tokio::test]
async fn given_saved_form_when_loaded_then_fill_session_works() -> Result<()> {
    let store = MemoryStore::default();
    let id = store.save_form(&signup_form()).await?;
    let loaded = store.load_form(&id).await?;
    let session = FillSession::new(&loaded);
    assert_eq!(session.page_count(), 2);

    let missing = store.load_form(&FormId::new("nope")).await;
    assert!(matches!(missing, Err(ref e) if e.exit_code() == 3));
    Ok(())
}
