use std::collections::HashMap;

use time::OffsetDateTime;
use tracing::warn;

use crate::error::{ConfigError, FormStateError, SubmitError, ValidationError};
use crate::schema::{
    Answer, EMAIL_FIELD_ID, FormSchema, NAME_FIELD_ID, NoticeRecord, Submission,
};
use crate::store::SubmissionStore;

/// Transient state for the single form that may be open at a time.
#[derive(Debug)]
struct OpenForm {
    notice_id: String,
    schema: FormSchema,
    values: HashMap<String, String>, // field id -> current input
}

impl OpenForm {
    fn value(&self, field_id: &str) -> &str {
        self.values.get(field_id).map(String::as_str).unwrap_or("")
    }
}

/// Per-session interaction state machine for the notice board.
///
/// At most one notice's form is open at any moment; `open` is the single
/// assignment point for that invariant. Submitted state is tracked per
/// notice by the owned [`SubmissionStore`]. Every transition runs
/// synchronously in response to one user action.
#[derive(Debug, Default)]
pub struct FormController {
    open: Option<OpenForm>,
    store: SubmissionStore,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `notice`'s form, implicitly closing any other open form and
    /// discarding its unsubmitted edits. Reopening an already-submitted
    /// notice is allowed; the store blocks a second submit.
    ///
    /// A notice that is not form-enabled, or that carries a missing or
    /// invalid schema, is a defect in the content feed. It is reported here
    /// and leaves the rest of the board untouched.
    pub fn open_form(&mut self, notice: &NoticeRecord) -> Result<(), ConfigError> {
        let schema = notice
            .form_schema()
            .and_then(|schema| schema.validate().map(|()| schema));
        let schema = match schema {
            Ok(schema) => schema,
            Err(err) => {
                warn!(notice_id = %notice.id, error = %err, "refusing to open malformed form");
                return Err(err);
            }
        };
        self.open = Some(OpenForm {
            notice_id: notice.id.clone(),
            schema: schema.clone(),
            values: HashMap::new(),
        });
        Ok(())
    }

    /// Records a transient value for `field_id` on the open form. No
    /// validation happens here; users are not penalized mid-typing.
    pub fn edit_field(&mut self, field_id: &str, value: &str) -> Result<(), FormStateError> {
        let form = self.open.as_mut().ok_or(FormStateError::NoOpenForm)?;
        form.values.insert(field_id.to_string(), value.to_string());
        Ok(())
    }

    /// Validates the open form and commits it to the store. On a validation
    /// failure the form stays open for correction; on a store conflict the
    /// form is forced closed, since the store is authoritative.
    pub fn submit(&mut self, notice_id: &str) -> Result<(), SubmitError> {
        let form = match &self.open {
            Some(form) if form.notice_id == notice_id => form,
            Some(_) => {
                return Err(FormStateError::DifferentFormOpen {
                    notice_id: notice_id.to_string(),
                }
                .into());
            }
            None => return Err(FormStateError::NoOpenForm.into()),
        };
        validate(form)?;
        let submission = build_submission(form);
        match self.store.record_submission(submission) {
            Ok(()) => {
                self.open = None;
                Ok(())
            }
            Err(conflict) => {
                self.open = None;
                Err(conflict.into())
            }
        }
    }

    /// Discards the open form's transient edits. Nothing records that a
    /// cancellation happened.
    pub fn cancel(&mut self, notice_id: &str) -> Result<(), FormStateError> {
        match &self.open {
            Some(form) if form.notice_id == notice_id => {
                self.open = None;
                Ok(())
            }
            Some(_) => Err(FormStateError::DifferentFormOpen {
                notice_id: notice_id.to_string(),
            }),
            None => Err(FormStateError::NoOpenForm),
        }
    }

    pub fn is_open(&self, notice_id: &str) -> bool {
        self.open
            .as_ref()
            .is_some_and(|form| form.notice_id == notice_id)
    }

    pub fn open_notice_id(&self) -> Option<&str> {
        self.open.as_ref().map(|form| form.notice_id.as_str())
    }

    /// Current transient value for a field of the open form, for
    /// controlled-input rendering. Absent when no form is open or the field
    /// has not been edited.
    pub fn field_value(&self, field_id: &str) -> Option<&str> {
        self.open
            .as_ref()
            .and_then(|form| form.values.get(field_id))
            .map(String::as_str)
    }

    pub fn has_submitted(&self, notice_id: &str) -> bool {
        self.store.has_submitted(notice_id)
    }

    pub fn submission_for(&self, notice_id: &str) -> Option<&Submission> {
        self.store.submission_for(notice_id)
    }

    pub fn store(&self) -> &SubmissionStore {
        &self.store
    }
}

/// Validation order: implicit name, implicit email, then each required
/// declared field in schema order. The first failure is returned.
fn validate(form: &OpenForm) -> Result<(), ValidationError> {
    for field in form.schema.effective_fields() {
        if !field.required || !form.value(&field.id).is_empty() {
            continue;
        }
        return Err(match field.id.as_str() {
            NAME_FIELD_ID => ValidationError::EmptyName,
            EMAIL_FIELD_ID => ValidationError::EmptyEmail,
            _ => ValidationError::EmptyRequiredField {
                field_id: field.id,
                label: field.label,
            },
        });
    }
    Ok(())
}

/// Answers are keyed by label and built by walking the declared fields in
/// schema order; unedited optional fields default to the empty string.
fn build_submission(form: &OpenForm) -> Submission {
    let answers = form
        .schema
        .fields()
        .iter()
        .map(|field| Answer {
            label: field.label.clone(),
            value: form.value(&field.id).to_string(),
        })
        .collect();
    Submission {
        id: next_submission_id(),
        notice_id: form.notice_id.clone(),
        name: form.value(NAME_FIELD_ID).to_string(),
        email: form.value(EMAIL_FIELD_ID).to_string(),
        answers,
    }
}

fn next_submission_id() -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!("s{millis}")
}
