use thiserror::Error;

/// Defects in the notice data supplied by the content source. Fatal to the
/// one notice they concern; the rest of the board stays usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("notice `{notice_id}` is not form-enabled")]
    NotFormEnabled { notice_id: String },
    #[error("notice `{notice_id}` is form-enabled but carries no schema")]
    MissingSchema { notice_id: String },
    #[error("notice `{notice_id}` carries a schema but is not form-enabled")]
    OrphanSchema { notice_id: String },
    #[error("form field with empty id")]
    EmptyFieldId,
    #[error("form field `{field_id}` has an empty label")]
    EmptyFieldLabel { field_id: String },
    #[error("duplicate form field id `{field_id}`")]
    DuplicateFieldId { field_id: String },
    #[error("form field `{field_id}` collides with the implicit name/email fields")]
    ReservedField { field_id: String },
}

/// Recoverable input failures. The form stays open so the user can correct
/// the value and retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("required field `{field_id}` ({label}) must not be empty")]
    EmptyRequiredField { field_id: String, label: String },
}

/// A submission for the notice was already accepted in this session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("notice `{notice_id}` already has a submission in this session")]
pub struct AlreadySubmitted {
    pub notice_id: String,
}

/// A transition was attempted against a form that is not open.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormStateError {
    #[error("no form is open")]
    NoOpenForm,
    #[error("the open form does not belong to notice `{notice_id}`")]
    DifferentFormOpen { notice_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    State(#[from] FormStateError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Conflict(#[from] AlreadySubmitted),
}
