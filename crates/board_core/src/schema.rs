use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ConfigError;

/// Field id reserved for the implicit name input collected on every form.
pub const NAME_FIELD_ID: &str = "name";
/// Field id reserved for the implicit email input collected on every form.
pub const EMAIL_FIELD_ID: &str = "email";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FieldSchema {
    pub id: String,    // stable identifier, unique within one form
    pub label: String, // display text; doubles as the answer key
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
}

// Field identity is the id alone; label and type are presentation detail.
impl PartialEq for FieldSchema {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FieldSchema {}

/// The fixed name/email prefix prepended to every form's effective field
/// list. Both are always required, regardless of the declared schema.
pub fn implicit_fields() -> [FieldSchema; 2] {
    [
        FieldSchema {
            id: NAME_FIELD_ID.to_string(),
            label: "Name".to_string(),
            field_type: FieldType::Text,
            required: true,
        },
        FieldSchema {
            id: EMAIL_FIELD_ID.to_string(),
            label: "Email".to_string(),
            field_type: FieldType::Email,
            required: true,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FormSchema {
    pub fields: Vec<FieldSchema>, // order is display order and answer-key order
}

impl FormSchema {
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Implicit name/email fields followed by the declared fields, in the
    /// order they are rendered and validated.
    pub fn effective_fields(&self) -> Vec<FieldSchema> {
        let mut all = implicit_fields().to_vec();
        all.extend(self.fields.iter().cloned());
        all
    }

    /// Checks the declared fields against the schema invariants: non-empty
    /// id and label, unique ids, and no collision with the implicit
    /// name/email fields. A colliding field is never silently merged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for field in &self.fields {
            if field.id.is_empty() {
                return Err(ConfigError::EmptyFieldId);
            }
            if field.label.is_empty() {
                return Err(ConfigError::EmptyFieldLabel {
                    field_id: field.id.clone(),
                });
            }
            let reserved_id = field.id == NAME_FIELD_ID || field.id == EMAIL_FIELD_ID;
            let reserved_label = field.label.eq_ignore_ascii_case("name")
                || field.label.eq_ignore_ascii_case("email");
            if reserved_id || reserved_label {
                return Err(ConfigError::ReservedField {
                    field_id: field.id.clone(),
                });
            }
            if !seen.insert(field.id.as_str()) {
                return Err(ConfigError::DuplicateFieldId {
                    field_id: field.id.clone(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One content item on the board. Authored by the external content source
/// and read-only here; the engine never mutates a notice.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoticeRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub notice_type: String, // category tag, e.g. "Workshop", "Registration"
    pub priority: Priority,
    pub date: String, // ISO-8601 date from the content source
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub has_form: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<FormSchema>,
}

impl NoticeRecord {
    /// Schema for a form-enabled notice. A form-enabled notice with no
    /// attached schema is a defect in the content feed, not a user error.
    pub fn form_schema(&self) -> Result<&FormSchema, ConfigError> {
        if !self.has_form {
            return Err(ConfigError::NotFormEnabled {
                notice_id: self.id.clone(),
            });
        }
        self.form.as_ref().ok_or_else(|| ConfigError::MissingSchema {
            notice_id: self.id.clone(),
        })
    }

    /// A schema must be attached iff the notice is form-enabled, and an
    /// attached schema must itself validate.
    pub fn well_formed(&self) -> Result<(), ConfigError> {
        match (&self.form, self.has_form) {
            (Some(form), true) => form.validate(),
            (None, true) => Err(ConfigError::MissingSchema {
                notice_id: self.id.clone(),
            }),
            (Some(_), false) => Err(ConfigError::OrphanSchema {
                notice_id: self.id.clone(),
            }),
            (None, false) => Ok(()),
        }
    }
}

/// One entered value, keyed by the originating field's label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Answer {
    pub label: String,
    pub value: String,
}

/// The committed result of one successful form completion for one notice.
/// Answers appear in schema field order, one per declared field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String, // time-derived, e.g. "s1724932800000"
    pub notice_id: String,
    pub name: String,
    pub email: String,
    pub answers: Vec<Answer>,
}

impl Submission {
    pub fn answer(&self, label: &str) -> Option<&str> {
        self.answers
            .iter()
            .find(|answer| answer.label == label)
            .map(|answer| answer.value.as_str())
    }
}
