//! Patient intake draft and field-level validation.
//!
//! # Responsibility
//! - Hold raw intake-form input for create/edit flows.
//! - Convert raw input into a typed `ValidatedDraft` before any dispatch.
//!
//! # Invariants
//! - Validation reports every failing field at once, never only the first.
//! - A `ValidatedDraft` can only be obtained through `PatientDraft::validate`.
//! - Attachment order follows selection order.

use crate::model::patient::{BloodGroup, Gender, MaritalStatus, Occupation, Patient};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Smallest age offered by the intake form.
pub const MIN_DRAFT_AGE: u32 = 1;
/// Largest age offered by the intake form.
pub const MAX_DRAFT_AGE: u32 = 100;
/// Minimum number of digits in a mobile number.
pub const MIN_MOBILE_DIGITS: usize = 10;

/// Intake form fields, named by their form keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    FirstName,
    LastName,
    Age,
    Gender,
    PatientId,
    Email,
    MobileNumber,
    MaritalStatus,
    Occupation,
    BloodGroup,
}

impl DraftField {
    /// Stable form key for the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::PatientId => "createId",
            Self::Email => "emailId",
            Self::MobileNumber => "mobileNumber",
            Self::MaritalStatus => "maritalStatus",
            Self::Occupation => "occupation",
            Self::BloodGroup => "bloodGroup",
        }
    }
}

/// One inline validation message bound to a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: DraftField,
    pub message: String,
}

/// Non-empty set of field errors produced by `PatientDraft::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftValidationErrors {
    errors: Vec<FieldError>,
}

impl DraftValidationErrors {
    /// All field errors in form order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Inline message for one field, if that field failed.
    pub fn message_for(&self, field: DraftField) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Display for DraftValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field.as_str(), error.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "invalid patient draft: {joined}")
    }
}

impl Error for DraftValidationErrors {}

/// Metadata of one file picked in the intake form.
///
/// File bytes are owned by the caller's upload path, not by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub size_bytes: u64,
    pub content_type: Option<String>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            size_bytes,
            content_type: None,
        }
    }
}

/// Raw intake-form input. Every text field is kept as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientDraft {
    pub first_name: String,
    pub last_name: String,
    pub age: String,
    pub gender: String,
    #[serde(rename = "createId")]
    pub patient_id: String,
    #[serde(rename = "emailId")]
    pub email: String,
    pub mobile_number: String,
    pub marital_status: String,
    pub occupation: String,
    pub blood_group: String,
    pub blood_pressure: String,
    pub sugar_levels: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub attachments: Vec<Attachment>,
}

impl PatientDraft {
    /// Pre-fills an edit draft from an existing record.
    ///
    /// Address parts come back as one composed line in `address`. Records
    /// without intake details leave those fields empty.
    pub fn from_patient(patient: &Patient) -> Self {
        let (first_name, last_name) = match patient.name.trim().split_once(char::is_whitespace) {
            Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
            None => (patient.name.trim().to_string(), String::new()),
        };

        Self {
            first_name,
            last_name,
            age: patient.age.to_string(),
            gender: patient.gender.as_str().to_string(),
            patient_id: patient.patient_id.clone(),
            email: patient.email.clone().unwrap_or_default(),
            mobile_number: patient.phone.clone(),
            marital_status: patient
                .marital_status
                .map(|status| status.as_str().to_string())
                .unwrap_or_default(),
            occupation: patient
                .occupation
                .map(|occupation| occupation.as_str().to_string())
                .unwrap_or_default(),
            blood_group: patient
                .blood_group
                .map(|group| group.as_str().to_string())
                .unwrap_or_default(),
            blood_pressure: patient.blood_pressure.clone().unwrap_or_default(),
            sugar_levels: patient.sugar_levels.clone().unwrap_or_default(),
            address: patient.address.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Appends newly picked files after the existing ones.
    pub fn add_attachments(&mut self, files: impl IntoIterator<Item = Attachment>) {
        self.attachments.extend(files);
    }

    /// Removes one attachment by position. Out-of-range indexes are ignored.
    pub fn remove_attachment(&mut self, index: usize) -> Option<Attachment> {
        if index < self.attachments.len() {
            Some(self.attachments.remove(index))
        } else {
            None
        }
    }

    /// Validates all fields and returns a typed draft or every field error.
    pub fn validate(&self) -> Result<ValidatedDraft, DraftValidationErrors> {
        let mut errors = Vec::new();
        let mut fail = |field: DraftField, message: &str| {
            errors.push(FieldError {
                field,
                message: message.to_string(),
            });
        };

        let first_name = self.first_name.trim();
        if first_name.is_empty() {
            fail(DraftField::FirstName, "First name is required");
        }
        let last_name = self.last_name.trim();
        if last_name.is_empty() {
            fail(DraftField::LastName, "Last name is required");
        }

        let age = match self.age.trim() {
            "" => {
                fail(DraftField::Age, "Age is required");
                None
            }
            raw => match raw.parse::<u32>() {
                Ok(value) if (MIN_DRAFT_AGE..=MAX_DRAFT_AGE).contains(&value) => Some(value),
                _ => {
                    fail(DraftField::Age, "Age must be between 1 and 100");
                    None
                }
            },
        };

        let gender = if self.gender.trim().is_empty() {
            fail(DraftField::Gender, "Gender is required");
            None
        } else {
            let parsed = Gender::parse(&self.gender);
            if parsed.is_none() {
                fail(DraftField::Gender, "Gender must be MALE, FEMALE or OTHER");
            }
            parsed
        };

        let patient_id = self.patient_id.trim();
        if patient_id.is_empty() {
            fail(DraftField::PatientId, "Create ID is required");
        }

        let email = optional_text(&self.email);
        if let Some(value) = email.as_deref() {
            if !EMAIL_RE.is_match(value) {
                fail(DraftField::Email, "Invalid email address");
            }
        }

        let mobile_number = self.mobile_number.trim();
        let digit_count = mobile_number.chars().filter(char::is_ascii_digit).count();
        if digit_count < MIN_MOBILE_DIGITS {
            fail(
                DraftField::MobileNumber,
                "Mobile number must be at least 10 digits",
            );
        }

        let marital_status = if self.marital_status.trim().is_empty() {
            fail(DraftField::MaritalStatus, "Marital status is required");
            None
        } else {
            let parsed = MaritalStatus::parse(&self.marital_status);
            if parsed.is_none() {
                fail(DraftField::MaritalStatus, "Unknown marital status");
            }
            parsed
        };

        let occupation = match optional_text(&self.occupation) {
            Some(value) => {
                let parsed = Occupation::parse(&value);
                if parsed.is_none() {
                    fail(DraftField::Occupation, "Unknown occupation");
                }
                parsed
            }
            None => None,
        };

        let blood_group = if self.blood_group.trim().is_empty() {
            fail(DraftField::BloodGroup, "Blood group is required");
            None
        } else {
            let parsed = BloodGroup::parse(&self.blood_group);
            if parsed.is_none() {
                fail(DraftField::BloodGroup, "Unknown blood group");
            }
            parsed
        };

        match (age, gender, marital_status, blood_group) {
            (Some(age), Some(gender), Some(marital_status), Some(blood_group))
                if errors.is_empty() =>
            {
                Ok(ValidatedDraft {
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    age,
                    gender,
                    patient_id: patient_id.to_string(),
                    email,
                    mobile_number: mobile_number.to_string(),
                    marital_status,
                    occupation,
                    blood_group,
                    blood_pressure: optional_text(&self.blood_pressure),
                    sugar_levels: optional_text(&self.sugar_levels),
                    address: optional_text(&self.address),
                    city: optional_text(&self.city),
                    state: optional_text(&self.state),
                    postal_code: optional_text(&self.postal_code),
                    attachments: self.attachments.clone(),
                })
            }
            _ => Err(DraftValidationErrors { errors }),
        }
    }
}

/// Typed, trimmed draft accepted by the CRUD dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedDraft {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: Gender,
    pub patient_id: String,
    pub email: Option<String>,
    pub mobile_number: String,
    pub marital_status: MaritalStatus,
    pub occupation: Option<Occupation>,
    pub blood_group: BloodGroup,
    pub blood_pressure: Option<String>,
    pub sugar_levels: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub attachments: Vec<Attachment>,
}

impl ValidatedDraft {
    /// Display name stored on the patient record.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Single-line address from the non-empty address parts.
    pub fn composed_address(&self) -> Option<String> {
        let parts = [&self.address, &self.city, &self.state, &self.postal_code]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .collect::<Vec<_>>();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
