//! Patient domain model.
//!
//! # Responsibility
//! - Define the canonical patient record held by list sessions.
//! - Validate records arriving from the backing directory before they enter
//!   a store.
//!
//! # Invariants
//! - `id` is assigned by the backing directory and is never empty.
//! - `created_at` is set once by the directory and never rewritten locally.
//! - `age` is a positive integer.
//! - Intake details (marital status, blood group, vitals) are optional on
//!   records; only the intake form requires some of them.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Opaque identity assigned by the backing directory.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PatientId = String;

/// Enumerated gender values accepted by the intake form and directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Stable wire/display value (`MALE|FEMALE|OTHER`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Other => "OTHER",
        }
    }

    /// Parses a wire value, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "MALE" => Some(Self::Male),
            "FEMALE" => Some(Self::Female),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Marital status captured at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

impl MaritalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Married => "married",
            Self::Divorced => "divorced",
            Self::Widowed => "widowed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "single" => Some(Self::Single),
            "married" => Some(Self::Married),
            "divorced" => Some(Self::Divorced),
            "widowed" => Some(Self::Widowed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Occupation {
    Student,
    Employed,
    SelfEmployed,
    Unemployed,
    Retired,
    Homemaker,
}

impl Occupation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Employed => "employed",
            Self::SelfEmployed => "self-employed",
            Self::Unemployed => "unemployed",
            Self::Retired => "retired",
            Self::Homemaker => "homemaker",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "student" => Some(Self::Student),
            "employed" => Some(Self::Employed),
            "self-employed" => Some(Self::SelfEmployed),
            "unemployed" => Some(Self::Unemployed),
            "retired" => Some(Self::Retired),
            "homemaker" => Some(Self::Homemaker),
            _ => None,
        }
    }
}

/// ABO/Rh blood group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
            Self::OPositive => "O+",
            Self::ONegative => "O-",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A+" => Some(Self::APositive),
            "A-" => Some(Self::ANegative),
            "B+" => Some(Self::BPositive),
            "B-" => Some(Self::BNegative),
            "AB+" => Some(Self::AbPositive),
            "AB-" => Some(Self::AbNegative),
            "O+" => Some(Self::OPositive),
            "O-" => Some(Self::ONegative),
            _ => None,
        }
    }
}

/// Validation errors for patient records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientValidationError {
    /// `id` is empty or whitespace.
    EmptyId,
    /// `patient_id` (display identifier) is empty or whitespace.
    EmptyPatientId,
    /// `name` is empty or whitespace.
    EmptyName,
    /// `age` must be a positive integer.
    NonPositiveAge,
}

impl Display for PatientValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "patient id must not be empty"),
            Self::EmptyPatientId => write!(f, "patient display id must not be empty"),
            Self::EmptyName => write!(f, "patient name must not be empty"),
            Self::NonPositiveAge => write!(f, "patient age must be a positive integer"),
        }
    }
}

impl Error for PatientValidationError {}

/// Canonical patient record as returned by the backing directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PatientWire")]
pub struct Patient {
    /// Unique identity used for every CRUD call.
    pub id: PatientId,
    /// Human-facing identifier shown in lists. Not guaranteed unique.
    pub patient_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub gender: Gender,
    pub age: u32,
    pub address: Option<String>,
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub occupation: Option<Occupation>,
    pub blood_group: Option<BloodGroup>,
    pub blood_pressure: Option<String>,
    pub sugar_levels: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Patient {
    /// Creates a record with required fields and `created_at = now`.
    ///
    /// Used by directory implementations when they assign identity.
    pub fn new(
        id: impl Into<PatientId>,
        patient_id: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
        gender: Gender,
        age: u32,
    ) -> Result<Self, PatientValidationError> {
        let patient = Self {
            id: id.into(),
            patient_id: patient_id.into(),
            name: name.into(),
            email: None,
            phone: phone.into(),
            gender,
            age,
            address: None,
            medical_history: None,
            allergies: None,
            marital_status: None,
            occupation: None,
            blood_group: None,
            blood_pressure: None,
            sugar_levels: None,
            created_at: now_epoch_ms(),
        };
        patient.validate()?;
        Ok(patient)
    }

    /// Replaces the creation timestamp. Only directory/import paths should
    /// call this; sessions treat `created_at` as immutable.
    pub fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), PatientValidationError> {
        if self.id.trim().is_empty() {
            return Err(PatientValidationError::EmptyId);
        }
        if self.patient_id.trim().is_empty() {
            return Err(PatientValidationError::EmptyPatientId);
        }
        if self.name.trim().is_empty() {
            return Err(PatientValidationError::EmptyName);
        }
        if self.age == 0 {
            return Err(PatientValidationError::NonPositiveAge);
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatientWire {
    id: PatientId,
    patient_id: String,
    name: String,
    #[serde(default)]
    email: Option<String>,
    phone: String,
    gender: Gender,
    age: u32,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    medical_history: Option<String>,
    #[serde(default)]
    allergies: Option<String>,
    #[serde(default)]
    marital_status: Option<MaritalStatus>,
    #[serde(default)]
    occupation: Option<Occupation>,
    #[serde(default)]
    blood_group: Option<BloodGroup>,
    #[serde(default)]
    blood_pressure: Option<String>,
    #[serde(default)]
    sugar_levels: Option<String>,
    created_at: i64,
}

impl TryFrom<PatientWire> for Patient {
    type Error = PatientValidationError;

    fn try_from(wire: PatientWire) -> Result<Self, Self::Error> {
        let patient = Self {
            id: wire.id,
            patient_id: wire.patient_id,
            name: wire.name,
            email: wire.email,
            phone: wire.phone,
            gender: wire.gender,
            age: wire.age,
            address: wire.address,
            medical_history: wire.medical_history,
            allergies: wire.allergies,
            marital_status: wire.marital_status,
            occupation: wire.occupation,
            blood_group: wire.blood_group,
            blood_pressure: wire.blood_pressure,
            sugar_levels: wire.sugar_levels,
            created_at: wire.created_at,
        };
        patient.validate()?;
        Ok(patient)
    }
}

pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::Gender;

    #[test]
    fn gender_parse_is_case_insensitive() {
        assert_eq!(Gender::parse("female"), Some(Gender::Female));
        assert_eq!(Gender::parse(" OTHER "), Some(Gender::Other));
        assert_eq!(Gender::parse("unknown"), None);
    }
}
