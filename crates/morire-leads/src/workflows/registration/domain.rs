use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::catalog::UnitType;

/// Editable fields of the interest registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationField {
    FullName,
    Email,
    Phone,
    PreferredUnit,
    Message,
}

impl RegistrationField {
    pub const REQUIRED: [RegistrationField; 4] = [
        RegistrationField::FullName,
        RegistrationField::Email,
        RegistrationField::Phone,
        RegistrationField::PreferredUnit,
    ];

    /// Field name as used by the site's form inputs.
    pub fn name(self) -> &'static str {
        match self {
            RegistrationField::FullName => "fullName",
            RegistrationField::Email => "email",
            RegistrationField::Phone => "phone",
            RegistrationField::PreferredUnit => "preferredUnit",
            RegistrationField::Message => "message",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [
            RegistrationField::FullName,
            RegistrationField::Email,
            RegistrationField::Phone,
            RegistrationField::PreferredUnit,
            RegistrationField::Message,
        ]
        .into_iter()
        .find(|field| field.name() == name)
    }
}

/// Raw form state as typed by the visitor. Absent or `null` fields deserialize as empty
/// strings so incomplete payloads reach validation instead of being rejected
/// by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    #[serde(deserialize_with = "crate::workflows::form::null_as_empty")]
    pub full_name: String,
    #[serde(deserialize_with = "crate::workflows::form::null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "crate::workflows::form::null_as_empty")]
    pub phone: String,
    #[serde(deserialize_with = "crate::workflows::form::null_as_empty")]
    pub preferred_unit: String,
    #[serde(deserialize_with = "crate::workflows::form::null_as_empty")]
    pub message: String,
}

impl RegistrationForm {
    pub fn get(&self, field: RegistrationField) -> &str {
        match field {
            RegistrationField::FullName => &self.full_name,
            RegistrationField::Email => &self.email,
            RegistrationField::Phone => &self.phone,
            RegistrationField::PreferredUnit => &self.preferred_unit,
            RegistrationField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: RegistrationField, value: impl Into<String>) {
        let value = value.into();
        match field {
            RegistrationField::FullName => self.full_name = value,
            RegistrationField::Email => self.email = value,
            RegistrationField::Phone => self.phone = value,
            RegistrationField::PreferredUnit => self.preferred_unit = value,
            RegistrationField::Message => self.message = value,
        }
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

/// Registration that passed validation, with the unit resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub preferred_unit: UnitType,
    pub message: String,
}

/// Row written to the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRecord {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub preferred_unit: UnitType,
    pub message: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl RegistrationRecord {
    pub fn new(registration: ValidRegistration, created_at: DateTime<Utc>) -> Self {
        let ValidRegistration {
            full_name,
            email,
            phone,
            preferred_unit,
            message,
        } = registration;

        Self {
            full_name,
            email,
            phone,
            preferred_unit,
            message,
            created_at,
        }
    }

    /// Template variables for the staff alert about this lead.
    pub fn notification(&self, recipient_label: &str) -> LeadNotification {
        LeadNotification {
            to_name: recipient_label.to_string(),
            name: self.full_name.clone(),
            from_email: self.email.clone(),
            phone: self.phone.clone(),
            unit: self.preferred_unit.label().to_string(),
            message: self.message.clone(),
            user_name: self.full_name.clone(),
            preferred_unit: self.preferred_unit.label().to_string(),
        }
    }
}

/// Named variables consumed by the notification email template. `user_name`
/// and `preferred_unit` repeat `name` and `unit` for older template revisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadNotification {
    pub to_name: String,
    pub name: String,
    pub from_email: String,
    pub phone: String,
    pub unit: String,
    pub message: String,
    pub user_name: String,
    pub preferred_unit: String,
}

/// Same shape as JavaScript's `Date.prototype.toISOString`.
fn serialize_timestamp<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}
