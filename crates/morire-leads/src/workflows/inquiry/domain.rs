use serde::{Deserialize, Serialize};

use crate::workflows::form::{blank_fields, ValidationError};

/// Editable fields of the contact section form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Phone,
        ContactField::Message,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
            ContactField::Message => "message",
        }
    }
}

/// General inquiry form; every field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    #[serde(deserialize_with = "crate::workflows::form::null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "crate::workflows::form::null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "crate::workflows::form::null_as_empty")]
    pub phone: String,
    #[serde(deserialize_with = "crate::workflows::form::null_as_empty")]
    pub message: String,
}

impl ContactForm {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Phone => self.phone = value,
            ContactField::Message => self.message = value,
        }
    }

    pub fn validate(&self) -> Result<ContactInquiry, ValidationError> {
        let missing = blank_fields(
            ContactField::ALL
                .iter()
                .map(|field| (field.name(), self.get(*field))),
        );
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        Ok(ContactInquiry {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }
}

/// Inquiry accepted for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}
