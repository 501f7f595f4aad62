use crate::catalog::UnitType;
use crate::workflows::form::{blank_fields, ValidationError};

use super::domain::{RegistrationField, RegistrationForm, ValidRegistration};

/// Pre-flight check run before any external call. Values are trimmed; the
/// email format is not checked.
pub fn validate_registration(
    form: &RegistrationForm,
) -> Result<ValidRegistration, ValidationError> {
    let missing = blank_fields(
        RegistrationField::REQUIRED
            .iter()
            .map(|field| (field.name(), form.get(*field))),
    );
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let preferred_unit = UnitType::from_label(&form.preferred_unit)
        .ok_or_else(|| ValidationError::UnknownUnit(form.preferred_unit.trim().to_string()))?;

    Ok(ValidRegistration {
        full_name: form.full_name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        preferred_unit,
        message: form.message.trim().to_string(),
    })
}
