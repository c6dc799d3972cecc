//! Field-level validation shared by the entity services.

use crate::errors::ModelError;

/// National identification number: exactly 12 ASCII digits.
pub fn iin(value: &str) -> Result<(), ModelError> {
    if value.len() != 12 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ModelError::Validation("IIN must be exactly 12 digits".into()));
    }
    Ok(())
}

pub fn person_name(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    if value.len() > 256 {
        return Err(ModelError::Validation(format!("{field} too long (max 256)")));
    }
    Ok(())
}

pub fn age(value: i32) -> Result<(), ModelError> {
    if !(0..=120).contains(&value) {
        return Err(ModelError::Validation("age must be within 0..=120".into()));
    }
    Ok(())
}

pub fn username(value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation("username required".into()));
    }
    if value.len() > 12 {
        return Err(ModelError::Validation("username too long (max 12)".into()));
    }
    Ok(())
}
