//! Descriptor validation for the type registry
//!
//! Checks performed before a descriptor is accepted. Field types are not checked
//! here; an untyped or union-typed field only fails when a capture reaches it.

use crate::descriptor::TypeDescriptor;
use crate::error::{CaptureError, Result};
use std::collections::HashSet;

/// Maximum length of a type identifier or field name
const MAX_NAME_LENGTH: usize = 256;

/// Validates a type descriptor before registration
pub fn validate_descriptor(descriptor: &TypeDescriptor) -> Result<()> {
    validate_type_identifier(descriptor.identifier())?;

    let mut seen = HashSet::new();
    for field in descriptor.fields() {
        validate_field_name(descriptor.identifier(), field.name())?;
        if !seen.insert(field.name()) {
            return Err(CaptureError::InvalidDescriptor(format!(
                "Duplicate field {} in {}",
                field.name(),
                descriptor.identifier()
            )));
        }
    }

    if descriptor.is_capturable() && !descriptor.has_constructor() {
        return Err(CaptureError::InvalidDescriptor(format!(
            "Capturable type {} has no constructor",
            descriptor.identifier()
        )));
    }

    Ok(())
}

/// Validates a type identifier such as `app::models::People`
pub fn validate_type_identifier(identifier: &str) -> Result<()> {
    if identifier.is_empty() {
        return Err(CaptureError::InvalidDescriptor(
            "Type identifier cannot be empty".to_string(),
        ));
    }

    if identifier.len() > MAX_NAME_LENGTH {
        return Err(CaptureError::InvalidDescriptor(format!(
            "Type identifier too long: {} chars (max: {MAX_NAME_LENGTH})",
            identifier.len()
        )));
    }

    if identifier.chars().any(char::is_whitespace) {
        return Err(CaptureError::InvalidDescriptor(format!(
            "Type identifier cannot contain whitespace: {identifier:?}"
        )));
    }

    Ok(())
}

fn validate_field_name(identifier: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CaptureError::InvalidDescriptor(format!(
            "Field name cannot be empty in {identifier}"
        )));
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(CaptureError::InvalidDescriptor(format!(
            "Field name too long in {identifier}: {} chars (max: {MAX_NAME_LENGTH})",
            name.len()
        )));
    }

    Ok(())
}
