use crate::utils::error::{ConvertError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// A suffix is a dot followed by at least one character and no separators.
pub fn validate_suffix(field_name: &str, suffix: &str) -> Result<()> {
    let reason = if !suffix.starts_with('.') {
        Some("Suffix must start with '.'")
    } else if suffix.len() < 2 {
        Some("Suffix needs at least one character after '.'")
    } else if suffix.contains('/') || suffix.contains('\\') {
        Some("Suffix cannot contain path separators")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: suffix.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_command(field_name: &str, command: &[String]) -> Result<()> {
    for part in command {
        validate_non_empty_string(field_name, part)?;
    }
    Ok(())
}
