use crate::utils::error::{NamingError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> NamingError {
    NamingError::InvalidConfigValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Registry agents are reached over plain HTTP(S) and need a host to dial.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(field_name, url_str, "URL has no host"));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value >= min_value {
        return Ok(());
    }
    Err(invalid(
        field_name,
        value,
        format!("Value must be at least {}", min_value),
    ))
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    match value {
        Some(v) => Ok(v),
        None => Err(NamingError::MissingConfig {
            field: field_name.to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if !value.trim().is_empty() {
        return Ok(());
    }
    Err(invalid(field_name, value, "Value cannot be blank"))
}
