use std::fmt::Display;
use std::path::Path;

use url::Url;

use crate::utils::error::{Result, StatsError};

/// Configuration types check themselves before any network call is made.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl Display, reason: impl Into<String>) -> StatsError {
    StatsError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field: &str, raw: &str) -> Result<()> {
    if raw.is_empty() {
        return Err(invalid(field, raw, "URL cannot be empty"));
    }
    let url = Url::parse(raw).map_err(|e| invalid(field, raw, format!("invalid URL: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field,
            raw,
            format!("unsupported URL scheme: {}", scheme),
        )),
    }
}

pub fn validate_path(field: &str, path: &Path) -> Result<()> {
    let raw = path.to_string_lossy();
    if raw.is_empty() {
        return Err(invalid(field, &raw, "path cannot be empty"));
    }
    if raw.contains('\0') {
        return Err(invalid(field, &raw, "path contains a null byte"));
    }
    Ok(())
}

pub fn validate_positive_number(field: &str, value: usize, min: usize) -> Result<()> {
    if value < min {
        return Err(invalid(field, value, format!("must be at least {}", min)));
    }
    Ok(())
}
