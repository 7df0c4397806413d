use crate::utils::error::{EtlError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN fails both comparisons, so check containment instead of exclusion
    if !(value >= min && value <= max) {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source.endpoint", "https://api.mercadolibre.com/sites/MLA/search").is_ok());
        assert!(validate_url("source.endpoint", "http://127.0.0.1:8080/search").is_ok());
        assert!(validate_url("source.endpoint", "").is_err());
        assert!(validate_url("source.endpoint", "invalid-url").is_err());
        assert!(validate_url("source.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("source.limit", 50, 1).is_ok());
        assert!(validate_positive_number("source.limit", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("filter.min_discount", 10.0, 0.0, 100.0).is_ok());
        assert!(validate_range("filter.min_discount", 100.0, 0.0, 100.0).is_ok());
        assert!(validate_range("filter.min_discount", -1.0, 0.0, 100.0).is_err());
        assert!(validate_range("filter.min_discount", f64::NAN, 0.0, 100.0).is_err());
    }

    #[test]
    fn test_validate_path_and_strings() {
        assert!(validate_path("output.path", "./out").is_ok());
        assert!(validate_path("output.path", "").is_err());
        assert!(validate_path("output.path", "bad\0path").is_err());
        assert!(validate_non_empty_string("categories.name", "Tablets").is_ok());
        assert!(validate_non_empty_string("categories.name", "   ").is_err());
    }
}
