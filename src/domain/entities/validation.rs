use std::borrow::Cow;

use validator::ValidationError;

use crate::{errors::AppError, month_year::MonthYear};

pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://"))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

/// Required text: whitespace alone counts as missing.
pub fn validate_non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(new_validation_error("required", "This field is required"));
    }
    Ok(())
}

/// Start/end months of a period; `end` must not come before `start`.
pub fn validate_period(start: &str, end: Option<&str>) -> Result<(), ValidationError> {
    let (Ok(start), Some(Ok(end))) = (MonthYear::parse(start), end.map(MonthYear::parse)) else {
        // Format problems are reported on the fields themselves.
        return Ok(());
    };
    if end < start {
        return Err(new_validation_error("period_order", "End date cannot be before the start date"));
    }
    Ok(())
}

/// Converts an already-validated `MM/YYYY` field.
pub fn month_field(field: &str, value: &str) -> Result<MonthYear, AppError> {
    MonthYear::parse(value).map_err(|e| AppError::InvalidInput(format!("{field}: {e}")))
}

/// Unwraps a select field already checked by `required`.
pub fn chosen<T: Copy>(field: &str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::InvalidInput(format!("{field}: no option selected")))
}

pub fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_must_be_http() {
        assert!(validate_url("https://example.com/cert/123").is_ok());
        assert!(validate_url("http://localhost:3000").is_ok());
        assert!(validate_url("javascript:alert(1)").is_err());
        assert!(validate_url("not a url").is_err());
    }

    #[test]
    fn whitespace_only_is_blank() {
        assert!(validate_non_blank("Ada").is_ok());
        assert!(validate_non_blank(" Ada ").is_ok());
        assert!(validate_non_blank("").is_err());
        assert!(validate_non_blank(" \t\n ").is_err());
    }

    #[test]
    fn chosen_reports_the_field() {
        assert_eq!(chosen("level", Some(3)).unwrap(), 3);
        let err = chosen::<u8>("level", None).unwrap_err();
        assert!(err.to_string().contains("level"));
    }

    #[test]
    fn period_end_cannot_precede_start() {
        assert!(validate_period("05/2020", Some("04/2020")).is_err());
        assert!(validate_period("05/2020", Some("05/2020")).is_ok());
        assert!(validate_period("05/2020", None).is_ok());
        assert!(validate_period("garbage", Some("04/2020")).is_ok());
    }
}
