//! Field rules shared by the request types and the mapping from
//! `validator` reports onto [`Error::Validation`].

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use crate::dates::parse_date;
use crate::Error;

pub const EMPTY_MESSAGE: &str = "can't be empty";
pub const DATE_FORMAT_MESSAGE: &str = "format must be YYYY-MM-DD";

fn date_error(message: &'static str) -> ValidationError {
    let mut err = ValidationError::new("date");
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Body field rule: the date must be a strict `YYYY-MM-DD` day.
pub fn validate_date_format(date: &str) -> Result<(), ValidationError> {
    match parse_date(date) {
        Some(_) => Ok(()),
        None => Err(date_error(DATE_FORMAT_MESSAGE)),
    }
}

/// Query parameter rule: absent dates are reported separately from malformed ones.
pub fn validate_date_param(date: &str) -> Result<(), ValidationError> {
    if date.is_empty() {
        return Err(date_error(EMPTY_MESSAGE));
    }
    validate_date_format(date)
}

/// Pick the first failing field in `order` and turn it into an [`Error::Validation`].
///
/// `validator` reports failures in a map; walking a fixed field order keeps
/// the reported field deterministic. Fields missing from `order` are ignored.
pub fn first_failure(errors: &ValidationErrors, order: &[&str]) -> Option<Error> {
    let field_errors = errors.field_errors();
    order.iter().find_map(|field| {
        let failure = field_errors.get(*field)?.first()?;
        let message = failure
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| failure.code.to_string());
        Some(Error::validation(*field, message))
    })
}
