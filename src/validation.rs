//! Pure validation rules: structural field checks on request DTOs and the
//! birth-date business rule. No I/O happens here; everything takes values
//! and returns values so both the HTTP layer and the form view can share
//! the exact same rules.

use crate::errors::AppError;
use crate::models::{CreateInsuredRequest, UpdateInsuredRequest};
use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// Minimum age an insured must have at the time of validation.
pub const MINIMUM_AGE: i32 = 18;

/// Default page size when the requested size is below 1.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Upper bound for the estimated request value.
pub const MAX_REQUEST_VALUE: i64 = 999_999_999_999;

/// Full years elapsed between `birth` and `today`.
///
/// Subtracts one when this year's birthday (month/day) has not happened
/// yet. A Feb-29 birthday counts as Mar-1 in non-leap years.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Business rule: the birth date must not be in the future and must yield
/// an age of at least [`MINIMUM_AGE`] full years on `today`.
pub fn validate_birth_date(birth: NaiveDate, today: NaiveDate) -> Result<(), AppError> {
    if birth > today {
        return Err(AppError::BusinessRule(
            "Birth date cannot be a future date".to_string(),
        ));
    }
    if age_on(birth, today) < MINIMUM_AGE {
        return Err(AppError::BusinessRule(format!(
            "Insured must be at least {} years old",
            MINIMUM_AGE
        )));
    }
    Ok(())
}

/// Clamps paging parameters to their allowed ranges:
/// page numbers below 1 become 1, sizes below 1 become the default of 10,
/// sizes above 100 become 100.
pub fn clamp_page_params(page_number: i64, page_size: i64) -> (i64, i64) {
    let page_number = if page_number < 1 { 1 } else { page_number };
    let page_size = if page_size < 1 {
        DEFAULT_PAGE_SIZE
    } else if page_size > MAX_PAGE_SIZE {
        MAX_PAGE_SIZE
    } else {
        page_size
    };
    (page_number, page_size)
}

/// Whether the decimal string form of `id` contains `fragment`.
///
/// This is the application-level substring match used by the search
/// endpoint; it is deliberately not a prefix or numeric-range comparison.
pub fn id_matches_fragment(id: i64, fragment: &str) -> bool {
    id.to_string().contains(fragment)
}

/// Structural validation for a create request.
///
/// Returns one "field: problem" entry per violation, in field order, so
/// callers can surface them verbatim. Business rules (age, uniqueness) are
/// checked separately by the service.
pub fn validate_create(request: &CreateInsuredRequest) -> Vec<String> {
    let mut errors = Vec::new();

    if request.identification_number <= 0 {
        errors.push("identificationNumber: must be a positive value".to_string());
    }

    check_name(&mut errors, "firstName", &request.first_name);
    check_optional_name(&mut errors, "middleName", request.middle_name.as_deref());
    check_name(&mut errors, "firstLastName", &request.first_last_name);
    check_name(&mut errors, "secondLastName", &request.second_last_name);
    check_phone(&mut errors, &request.contact_phone);
    check_email(&mut errors, &request.email);
    check_request_value(&mut errors, &request.estimated_request_value);
    check_observations(&mut errors, request.observations.as_deref());

    errors
}

/// Structural validation for an update request; same field rules as
/// [`validate_create`] minus the identification number (path-supplied).
pub fn validate_update(request: &UpdateInsuredRequest) -> Vec<String> {
    let mut errors = Vec::new();

    check_name(&mut errors, "firstName", &request.first_name);
    check_optional_name(&mut errors, "middleName", request.middle_name.as_deref());
    check_name(&mut errors, "firstLastName", &request.first_last_name);
    check_name(&mut errors, "secondLastName", &request.second_last_name);
    check_phone(&mut errors, &request.contact_phone);
    check_email(&mut errors, &request.email);
    check_request_value(&mut errors, &request.estimated_request_value);
    check_observations(&mut errors, request.observations.as_deref());

    errors
}

/// Letters-only check covering ASCII plus Latin-1 accented letters, with
/// single internal spaces allowed ("Maria Jose").
pub fn is_valid_name(name: &str) -> bool {
    let name_regex =
        Regex::new(r"^[A-Za-zÀ-ÖØ-öø-ÿ]+( [A-Za-zÀ-ÖØ-öø-ÿ]+)*$").unwrap();
    name_regex.is_match(name)
}

/// Phone-shaped check: optional leading '+' or '(', then a digit, then
/// digits and common separators only. Length bounds are enforced
/// separately.
pub fn is_valid_phone(phone: &str) -> bool {
    let phone_regex = Regex::new(r"^[+(]?[0-9][0-9 ().\-]*$").unwrap();
    phone_regex.is_match(phone)
}

/// RFC 5322 simplified email check, local@domain.tld with at least one dot
/// in the domain.
pub fn is_valid_email(email: &str) -> bool {
    let email_regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .unwrap();
    email_regex.is_match(email)
}

fn check_name(errors: &mut Vec<String>, field: &str, value: &str) {
    let len = value.chars().count();
    if len < 2 || len > 50 {
        errors.push(format!("{}: must be between 2 and 50 characters", field));
    } else if !is_valid_name(value) {
        errors.push(format!("{}: must contain letters only", field));
    }
}

fn check_optional_name(errors: &mut Vec<String>, field: &str, value: Option<&str>) {
    let Some(value) = value else { return };
    if value.is_empty() {
        return;
    }
    if value.chars().count() > 50 {
        errors.push(format!("{}: cannot exceed 50 characters", field));
    } else if !is_valid_name(value) {
        errors.push(format!("{}: must contain letters only", field));
    }
}

fn check_phone(errors: &mut Vec<String>, value: &str) {
    let len = value.chars().count();
    if len < 7 || len > 20 {
        errors.push("contactPhone: must be between 7 and 20 characters".to_string());
    } else if !is_valid_phone(value) {
        errors.push("contactPhone: format is not valid".to_string());
    }
}

fn check_email(errors: &mut Vec<String>, value: &str) {
    if value.is_empty() || value.chars().count() > 100 {
        errors.push("email: must be between 1 and 100 characters".to_string());
    } else if !is_valid_email(value) {
        errors.push("email: format is not valid".to_string());
    }
}

fn check_request_value(errors: &mut Vec<String>, value: &BigDecimal) {
    if *value <= BigDecimal::from(0) {
        errors.push("estimatedRequestValue: must be greater than zero".to_string());
        return;
    }
    if *value > BigDecimal::from(MAX_REQUEST_VALUE) {
        errors.push(format!(
            "estimatedRequestValue: cannot exceed {}",
            MAX_REQUEST_VALUE
        ));
    }
    // normalized() strips trailing zeros, so the remaining scale is the
    // number of significant decimal places.
    let (_, scale) = value.normalized().as_bigint_and_exponent();
    if scale > 2 {
        errors.push("estimatedRequestValue: cannot have more than 2 decimal places".to_string());
    }
}

fn check_observations(errors: &mut Vec<String>, value: Option<&str>) {
    if let Some(value) = value {
        if value.chars().count() > 500 {
            errors.push("observations: cannot exceed 500 characters".to_string());
        }
    }
}
