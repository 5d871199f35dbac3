//! Validation Rules
//!
//! Bounds shared by [`Agent`](crate::Agent) and [`Content`](crate::Content),
//! plus the error reported when a field falls outside them.

use thiserror::Error;

/// Lower bound for `education`.
pub const EDUCATION_MIN: u8 = 1;
/// Upper bound for `education`.
pub const EDUCATION_MAX: u8 = 5;

/// Lower bound for `economic_status`.
pub const ECONOMIC_STATUS_MIN: f64 = 10_000.0;
/// Upper bound for `economic_status`.
pub const ECONOMIC_STATUS_MAX: f64 = 500_000.0;
/// Step that `economic_status` is snapped to.
pub const ECONOMIC_STATUS_STEP: f64 = 5_000.0;

/// Lower bound for `politics`.
pub const POLITICS_MIN: i8 = -2;
/// Upper bound for `politics`.
pub const POLITICS_MAX: i8 = 2;

/// Lower bound for `age`.
pub const AGE_MIN: u8 = 5;
/// Upper bound for `age`.
pub const AGE_MAX: u8 = 90;

/// Legal `sex` values for an agent.
pub const AGENT_SEX_VALUES: [u8; 3] = [0, 1, 2];
/// Legal `sex` values for content.
pub const CONTENT_SEX_VALUES: [u8; 2] = [0, 1];

/// Error raised when a record is constructed with an out-of-bounds field.
///
/// Only the first offending field is reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value lies outside a closed numeric interval
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    /// Value is not a member of a small discrete set
    #[error("{field} must be one of {allowed}, got {value}")]
    NotAllowed {
        field: &'static str,
        allowed: &'static str,
        value: i64,
    },
    /// Cultural tag outside the closed set
    #[error("cultural must be one of western, eastern, african, indigenous, multicultural, got {0:?}")]
    UnknownCultural(String),
}

impl ValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { field, .. } => field,
            ValidationError::NotAllowed { field, .. } => field,
            ValidationError::UnknownCultural(_) => "cultural",
        }
    }
}

/// Checks a real-valued field against `[min, max]`. NaN never passes.
pub(crate) fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, ValidationError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            value,
        })
    }
}

/// Checks a [0, 1] trait.
pub(crate) fn check_unit(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    check_range(field, value, 0.0, 1.0)
}

pub(crate) fn check_education(value: u8) -> Result<u8, ValidationError> {
    check_range(
        "education",
        f64::from(value),
        f64::from(EDUCATION_MIN),
        f64::from(EDUCATION_MAX),
    )?;
    Ok(value)
}

pub(crate) fn check_politics(value: i8) -> Result<i8, ValidationError> {
    check_range(
        "politics",
        f64::from(value),
        f64::from(POLITICS_MIN),
        f64::from(POLITICS_MAX),
    )?;
    Ok(value)
}

pub(crate) fn check_age(value: u8) -> Result<u8, ValidationError> {
    check_range("age", f64::from(value), f64::from(AGE_MIN), f64::from(AGE_MAX))?;
    Ok(value)
}

pub(crate) fn check_sex(
    value: u8,
    allowed: &[u8],
    allowed_label: &'static str,
) -> Result<u8, ValidationError> {
    if allowed.contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::NotAllowed {
            field: "sex",
            allowed: allowed_label,
            value: i64::from(value),
        })
    }
}

/// Bounds-checks `economic_status` and snaps it to the nearest multiple of
/// [`ECONOMIC_STATUS_STEP`].
///
/// Ties on the quotient round half to even, so `12_500` becomes `10_000` and
/// `17_500` becomes `20_000`.
pub fn round_economic_status(value: f64) -> Result<f64, ValidationError> {
    let value = check_range(
        "economic_status",
        value,
        ECONOMIC_STATUS_MIN,
        ECONOMIC_STATUS_MAX,
    )?;
    Ok((value / ECONOMIC_STATUS_STEP).round_ties_even() * ECONOMIC_STATUS_STEP)
}
