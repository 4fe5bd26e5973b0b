//! Defines validated string types for names and identifiers

use arrayvec::ArrayString;
use line_macros::define_validated;
use std::convert::{Into, TryFrom};
use thiserror::Error;

/// Base trait for validated string types.
pub trait Validated: TryFrom<Self::Underlying> + Into<Self::Underlying> + Sized {
    type Underlying;
    type Error;
    type Result;

    /// Check whether the provided value is valid according to this type's
    /// rules.
    fn validate(value: &Self::Underlying) -> Result<(), <Self as Validated>::Error>;

    /// Attempt to create a new instance using the given value. Returns `Ok(_)`
    /// if the value passes validation, and `Err(_)` if not.
    fn new(value: Self::Underlying) -> <Self as Validated>::Result;

    /// Access the raw stored value
    fn value(&self) -> &Self::Underlying;

    /// Attempt to create a new instance from a string slice.
    fn from_str(arg: &str) -> Self::Result;

    /// Attempt to convert from anything that can be converted to a string.
    fn convert(arg: impl std::string::ToString) -> Self::Result;
}

struct StringValidationError(String);
type StringValidationResult = Result<(), StringValidationError>;

fn check_allowed_chars(value: &str, allowed_chars: &[&str]) -> StringValidationResult {
    for c in value.chars() {
        if !allowed_chars.iter().any(|s| s.contains(c)) {
            return Err(StringValidationError(value.to_string()));
        }
    }
    Ok(())
}

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGIT: &str = "0123456789";

define_validated! {
    TagName(ArrayString<30> casefolded) {
        check_allowed_chars(value, &[LOWER, UPPER, DIGIT, "-_"])?;
        if let Some(first) = value.chars().next() {
            if first == '-' {
                return Self::error(value);
            }
        } else {
            return Self::error(value);
        }
        Ok(())
    }

    Username(ArrayString<32>) {
        check_allowed_chars(value, &[LOWER, DIGIT, "._-"])?;
        if value.is_empty() {
            return Self::error(value);
        }
        Ok(())
    }

    Emoji(ArrayString<32>) {
        if value.is_empty() {
            return Self::error(value);
        }
        for c in value.chars() {
            if c.is_whitespace() || c.is_control() {
                return Self::error(value);
            }
        }
        Ok(())
    }
}
