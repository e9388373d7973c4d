//! Brazilian phone numbers: two-digit area code followed by an eight-digit
//! landline or a nine-digit mobile number starting with 9.

use crate::error::ValidationError;
use crate::validators::digits_only;

const LANDLINE_LENGTH: usize = 10;
const MOBILE_LENGTH: usize = 11;

/// Strips punctuation and checks the shape, returning the bare digits.
fn parse_phone(input: &str) -> Result<String, ValidationError> {
    let digits = digits_only(input);

    if digits.starts_with('0') {
        return Err(ValidationError::InvalidPhone(
            "area code cannot start with 0".to_string(),
        ));
    }

    match digits.len() {
        LANDLINE_LENGTH => Ok(digits),
        MOBILE_LENGTH if digits.as_bytes()[2] == b'9' => Ok(digits),
        MOBILE_LENGTH => Err(ValidationError::InvalidPhone(
            "mobile numbers must start with 9".to_string(),
        )),
        n => Err(ValidationError::InvalidPhone(format!(
            "expected 10 or 11 digits, got {}",
            n
        ))),
    }
}

pub fn is_valid_phone(input: &str) -> bool {
    parse_phone(input).is_ok()
}

/// Validates `input` and renders it as `(AA) NNNN-NNNN` or `(AA) NNNNN-NNNN`.
pub fn normalize_phone(input: &str) -> Result<String, ValidationError> {
    let d = parse_phone(input)?;
    let split = d.len() - 4;
    Ok(format!("({}) {}-{}", &d[..2], &d[2..split], &d[split..]))
}

/// Like [`normalize_phone`], discarding the reason on failure.
pub fn format_phone(input: &str) -> Option<String> {
    normalize_phone(input).ok()
}
