//! CPF Validator
//!
//! Check-digit validation for the Brazilian individual taxpayer number
//! (Cadastro de Pessoas Físicas).

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::validators::digits_only;

/// Number of digits in a CPF, check digits included.
pub const CPF_LENGTH: usize = 11;

// == CPF ==
/// A CPF whose check digits have been verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cpf([u8; CPF_LENGTH]);

impl Cpf {
    /// Parses any punctuation of a CPF, e.g. `529.982.247-25` or `52998224725`.
    ///
    /// This says nothing about whether the number is actually assigned.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let digits: Vec<u8> = input
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|d| d as u8)
            .collect();

        let digits: [u8; CPF_LENGTH] = digits.as_slice().try_into().map_err(|_| {
            ValidationError::InvalidLength {
                expected: CPF_LENGTH,
                actual: digits.len(),
            }
        })?;

        if digits.iter().all(|&d| d == digits[0]) {
            return Err(ValidationError::RepeatedDigits);
        }

        if check_digit(&digits[..9]) != digits[9] {
            return Err(ValidationError::ChecksumMismatch { position: 9 });
        }
        if check_digit(&digits[..10]) != digits[10] {
            return Err(ValidationError::ChecksumMismatch { position: 10 });
        }

        Ok(Self(digits))
    }

    /// The eleven digits without punctuation.
    pub fn digits(&self) -> String {
        self.0.iter().map(|d| char::from(b'0' + d)).collect()
    }
}

impl FromStr for Cpf {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.digits();
        write!(f, "{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }
}

/// Mod-11 check digit over `prefix`, weighting the first digit by
/// `prefix.len() + 1` and counting down to 2.
fn check_digit(prefix: &[u8]) -> u8 {
    let weight_start = prefix.len() as u32 + 1;
    let sum: u32 = prefix
        .iter()
        .enumerate()
        .map(|(i, &d)| d as u32 * (weight_start - i as u32))
        .sum();

    match sum % 11 {
        rem if rem < 2 => 0,
        rem => (11 - rem) as u8,
    }
}

// == Predicates ==
/// Whether `input`, punctuation ignored, is a structurally valid CPF.
pub fn is_valid(input: &str) -> bool {
    Cpf::parse(input).is_ok()
}

/// Renders any eleven-digit input as `XXX.XXX.XXX-XX`, valid or not.
///
/// Used to display partially typed or legacy numbers the same way as valid ones.
pub fn format_cpf(input: &str) -> Option<String> {
    let d = digits_only(input);
    if d.len() != CPF_LENGTH {
        return None;
    }
    Some(format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11]))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_valid_cpf() {
        assert!(is_valid("529.982.247-25"));
        assert!(is_valid("52998224725"));
    }

    #[test]
    fn test_repeated_digits_rejected() {
        assert!(!is_valid("111.111.111-11"));
        assert_eq!(
            Cpf::parse("00000000000"),
            Err(ValidationError::RepeatedDigits)
        );
    }

    #[test]
    fn test_checksum_mismatch_rejected() {
        assert!(!is_valid("123.456.789-00"));
        assert_eq!(
            Cpf::parse("123.456.789-00"),
            Err(ValidationError::ChecksumMismatch { position: 10 })
        );
        assert_eq!(
            Cpf::parse("529.982.247-35"),
            Err(ValidationError::ChecksumMismatch { position: 9 })
        );
        assert_eq!(
            Cpf::parse("529.982.247-26"),
            Err(ValidationError::ChecksumMismatch { position: 10 })
        );
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(!is_valid("12345"));
        assert!(!is_valid(""));
        assert!(!is_valid("529.982.247-250"));
        assert_eq!(
            Cpf::parse("12345"),
            Err(ValidationError::InvalidLength {
                expected: 11,
                actual: 5
            })
        );
    }

    #[test]
    fn test_mixed_formatting_accepted() {
        assert!(is_valid("529.982.24725"));
        assert!(is_valid(" 529 982 247 25 "));
        assert!(!is_valid("529.982.24726"));
    }

    #[test]
    fn test_second_digit_uses_first_check_digit() {
        // 123.456.789-09 is the textbook example
        assert!(is_valid("123.456.789-09"));
    }

    #[test]
    fn test_display_and_digits() {
        let cpf: Cpf = "52998224725".parse().unwrap();
        assert_eq!(cpf.to_string(), "529.982.247-25");
        assert_eq!(cpf.digits(), "52998224725");
    }

    #[test]
    fn test_format_cpf() {
        assert_eq!(format_cpf("12345678900").as_deref(), Some("123.456.789-00"));
        assert_eq!(format_cpf("1234"), None);
    }

    proptest! {
        #[test]
        fn prop_punctuation_never_changes_verdict(raw in "[0-9.\\- ]{0,20}") {
            prop_assert_eq!(is_valid(&raw), is_valid(&digits_only(&raw)));
        }

        #[test]
        fn prop_computed_check_digits_validate(prefix in prop::collection::vec(0u8..10, 9)) {
            prop_assume!(prefix.iter().any(|&d| d != prefix[0]));

            let mut digits = prefix.clone();
            digits.push(check_digit(&digits));
            digits.push(check_digit(&digits));
            let input: String = digits.iter().map(|d| char::from(b'0' + d)).collect();

            prop_assert!(is_valid(&input));
        }
    }
}
