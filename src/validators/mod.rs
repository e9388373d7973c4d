//! Validators Module
//!
//! Normalizers, validators and display formatters for the data students and
//! guardians type into registration forms.
//!
//! # Contents
//! - `cpf` - CPF check-digit validation and formatting
//! - `phone` - Brazilian landline/mobile numbers
//! - `date` - `dd/mm/yyyy` dates and ages

pub mod cpf;
pub mod date;
pub mod phone;

pub use cpf::{format_cpf, is_valid as is_valid_cpf, Cpf};
pub use date::{age_on, format_br_date, iso_to_br, parse_br_date};
pub use phone::{format_phone, is_valid_phone, normalize_phone};

/// Keeps only the ASCII digits of `input`.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}
