//! Field rules for user records.
//!
//! Each field has a fixed, ordered list of checks. Every check runs
//! independently and all failures are collected; the only exception is an
//! empty value, which yields a single `Required` violation for that field.
//! Uniqueness needs the store and lives in the user service.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidateEmail;

use crate::constants::{EMAIL_MAX_LENGTH, NAME_MAX_LENGTH, NAME_MIN_LENGTH, PHONE_NUMBER_LENGTH};
use crate::error::DomainError;
use crate::user::UserDraft;

static DIGITS_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));

/// Validated user field, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
}

impl Field {
    /// Human readable label used in messages
    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::Email => "Email",
            Field::PhoneNumber => "Phone number",
        }
    }

    /// JSON property name
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::PhoneNumber => "phoneNumber",
        }
    }
}

/// Kind of rule a field failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Required,
    TooShort { min: usize },
    TooLong { max: usize },
    InvalidFormat,
    WrongLength { expected: usize },
    DuplicateEmail,
    DuplicatePhone,
}

/// A single failed rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub field: Field,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(field: Field, kind: ViolationKind) -> Self {
        Self { field, kind }
    }

    /// Client-facing message
    pub fn message(&self) -> String {
        let label = self.field.label();
        match (self.field, self.kind) {
            (_, ViolationKind::Required) => format!("{} is required", label),
            (_, ViolationKind::TooShort { min }) => {
                format!("{} must be at least {} characters", label, min)
            }
            (_, ViolationKind::TooLong { max }) => {
                format!("{} must not exceed {} characters", label, max)
            }
            (Field::Email, ViolationKind::InvalidFormat) => {
                "Email is not a valid email address".to_string()
            }
            (Field::PhoneNumber, ViolationKind::InvalidFormat) => {
                "Phone number must contain only digits".to_string()
            }
            (_, ViolationKind::InvalidFormat) => format!("{} has an invalid format", label),
            (_, ViolationKind::WrongLength { expected }) => {
                format!("{} must be exactly {} characters", label, expected)
            }
            (_, ViolationKind::DuplicateEmail) | (_, ViolationKind::DuplicatePhone) => {
                format!("{} is already in use", label)
            }
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Which revision of the field rules to apply.
///
/// `Strict` adds the name minimum length and the digits-only phone pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    #[default]
    Strict,
    Lenient,
}

impl ValidationPolicy {
    fn is_strict(self) -> bool {
        matches!(self, ValidationPolicy::Strict)
    }
}

impl FromStr for ValidationPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ValidationPolicy::Strict),
            "lenient" => Ok(ValidationPolicy::Lenient),
            other => Err(DomainError::UnknownPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for ValidationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationPolicy::Strict => f.write_str("strict"),
            ValidationPolicy::Lenient => f.write_str("lenient"),
        }
    }
}

type Check = fn(&str, ValidationPolicy) -> Option<ViolationKind>;

const NAME_CHECKS: &[Check] = &[name_too_short, name_too_long];
const EMAIL_CHECKS: &[Check] = &[email_format, email_too_long];
const PHONE_CHECKS: &[Check] = &[phone_length, phone_digits];

fn name_too_short(value: &str, policy: ValidationPolicy) -> Option<ViolationKind> {
    (policy.is_strict() && char_len(value) < NAME_MIN_LENGTH)
        .then_some(ViolationKind::TooShort { min: NAME_MIN_LENGTH })
}

fn name_too_long(value: &str, _: ValidationPolicy) -> Option<ViolationKind> {
    (char_len(value) > NAME_MAX_LENGTH).then_some(ViolationKind::TooLong { max: NAME_MAX_LENGTH })
}

fn email_format(value: &str, _: ValidationPolicy) -> Option<ViolationKind> {
    (!is_valid_email(value)).then_some(ViolationKind::InvalidFormat)
}

fn email_too_long(value: &str, _: ValidationPolicy) -> Option<ViolationKind> {
    (char_len(value) > EMAIL_MAX_LENGTH).then_some(ViolationKind::TooLong { max: EMAIL_MAX_LENGTH })
}

fn phone_length(value: &str, _: ValidationPolicy) -> Option<ViolationKind> {
    (char_len(value) != PHONE_NUMBER_LENGTH).then_some(ViolationKind::WrongLength {
        expected: PHONE_NUMBER_LENGTH,
    })
}

fn phone_digits(value: &str, policy: ValidationPolicy) -> Option<ViolationKind> {
    (policy.is_strict() && !DIGITS_ONLY.is_match(value)).then_some(ViolationKind::InvalidFormat)
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Check whether a string has the shape of an email address.
pub fn is_valid_email(value: &str) -> bool {
    value.validate_email()
}

fn check_field(
    field: Field,
    value: &str,
    checks: &[Check],
    policy: ValidationPolicy,
    violations: &mut Vec<Violation>,
) {
    if value.trim().is_empty() {
        violations.push(Violation::new(field, ViolationKind::Required));
        return;
    }

    violations.extend(
        checks
            .iter()
            .filter_map(|check| check(value, policy))
            .map(|kind| Violation::new(field, kind)),
    );
}

/// Run every shape rule over a candidate user.
///
/// Returns an empty list when all fields are well formed.
pub fn check_fields(draft: &UserDraft, policy: ValidationPolicy) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_field(Field::FirstName, &draft.first_name, NAME_CHECKS, policy, &mut violations);
    check_field(Field::LastName, &draft.last_name, NAME_CHECKS, policy, &mut violations);
    check_field(Field::Email, &draft.email, EMAIL_CHECKS, policy, &mut violations);
    check_field(Field::PhoneNumber, &draft.phone_number, PHONE_CHECKS, policy, &mut violations);
    violations
}

/// Whether any violation in the list concerns `field`.
pub fn has_violation(violations: &[Violation], field: Field) -> bool {
    violations.iter().any(|v| v.field == field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(first: &str, last: &str, email: &str, phone: &str) -> UserDraft {
        UserDraft {
            id: None,
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
            phone_number: phone.into(),
        }
    }

    #[test]
    fn valid_user_has_no_violations() {
        let violations = check_fields(
            &draft("Ann", "Lee", "ann@x.com", "123456789"),
            ValidationPolicy::Strict,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn collects_failures_across_fields() {
        let violations = check_fields(&draft("", "Lee", "bad", "12"), ValidationPolicy::Strict);

        let messages: Vec<String> = violations.iter().map(Violation::message).collect();
        assert_eq!(
            messages,
            vec![
                "First name is required",
                "Email is not a valid email address",
                "Phone number must be exactly 9 characters",
            ]
        );
    }

    #[test]
    fn empty_field_only_reports_required() {
        let violations = check_fields(&draft("Ann", "   ", "ann@x.com", "123456789"), ValidationPolicy::Strict);
        assert_eq!(
            violations,
            vec![Violation::new(Field::LastName, ViolationKind::Required)]
        );
    }

    #[test]
    fn name_minimum_applies_only_when_strict() {
        let candidate = draft("Al", "Lee", "al@x.com", "123456789");

        let strict = check_fields(&candidate, ValidationPolicy::Strict);
        assert_eq!(
            strict,
            vec![Violation::new(Field::FirstName, ViolationKind::TooShort { min: 3 })]
        );

        assert!(check_fields(&candidate, ValidationPolicy::Lenient).is_empty());
    }

    #[test]
    fn name_over_limit_is_too_long() {
        let long = "a".repeat(NAME_MAX_LENGTH + 1);
        let violations = check_fields(&draft(&long, "Lee", "ann@x.com", "123456789"), ValidationPolicy::Lenient);
        assert_eq!(
            violations,
            vec![Violation::new(Field::FirstName, ViolationKind::TooLong { max: 100 })]
        );
    }

    #[test]
    fn long_malformed_email_reports_both_rules() {
        let email = "x".repeat(EMAIL_MAX_LENGTH + 1);
        let violations = check_fields(&draft("Ann", "Lee", &email, "123456789"), ValidationPolicy::Strict);
        assert_eq!(
            violations,
            vec![
                Violation::new(Field::Email, ViolationKind::InvalidFormat),
                Violation::new(Field::Email, ViolationKind::TooLong { max: 255 }),
            ]
        );
    }

    #[test]
    fn phone_digits_rule_follows_policy() {
        let candidate = draft("Ann", "Lee", "ann@x.com", "12345678a");

        let strict = check_fields(&candidate, ValidationPolicy::Strict);
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].message(), "Phone number must contain only digits");

        assert!(check_fields(&candidate, ValidationPolicy::Lenient).is_empty());
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("STRICT".parse::<ValidationPolicy>().unwrap(), ValidationPolicy::Strict);
        assert_eq!("lenient".parse::<ValidationPolicy>().unwrap(), ValidationPolicy::Lenient);
        assert!("loose".parse::<ValidationPolicy>().is_err());
    }

    #[test]
    fn duplicate_messages_name_the_field() {
        assert_eq!(
            Violation::new(Field::Email, ViolationKind::DuplicateEmail).message(),
            "Email is already in use"
        );
        assert_eq!(
            Violation::new(Field::PhoneNumber, ViolationKind::DuplicatePhone).message(),
            "Phone number is already in use"
        );
    }
}
