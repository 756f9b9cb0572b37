//! User validator - field rules plus store-backed uniqueness.

use std::sync::Arc;

use uuid::Uuid;

use common::AppResult;
use domain::{check_fields, has_violation, Field, UserDraft, ValidationPolicy, Violation, ViolationKind};

use crate::repository::UserRepository;

/// Validates candidate users against the field rules and the store.
pub struct UserValidator {
    repo: Arc<dyn UserRepository>,
    policy: ValidationPolicy,
}

impl UserValidator {
    pub fn new(repo: Arc<dyn UserRepository>, policy: ValidationPolicy) -> Self {
        Self { repo, policy }
    }

    /// Collect every violation for `draft`; an empty list means valid.
    ///
    /// `current_id` is the row being replaced on update. It is excluded from
    /// the uniqueness checks so a user may keep their own email and phone.
    /// Uniqueness is only checked for fields that are otherwise well formed.
    pub async fn validate(
        &self,
        draft: &UserDraft,
        current_id: Option<Uuid>,
    ) -> AppResult<Vec<Violation>> {
        let mut violations = check_fields(draft, self.policy);

        let email_ok = !has_violation(&violations, Field::Email);
        let phone_ok = !has_violation(&violations, Field::PhoneNumber);

        if email_ok && self.repo.exists_by_email(&draft.email, current_id).await? {
            violations.push(Violation::new(Field::Email, ViolationKind::DuplicateEmail));
        }

        if phone_ok && self.repo.exists_by_phone(&draft.phone_number, current_id).await? {
            violations.push(Violation::new(Field::PhoneNumber, ViolationKind::DuplicatePhone));
        }

        violations.sort_by_key(|v| v.field);
        Ok(violations)
    }
}
