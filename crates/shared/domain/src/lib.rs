//! Domain layer - Core business entities and rules.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the `User` entity, its field rules and the pagination arithmetic.

pub mod constants;
pub mod error;
pub mod page;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use page::{Page, PageRequest};
pub use user::{User, UserDraft};
pub use validation::{check_fields, has_violation, Field, ValidationPolicy, Violation, ViolationKind};
