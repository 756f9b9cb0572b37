//! User service layer - validation and persistence orchestration.

mod identity;
mod user_service;

pub use identity::{IdGenerator, RandomIdGenerator};
pub use user_service::{UserManager, UserService};
