//! User service - Handles user-related business logic.
//!
//! SOLID (SRP): Handles user-related use cases only.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use common::{AppError, AppResult, RequestContext};
use domain::{Page, PageRequest, User, UserDraft, ValidationPolicy, Violation};

use super::identity::{IdGenerator, RandomIdGenerator};
use crate::repository::UserRepository;
use crate::validator::UserValidator;

/// User service trait for dependency injection.
///
/// Every call takes the caller's [`RequestContext`]; its span wraps the
/// repository work so store logs carry the request id.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List every user
    async fn list_users(&self, ctx: &RequestContext) -> AppResult<Vec<User>>;

    /// List one page of users
    async fn list_users_paginated(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<Page<User>>;

    /// Get user by ID (`None` when absent)
    async fn get_user(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Option<User>>;

    /// Validate and persist a new user under a freshly generated id
    async fn create_user(&self, ctx: &RequestContext, draft: UserDraft) -> AppResult<User>;

    /// Validate and fully replace the user with `id`
    async fn update_user(&self, ctx: &RequestContext, id: Uuid, draft: UserDraft)
        -> AppResult<()>;

    /// Delete user (no error when absent)
    async fn delete_user(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    validator: UserValidator,
    ids: Arc<dyn IdGenerator>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>, policy: ValidationPolicy) -> Self {
        Self {
            validator: UserValidator::new(repo.clone(), policy),
            repo,
            ids: Arc::new(RandomIdGenerator),
        }
    }

    /// Replace the id assignment strategy
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    fn rejected(violations: Vec<Violation>) -> AppError {
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        tracing::warn!(?fields, count = violations.len(), "Validation failed");
        AppError::Invalid(violations)
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self, ctx: &RequestContext) -> AppResult<Vec<User>> {
        async {
            tracing::info!("Listing all users");
            self.repo.list().await
        }
        .instrument(ctx.span())
        .await
    }

    async fn list_users_paginated(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<Page<User>> {
        async {
            tracing::info!(
                page_index = page.page_index(),
                page_size = page.page_size(),
                "Listing users"
            );
            let (users, total) = self.repo.list_paginated(page).await?;
            Ok(Page::new(users, page, total))
        }
        .instrument(ctx.span())
        .await
    }

    async fn get_user(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Option<User>> {
        async {
            tracing::info!(user_id = %id, "Getting user");
            self.repo.find_by_id(id).await
        }
        .instrument(ctx.span())
        .await
    }

    async fn create_user(&self, ctx: &RequestContext, draft: UserDraft) -> AppResult<User> {
        async {
            let violations = self.validator.validate(&draft, None).await?;
            if !violations.is_empty() {
                return Err(Self::rejected(violations));
            }

            let user = User::from_draft(self.ids.generate(), draft);
            let created = self.repo.create(user).await?;
            tracing::info!(user_id = %created.id, "User created");
            Ok(created)
        }
        .instrument(ctx.span())
        .await
    }

    async fn update_user(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        draft: UserDraft,
    ) -> AppResult<()> {
        async {
            let violations = self.validator.validate(&draft, Some(id)).await?;
            if !violations.is_empty() {
                return Err(Self::rejected(violations));
            }

            self.repo.update(User::from_draft(id, draft)).await?;
            tracing::info!(user_id = %id, "User updated");
            Ok(())
        }
        .instrument(ctx.span())
        .await
    }

    async fn delete_user(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        async {
            self.repo.delete(id).await?;
            tracing::info!(user_id = %id, "User deleted");
            Ok(())
        }
        .instrument(ctx.span())
        .await
    }
}
