//! User repository implementation.

use std::fmt;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Select,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{PageRequest, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups report a missing row as `None`; only store faults are errors.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every stored user
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Insert a new user and return the persisted row
    async fn create(&self, user: User) -> AppResult<User>;

    /// Replace every column of the row with the user's id.
    ///
    /// Returns `NotFound` if no such row exists.
    async fn update(&self, user: User) -> AppResult<()>;

    /// Delete user by ID (no-op when absent)
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Whether a user other than `excluding` has this email
    async fn exists_by_email(&self, email: &str, excluding: Option<Uuid>) -> AppResult<bool>;

    /// Whether a user other than `excluding` has this phone number
    async fn exists_by_phone(&self, phone_number: &str, excluding: Option<Uuid>)
        -> AppResult<bool>;

    /// One page of users ordered by id, plus the total row count
    async fn list_paginated(&self, page: PageRequest) -> AppResult<(Vec<User>, u64)>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn exists(&self, query: Select<UserEntity>, excluding: Option<Uuid>) -> Result<bool, DbErr> {
        let query = match excluding {
            Some(id) => query.filter(user::Column::Id.ne(id)),
            None => query,
        };
        Ok(query.count(&self.db).await? > 0)
    }
}

/// Log a store fault with its context and convert it for the caller.
fn store_fault(err: DbErr, context: fmt::Arguments<'_>) -> AppError {
    tracing::error!(error = %err, "{}", context);
    AppError::from(err)
}

#[async_trait]
impl UserRepository for UserStore {
    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| store_fault(e, format_args!("Failed to list users")))?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| store_fault(e, format_args!("Failed to load user {}", id)))?;

        Ok(result.map(User::from))
    }

    async fn create(&self, user: User) -> AppResult<User> {
        let id = user.id;
        let model = ActiveModel::from(user)
            .insert(&self.db)
            .await
            .map_err(|e| store_fault(e, format_args!("Failed to create user {}", id)))?;

        Ok(User::from(model))
    }

    async fn update(&self, user: User) -> AppResult<()> {
        let id = user.id;
        match ActiveModel::from(user).update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => {
                tracing::warn!(user_id = %id, "Update matched no row");
                Err(AppError::NotFound)
            }
            Err(e) => Err(store_fault(e, format_args!("Failed to update user {}", id))),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| store_fault(e, format_args!("Failed to delete user {}", id)))?;

        if result.rows_affected == 0 {
            tracing::debug!(user_id = %id, "Delete matched no row");
        }

        Ok(())
    }

    async fn exists_by_email(&self, email: &str, excluding: Option<Uuid>) -> AppResult<bool> {
        self.exists(UserEntity::find().filter(user::Column::Email.eq(email)), excluding)
            .await
            .map_err(|e| store_fault(e, format_args!("Failed to check email {}", email)))
    }

    async fn exists_by_phone(
        &self,
        phone_number: &str,
        excluding: Option<Uuid>,
    ) -> AppResult<bool> {
        self.exists(
            UserEntity::find().filter(user::Column::PhoneNumber.eq(phone_number)),
            excluding,
        )
        .await
        .map_err(|e| store_fault(e, format_args!("Failed to check phone number {}", phone_number)))
    }

    async fn list_paginated(&self, page: PageRequest) -> AppResult<(Vec<User>, u64)> {
        let paginator = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .paginate(&self.db, page.page_size());

        let total = paginator
            .num_items()
            .await
            .map_err(|e| store_fault(e, format_args!("Failed to count users")))?;
        let models = paginator
            .fetch_page(page.page_index() - 1)
            .await
            .map_err(|e| {
                store_fault(
                    e,
                    format_args!("Failed to fetch page {} of users", page.page_index()),
                )
            })?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }
}
