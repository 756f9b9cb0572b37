//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "Users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "Id")]
    pub id: Uuid,
    #[sea_orm(column_name = "FirstName", column_type = "Text")]
    pub first_name: String,
    #[sea_orm(column_name = "LastName", column_type = "Text")]
    pub last_name: String,
    #[sea_orm(column_name = "Email", column_type = "Text", unique)]
    pub email: String,
    #[sea_orm(column_name = "PhoneNumber", column_type = "Text", unique)]
    pub phone_number: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone_number: model.phone_number,
        }
    }
}

/// Full row image of a domain entity (every column set)
impl From<User> for ActiveModel {
    fn from(user: User) -> Self {
        ActiveModel {
            id: Set(user.id),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            email: Set(user.email),
            phone_number: Set(user.phone_number),
        }
    }
}
