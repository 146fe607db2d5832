use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveModelBehavior;

use super::user;

/// A single logged exercise session.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "exercises")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The user who performed the exercise.
    pub user_id: i32,
    pub description: String,
    /// Length of the session in minutes. Always positive.
    pub duration: i32,
    /// Calendar day the exercise took place on.
    pub date: NaiveDate,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::UserId",
        to = "user::Column::Id"
    )]
    User,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
