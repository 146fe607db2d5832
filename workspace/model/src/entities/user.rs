use sea_orm::entity::prelude::*;

use super::exercise;

/// A person whose exercises are tracked.
/// Usernames are not unique; two users may share one.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub username: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    // A user can log any number of exercises.
    #[sea_orm(has_many = "super::exercise::Entity")]
    Exercise,
}

impl Related<exercise::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exercise.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
