//! SeaORM entity modules for the exercise tracker.
//! Users own exercises; exercises reference their owner by `user_id`.

pub mod exercise;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::exercise::Entity as Exercise;
    pub use super::user::Entity as User;
}
