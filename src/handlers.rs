pub mod exercises;
pub mod health;
pub mod home;
pub mod users;
