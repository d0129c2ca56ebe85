pub mod prelude;

pub mod projects;
pub mod sea_orm_active_enums;
pub mod tasks;
pub mod users;

pub use sea_orm_active_enums::{TaskStatus, UserRole};
