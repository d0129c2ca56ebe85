pub use super::projects::Entity as Projects;
pub use super::tasks::Entity as Tasks;
pub use super::users::Entity as Users;
