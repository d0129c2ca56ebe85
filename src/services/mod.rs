pub mod project_service;
pub mod project_service_impl;
pub use project_service::{ProjectError, ProjectService};
pub use project_service_impl::SeaOrmProjectService;

pub mod task_service;
pub mod task_service_impl;
pub use task_service::{TaskError, TaskService};
pub use task_service_impl::SeaOrmTaskService;

pub mod user_service;
pub mod user_service_impl;
pub use user_service::{UserError, UserService};
pub use user_service_impl::SeaOrmUserService;
