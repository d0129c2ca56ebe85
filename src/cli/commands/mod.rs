mod check;
mod projects;
mod users;

pub use check::cmd_check;
pub use projects::cmd_list_projects;
pub use users::cmd_list_users;
