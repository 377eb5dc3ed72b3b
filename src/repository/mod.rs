//! Database repositories

pub mod account_repo;
pub mod employee_repo;
pub mod task_repo;

pub use account_repo::AccountRepository;
pub use employee_repo::EmployeeRepository;
pub use task_repo::TaskRepository;
