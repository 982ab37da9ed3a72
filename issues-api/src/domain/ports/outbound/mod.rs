mod issue_repository;
mod project_repository;

pub use issue_repository::*;
pub use project_repository::*;
