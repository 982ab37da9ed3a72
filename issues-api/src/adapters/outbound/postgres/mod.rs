mod issues;
mod projects;

pub use issues::PostgresIssueRepository;
pub use projects::PostgresProjectRepository;
