mod issues;
mod projects;

pub use issues::IssueServiceImpl;
pub use projects::ProjectLookupImpl;
