mod issues;
mod projects;

pub use issues::*;
pub use projects::*;
