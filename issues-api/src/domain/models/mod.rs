mod ids;
mod issue;
mod project;

pub use ids::*;
pub use issue::*;
pub use project::*;
