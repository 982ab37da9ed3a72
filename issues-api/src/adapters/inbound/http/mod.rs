mod body;
mod responses;

pub use body::IssueBody;
pub use responses::*;
