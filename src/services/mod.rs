pub mod list;
pub mod resolver;

pub use list::{IssueListOutcome, IssueListService, IssueLister};
pub use resolver::{CurrentUserLookup, Resolution, resolve};
