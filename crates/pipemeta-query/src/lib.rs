pub mod age;
pub mod status;
pub mod error;

// Re-exports
pub use age::{find_newer_than, find_older_than, AgeQuery};
pub use status::{find_built, find_canceled, find_errored, find_skipped, find_with_status};
pub use error::{Error, Result};
