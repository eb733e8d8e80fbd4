pub mod record;
pub mod selection;
pub mod time;
pub mod error;

// Re-exports
pub use record::{ProgressRecord, ProgressStatus, TargetRecord};
pub use selection::{
    resolve, AnyOf, Contains, EndsWith, Everything, Literal, Matches, NameSelector, Restriction,
    Selection, StartsWith,
};
pub use time::{parse_inclusive, parse_instant, parse_stored_time, parse_threshold};
pub use error::{Error, Result};
