use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Outcome of a target's most recent execution attempt, as written to the
/// progress store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProgressStatus {
    Built,
    Errored,
    Canceled,
    Running,
    Skipped,
    Dispatched,
    Completed,
    Queued,
    /// A spelling this version does not know about. Kept verbatim.
    Unknown(String),
}

impl ProgressStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProgressStatus::Built => "built",
            ProgressStatus::Errored => "errored",
            ProgressStatus::Canceled => "canceled",
            ProgressStatus::Running => "running",
            ProgressStatus::Skipped => "skipped",
            ProgressStatus::Dispatched => "dispatched",
            ProgressStatus::Completed => "completed",
            ProgressStatus::Queued => "queued",
            ProgressStatus::Unknown(other) => other.as_str(),
        }
    }

    /// Decode a stored spelling. Never fails: unrecognized values become
    /// `Unknown`.
    pub fn from_store(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "built" => ProgressStatus::Built,
            "errored" => ProgressStatus::Errored,
            "canceled" | "cancelled" => ProgressStatus::Canceled,
            // older stores wrote "started" for targets still in flight
            "running" | "started" => ProgressStatus::Running,
            "skipped" => ProgressStatus::Skipped,
            "dispatched" => ProgressStatus::Dispatched,
            "completed" => ProgressStatus::Completed,
            "queued" => ProgressStatus::Queued,
            _ => ProgressStatus::Unknown(raw.trim().to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ProgressStatus::Unknown(_))
    }
}

impl FromStr for ProgressStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_store(s))
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProgressStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProgressStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_store(&raw))
    }
}

/// Condensed build record: when a target last completed successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRecord {
    pub name: String,
    pub time: Option<DateTime<Utc>>,
}

impl TargetRecord {
    pub fn new(name: impl Into<String>, time: Option<DateTime<Utc>>) -> Self {
        Self {
            name: name.into(),
            time,
        }
    }

    pub fn is_timestamped(&self) -> bool {
        self.time.is_some()
    }
}

/// Condensed progress record: the latest execution outcome of a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub name: String,
    pub status: ProgressStatus,
}

impl ProgressRecord {
    pub fn new(name: impl Into<String>, status: ProgressStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}
