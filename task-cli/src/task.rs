use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// A task that has been persisted and owns a stable id.
#[derive(Debug, Eq, PartialEq, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u32,
    pub description: String,
    pub status: Status,
    #[serde(with = "epoch_seconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "epoch_seconds")]
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Stamps `updated_at`, never letting it fall behind `created_at`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }
}

/// A task that has not been given an id by a store yet.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct NewTask {
    pub description: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewTask {
    pub fn planned(description: String, now: DateTime<Utc>) -> Self {
        Self {
            description,
            status: Status::Planned,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(self, id: u32) -> Task {
        Task {
            id,
            description: self.description,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Default, Eq, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum Status {
    #[default]
    #[serde(rename = "todo")]
    Planned,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Task status index '{0}' not found.")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "todo" => Ok(Status::Planned),
            "in-progress" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            _ => Err(ParseStatusError(key.to_string())),
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Status::Planned => "Planned",
            Status::InProgress => "In progress",
            Status::Done => "Done",
        };
        write!(f, "{}", label)
    }
}

/// Current time at the precision the store file can represent.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Serializes timestamps as fractional seconds since the Unix epoch.
pub mod epoch_seconds {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    const MICROS_PER_SECOND: f64 = 1_000_000.0;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.timestamp_micros() as f64 / MICROS_PER_SECOND)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let seconds = f64::deserialize(deserializer)?;
        if !seconds.is_finite() {
            return Err(de::Error::custom("timestamp is not a finite number"));
        }
        let micros = (seconds * MICROS_PER_SECOND).round() as i64;
        DateTime::from_timestamp_micros(micros)
            .ok_or_else(|| de::Error::custom(format!("timestamp {} is out of range", seconds)))
    }
}
