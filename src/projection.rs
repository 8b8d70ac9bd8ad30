//! Reduces a raw Eventbrite event record to the fields we keep.
//!
//! Leaf values are copied verbatim (strings, numbers, booleans or null). Only the
//! presence of each key is checked; a missing key aborts the projection.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("event record is missing field '{path}'")]
    MissingField { path: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organizer {
    pub id: Value,
    pub name: Value,
    pub url: Value,
    pub website: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTime {
    pub utc: Value,
    pub timezone: Value,
}

/// Venue with its address fields pulled up one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub name: Value,
    pub address_1: Value,
    pub address_2: Value,
    pub city: Value,
    pub region: Value,
    pub country: Value,
    pub postal_code: Value,
    pub latitude: Value,
    pub longitude: Value,
}

/// One event as written to the output file. Field order here is the key order
/// in the JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedEvent {
    pub id: Value,
    pub url: Value,
    pub is_free: Value,
    pub online_event: Value,
    pub organizer: Organizer,
    pub start: EventTime,
    pub end: EventTime,
    pub venue: Venue,
    /// The plain-text event title (`name.text` in the raw record).
    pub name: Value,
}

/// Walks `path` through nested objects, failing on the first absent key.
fn lookup<'a>(record: &'a Value, path: &[&str]) -> Result<&'a Value, ProjectionError> {
    path.iter()
        .try_fold(record, |current, key| current.get(key))
        .ok_or_else(|| ProjectionError::MissingField {
            path: path.join("."),
        })
}

fn copy(record: &Value, path: &[&str]) -> Result<Value, ProjectionError> {
    lookup(record, path).cloned()
}

fn project_time(record: &Value, key: &str) -> Result<EventTime, ProjectionError> {
    Ok(EventTime {
        utc: copy(record, &[key, "utc"])?,
        timezone: copy(record, &[key, "timezone"])?,
    })
}

fn project_venue(record: &Value) -> Result<Venue, ProjectionError> {
    let address = |field: &str| copy(record, &["venue", "address", field]);

    Ok(Venue {
        name: copy(record, &["venue", "name"])?,
        address_1: address("address_1")?,
        address_2: address("address_2")?,
        city: address("city")?,
        region: address("region")?,
        country: address("country")?,
        postal_code: address("postal_code")?,
        latitude: address("latitude")?,
        longitude: address("longitude")?,
    })
}

/// Projects one raw event record.
pub fn project_event(record: &Value) -> Result<ProjectedEvent, ProjectionError> {
    Ok(ProjectedEvent {
        id: copy(record, &["id"])?,
        url: copy(record, &["url"])?,
        is_free: copy(record, &["is_free"])?,
        online_event: copy(record, &["online_event"])?,
        organizer: Organizer {
            id: copy(record, &["organizer", "id"])?,
            name: copy(record, &["organizer", "name"])?,
            url: copy(record, &["organizer", "url"])?,
            website: copy(record, &["organizer", "website"])?,
        },
        start: project_time(record, "start")?,
        end: project_time(record, "end")?,
        venue: project_venue(record)?,
        name: copy(record, &["name", "text"])?,
    })
}
