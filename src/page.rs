//! One page of the `showmore` endpoint.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::projection::{project_event, ProjectedEvent, ProjectionError};

/// Top-level envelope of a page response. `data` is only read when `success` is true.
#[derive(Debug, Deserialize)]
pub struct PageResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("page data is missing '{field}'")]
    MissingField { field: &'static str },

    #[error("page data field '{field}' is not {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("event #{index} on page: {source}")]
    Event {
        index: usize,
        #[source]
        source: ProjectionError,
    },
}

/// Projects every event in a page's `data` object, keeping their order, and
/// returns them along with the `has_next_page` flag.
pub fn process_page(data: &Value) -> Result<(Vec<ProjectedEvent>, bool), PageError> {
    let raw_events = data
        .get("events")
        .ok_or(PageError::MissingField { field: "events" })?
        .as_array()
        .ok_or(PageError::WrongType {
            field: "events",
            expected: "an array",
        })?;

    let events = raw_events
        .iter()
        .enumerate()
        .map(|(index, raw)| project_event(raw).map_err(|source| PageError::Event { index, source }))
        .collect::<Result<Vec<_>, _>>()?;

    let has_next_page = data
        .get("has_next_page")
        .ok_or(PageError::MissingField {
            field: "has_next_page",
        })?
        .as_bool()
        .ok_or(PageError::WrongType {
            field: "has_next_page",
            expected: "a boolean",
        })?;

    Ok((events, has_next_page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{page_data, raw_event};
    use serde_json::json;

    #[test]
    fn keeps_event_order_and_flag() {
        let (events, has_next) = process_page(&page_data(&["a", "b", "c"], true)).unwrap();

        let ids: Vec<_> = events.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec![json!("a"), json!("b"), json!("c")]);
        assert!(has_next);
    }

    #[test]
    fn last_page_reports_no_more() {
        let (events, has_next) = process_page(&page_data(&["z"], false)).unwrap();
        assert_eq!(events.len(), 1);
        assert!(!has_next);
    }

    #[test]
    fn empty_page() {
        let (events, has_next) = process_page(&page_data(&[], false)).unwrap();
        assert!(events.is_empty());
        assert!(!has_next);
    }

    #[test]
    fn bad_event_fails_whole_page() {
        let mut broken = raw_event("2");
        broken["name"].as_object_mut().unwrap().remove("text");
        let data = json!({
            "events": [raw_event("1"), broken],
            "has_next_page": true
        });

        assert_eq!(
            process_page(&data),
            Err(PageError::Event {
                index: 1,
                source: ProjectionError::MissingField {
                    path: "name.text".to_string()
                }
            })
        );
    }

    #[test]
    fn missing_events_array() {
        let data = json!({ "has_next_page": false });
        assert_eq!(
            process_page(&data),
            Err(PageError::MissingField { field: "events" })
        );
    }

    #[test]
    fn missing_continuation_flag() {
        let data = json!({ "events": [] });
        assert_eq!(
            process_page(&data),
            Err(PageError::MissingField {
                field: "has_next_page"
            })
        );
    }

    #[test]
    fn non_boolean_continuation_flag() {
        let data = json!({ "events": [], "has_next_page": "yes" });
        assert!(matches!(
            process_page(&data),
            Err(PageError::WrongType {
                field: "has_next_page",
                ..
            })
        ));
    }

    #[test]
    fn envelope_without_data_parses() {
        let response: PageResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!response.success);
        assert!(response.data.is_none());
    }

    #[test]
    fn envelope_requires_success_flag() {
        assert!(serde_json::from_str::<PageResponse>(r#"{"data": {}}"#).is_err());
    }
}
