//! Fixtures shared by the unit tests.

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{json, Value};

use crate::pacing::Pacer;
use crate::transport::{PageTransport, TransportError};

/// A raw event record shaped like the `showmore` endpoint returns it, including
/// fields that projection drops.
pub fn raw_event(id: &str) -> Value {
    json!({
        "id": id,
        "url": format!("https://www.eventbrite.com/e/event-{id}"),
        "is_free": false,
        "online_event": false,
        "status": "live",
        "summary": "Arcade tournament",
        "organizer": {
            "id": "32824819501",
            "name": "Leaderboard Games",
            "url": "https://www.eventbrite.com/o/leaderboard-games-32824819501",
            "website": null,
            "num_past_events": 120
        },
        "start": {
            "utc": "2026-11-01T18:00:00Z",
            "timezone": "America/Chicago",
            "local": "2026-11-01T13:00:00"
        },
        "end": {
            "utc": "2026-11-01T21:00:00Z",
            "timezone": "America/Chicago",
            "local": "2026-11-01T16:00:00"
        },
        "venue": {
            "name": "Leaderboard Arcade",
            "id": "555",
            "address": {
                "address_1": "100 Main St",
                "address_2": null,
                "city": "Minneapolis",
                "region": "MN",
                "country": "US",
                "postal_code": "55401",
                "latitude": "44.9778",
                "longitude": "-93.2650",
                "localized_address_display": "100 Main St, Minneapolis, MN 55401"
            }
        },
        "name": {
            "text": format!("Game Night #{id}"),
            "html": format!("<b>Game Night #{id}</b>")
        }
    })
}

/// `data` object of one page holding events with the given ids.
pub fn page_data(ids: &[&str], has_next_page: bool) -> Value {
    json!({
        "events": ids.iter().map(|id| raw_event(id)).collect::<Vec<_>>(),
        "has_next_page": has_next_page,
        "page_count": 1
    })
}

/// Full response body of a successful page.
pub fn page_body(ids: &[&str], has_next_page: bool) -> String {
    json!({
        "success": true,
        "data": page_data(ids, has_next_page)
    })
    .to_string()
}

/// Response body the endpoint sends when it refuses a page.
pub fn failure_body() -> String {
    json!({ "success": false }).to_string()
}

/// Transport replaying canned responses in order and recording requested urls.
pub struct ScriptedTransport {
    responses: VecDeque<Result<String, TransportError>>,
    pub requests: Vec<String>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<String, TransportError>>) -> Self {
        Self {
            responses: responses.into(),
            requests: Vec::new(),
        }
    }

    pub fn connection_refused() -> TransportError {
        TransportError::Request {
            url: "http://events.test".to_string(),
            source: Box::new(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            )),
        }
    }
}

impl PageTransport for ScriptedTransport {
    fn get(&mut self, url: &str) -> Result<String, TransportError> {
        self.requests.push(url.to_string());
        self.responses
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request past end of script: {url}"))
    }
}

#[derive(Debug, Default)]
pub struct CountingPacer {
    pub pauses: usize,
}

impl Pacer for CountingPacer {
    fn pause(&mut self) {
        self.pauses += 1;
    }
}

/// Fresh empty directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let dir = std::env::temp_dir().join(format!(
        "upcoming-events-{}-{}-{}",
        name,
        std::process::id(),
        nanos
    ));
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}
