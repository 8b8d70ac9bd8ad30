use std::ops::RangeInclusive;
use std::time::Duration;

use clap::ValueEnum;

pub const DEFAULT_BASE_URL: &str = "https://www.eventbrite.com";

/// Page size the organizer page itself uses.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

pub const DEFAULT_MIN_DELAY: Duration = Duration::from_millis(3800);
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(6300);

/// Which listing of the organizer to page through (`type=` query parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EventType {
    #[default]
    Future,
    Past,
}

impl EventType {
    pub fn as_query_value(self) -> &'static str {
        match self {
            EventType::Future => "future",
            EventType::Past => "past",
        }
    }

    /// Adjective used in log lines.
    pub fn describe(self) -> &'static str {
        match self {
            EventType::Future => "upcoming",
            EventType::Past => "past",
        }
    }
}

/// Everything the fetcher needs to page through one organizer's listing.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    pub organization_id: String,
    pub page_size: u32,
    /// Bounds of the pause taken between two page requests.
    pub delay_range: RangeInclusive<Duration>,
    pub event_type: EventType,
    pub base_url: String,
}

impl FetchConfig {
    pub fn new(organization_id: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            page_size: DEFAULT_PAGE_SIZE,
            delay_range: DEFAULT_MIN_DELAY..=DEFAULT_MAX_DELAY,
            event_type: EventType::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_delay_range(mut self, delay_range: RangeInclusive<Duration>) -> Self {
        self.delay_range = delay_range;
        self
    }

    pub fn with_event_type(mut self, event_type: EventType) -> Self {
        self.event_type = event_type;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// URL of the `showmore` endpoint for a 1-based page number.
    pub fn page_url(&self, page: u32) -> String {
        format!(
            "{}/org/{}/showmore/?page_size={}&type={}&page={}",
            self.base_url.trim_end_matches('/'),
            self.organization_id,
            self.page_size,
            self.event_type.as_query_value(),
            page
        )
    }
}
