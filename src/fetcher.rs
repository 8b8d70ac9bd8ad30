//! Pages through an organizer's listing and collects the projected events.

use indicatif::ProgressBar;
use log::{debug, error, info};
use thiserror::Error;

use crate::config::FetchConfig;
use crate::pacing::Pacer;
use crate::page::{process_page, PageError, PageResponse};
use crate::projection::ProjectedEvent;
use crate::transport::{PageTransport, TransportError};

/// Errors that abort a run without any result.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("page {page}: response is not a valid page envelope: {source}")]
    Decode {
        page: u32,
        #[source]
        source: serde_json::Error,
    },

    #[error("page {page}: response reported success but has no data")]
    MissingData { page: u32 },

    #[error("page {page}: {source}")]
    Page {
        page: u32,
        #[source]
        source: PageError,
    },
}

/// Result of a run that did not hit a fatal error.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The listing was exhausted, or the endpoint reported `success: false`.
    Complete(Vec<ProjectedEvent>),
    /// A network failure cut the run short.
    Partial {
        events: Vec<ProjectedEvent>,
        cause: TransportError,
    },
}

impl FetchOutcome {
    pub fn events(&self) -> &[ProjectedEvent] {
        match self {
            FetchOutcome::Complete(events) => events,
            FetchOutcome::Partial { events, .. } => events,
        }
    }
}

pub struct EventFetcher<'a, T, P> {
    config: &'a FetchConfig,
    transport: T,
    pacer: P,
    progress: ProgressBar,
}

impl<'a, T: PageTransport, P: Pacer> EventFetcher<'a, T, P> {
    pub fn new(config: &'a FetchConfig, transport: T, pacer: P) -> Self {
        Self {
            config,
            transport,
            pacer,
            progress: ProgressBar::hidden(),
        }
    }

    /// Reports the current page and running event count on `progress`.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Fetches every page, starting from page 1, until the listing runs out.
    pub fn fetch_all(&mut self) -> Result<FetchOutcome, FetchError> {
        let mut events = Vec::new();
        let mut page: u32 = 1;

        loop {
            let url = self.config.page_url(page);
            self.progress
                .set_message(format!("page {} ({} events so far)", page, events.len()));
            debug!("Requesting page {}: {}", page, url);

            let body = match self.transport.get(&url) {
                Ok(body) => body,
                Err(cause) => {
                    error!("Error occurred: {}", cause);
                    self.progress.abandon_with_message(format!(
                        "stopped at page {} with {} events",
                        page,
                        events.len()
                    ));
                    return Ok(FetchOutcome::Partial { events, cause });
                }
            };

            let response: PageResponse =
                serde_json::from_str(&body).map_err(|source| FetchError::Decode { page, source })?;

            if !response.success {
                info!("Page {} reported success=false, stopping.", page);
                break;
            }

            let data = response.data.ok_or(FetchError::MissingData { page })?;
            let (page_events, has_next_page) =
                process_page(&data).map_err(|source| FetchError::Page { page, source })?;

            debug!("Page {} yielded {} events", page, page_events.len());
            events.extend(page_events);
            self.progress.inc(1);

            if !has_next_page {
                break;
            }

            page += 1;
            self.pacer.pause();
        }

        self.progress
            .finish_with_message(format!("{} events", events.len()));
        Ok(FetchOutcome::Complete(events))
    }
}
