/// Extracts the organization id from its page url.
///
/// Organizer pages look like `https://www.eventbrite.com/o/<slug>-<id>`; the id is
/// whatever follows the last hyphen. Input without a hyphen is returned unchanged.
pub fn organization_id(page_url: &str) -> &str {
    page_url.rsplit('-').next().unwrap_or(page_url)
}
