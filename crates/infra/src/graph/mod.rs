//! Microsoft Graph adapters
//!
//! Implements the core presence ports on top of the Graph REST API:
//! - [`PaginatedFetcher`]: `@odata.nextLink` walker shared by the readers
//! - [`GraphDirectory`]: organization user listing
//! - [`GraphEventSource`]: filtered calendar event query per user
//! - [`GraphPresenceDispatcher`]: `setPresence` calls

pub mod directory;
pub mod events;
pub mod pagination;
pub mod presence;

pub use directory::GraphDirectory;
pub use events::GraphEventSource;
pub use pagination::{PaginatedFetcher, Throttle, TokioThrottle};
pub use presence::GraphPresenceDispatcher;

use presencesync_domain::{PresenceSyncError, Result};
use url::Url;

/// Append path segments to the Graph base URL, percent-encoding each one.
pub(crate) fn graph_url(base_url: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|err| PresenceSyncError::Config(format!("invalid Graph base URL: {err}")))?;
    url.path_segments_mut()
        .map_err(|()| PresenceSyncError::Config(format!("Graph base URL cannot be a base: {base_url}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_url_appends_encoded_segments() {
        let url = graph_url("https://graph.microsoft.com/v1.0/", &["users", "a b/c", "events"])
            .unwrap();
        assert_eq!(url.as_str(), "https://graph.microsoft.com/v1.0/users/a%20b%2Fc/events");
    }

    #[test]
    fn graph_url_rejects_garbage_base() {
        assert!(matches!(graph_url("not a url", &["users"]), Err(PresenceSyncError::Config(_))));
    }
}
