//! Domain constants
//!
//! Defaults shared by the configuration layer, the decision engine and the
//! Graph adapters.

// Microsoft identity platform / Graph endpoints
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";
pub const DEFAULT_AUTHORITY_URL: &str = "https://login.microsoftonline.com";
pub const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

// Pagination
pub const DEFAULT_PAGE_DELAY_SECS: u64 = 3;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Decision window
pub const DEFAULT_LOOKAHEAD_MINUTES: i64 = 60;
pub const DEFAULT_ACTION_THRESHOLD_MINUTES: i64 = 5;
pub const MAX_OVERRIDE_MINUTES: i64 = 240;
