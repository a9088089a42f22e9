//! External service interactions
//!
//! - HTTP access to the launch statistics backend
//! - Background fetch execution

pub mod api;
pub mod fetcher;

pub use api::{ApiClient, ApiError, LaunchApi, DEFAULT_BASE_URL, METRICS_PATH, STATS_PATH};
pub use fetcher::Fetcher;
