//! Model layer
//!
//! - `View` / `Navigator` - which screen is active
//! - `LoadState` - per-view fetch state
//! - `MetricsPayload` / `StatsPayload` - typed backend payloads
//! - `ModalStack` - overlay management

pub mod json;
pub mod load;
pub mod metrics;
pub mod modal;
pub mod stats;
pub mod view;

pub use json::{format_number, Entries};
pub use load::LoadState;
pub use metrics::MetricsPayload;
pub use modal::{Modal, ModalStack};
pub use stats::{RocketStat, StatsPayload, YearlyStat};
pub use view::{Navigator, View};
