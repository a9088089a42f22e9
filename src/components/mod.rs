//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod card;
pub mod chart;
pub mod help_dialog;
pub mod landing;
pub mod layout;
pub mod metrics;
pub mod quit_dialog;
pub mod visualization;

pub use help_dialog::HelpDialog;
pub use landing::LandingView;
pub use metrics::MetricsView;
pub use quit_dialog::QuitDialog;
pub use visualization::VisualizationView;
