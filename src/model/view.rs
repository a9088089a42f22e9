//! View identifiers and the navigation state machine

use std::fmt;

/// One of the three full-screen views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Landing,
    Visualization,
    Metrics,
}

impl View {
    pub fn all() -> [View; 3] {
        [View::Landing, View::Visualization, View::Metrics]
    }

    /// Identifier used in logs and by `parse`
    pub fn id(&self) -> &'static str {
        match self {
            View::Landing => "landing",
            View::Visualization => "visualization",
            View::Metrics => "metrics",
        }
    }

    /// Map an identifier to a view. Unknown identifiers yield `None`.
    pub fn parse(id: &str) -> Option<View> {
        View::all().into_iter().find(|v| v.id() == id)
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Landing => "SpaceX Launch Analytics",
            View::Visualization => "Launch Visualizations",
            View::Metrics => "Launch Metrics",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Owns the single active view.
///
/// The only permitted transitions are Landing -> Visualization,
/// Landing -> Metrics, and back to Landing from either of those.
#[derive(Debug, Default)]
pub struct Navigator {
    current: View,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: View::Landing,
        }
    }

    pub fn current(&self) -> View {
        self.current
    }

    /// Switch from Landing to `view`. Returns whether the transition happened.
    pub fn navigate_to(&mut self, view: View) -> bool {
        match (self.current, view) {
            (View::Landing, View::Visualization | View::Metrics) => {
                tracing::info!(from = %self.current, to = %view, "navigate");
                self.current = view;
                true
            }
            (from, to) => {
                tracing::warn!(%from, %to, "rejected navigation");
                false
            }
        }
    }

    /// Return to Landing. Returns whether the transition happened.
    pub fn back(&mut self) -> bool {
        match self.current {
            View::Visualization | View::Metrics => {
                tracing::info!(from = %self.current, "back to landing");
                self.current = View::Landing;
                true
            }
            View::Landing => false,
        }
    }
}
