//! Loading/error/data state of a fetching view

use chrono::{DateTime, Local};

/// Static message shown when a fetch fails
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load data";

/// State of a single fetch, owned by the view that issued it
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Loading,
    Error(String),
    Ready(Loaded<T>),
}

/// Data that arrived successfully, stamped with its arrival time
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub data: T,
    pub fetched_at: DateTime<Local>,
}

impl<T> LoadState<T> {
    pub fn ready(data: T) -> Self {
        LoadState::Ready(Loaded {
            data,
            fetched_at: Local::now(),
        })
    }

    pub fn failed() -> Self {
        LoadState::Error(LOAD_FAILED_MESSAGE.to_string())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Ready(loaded) => Some(&loaded.data),
            _ => None,
        }
    }

    /// Arrival time formatted for the view header
    pub fn fetched_label(&self) -> Option<String> {
        match self {
            LoadState::Ready(loaded) => Some(loaded.fetched_at.format("%H:%M:%S").to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_loading() {
        let state: LoadState<u32> = LoadState::default();
        assert!(state.is_loading());
        assert!(state.data().is_none());
    }

    #[test]
    fn test_ready_exposes_data() {
        let state = LoadState::ready(7u32);
        assert_eq!(state.data(), Some(&7));
        assert!(state.fetched_label().is_some());
    }

    #[test]
    fn test_failed_uses_static_message() {
        let state: LoadState<u32> = LoadState::failed();
        assert_eq!(state, LoadState::Error("Failed to load data".to_string()));
    }
}
