//! Shared test helpers: a scripted backend and buffer rendering

use crate::component::Component;
use crate::model::metrics::fixtures::METRICS_JSON;
use crate::model::stats::fixtures::STATS_JSON;
use crate::model::{MetricsPayload, StatsPayload};
use crate::services::{ApiError, LaunchApi};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

/// Backend double that counts calls and serves canned JSON
pub struct FakeApi {
    pub metrics_body: Mutex<Option<String>>,
    pub stats_body: Mutex<Option<String>>,
    pub metrics_calls: AtomicUsize,
    pub stats_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            metrics_body: Mutex::new(Some(METRICS_JSON.to_string())),
            stats_body: Mutex::new(Some(STATS_JSON.to_string())),
            metrics_calls: AtomicUsize::new(0),
            stats_calls: AtomicUsize::new(0),
        }
    }

    /// Every request fails as if the fetch worker died (`ApiError::Interrupted`)
    pub fn failing() -> Self {
        let api = Self::new();
        *api.metrics_body.lock().unwrap() = None;
        *api.stats_body.lock().unwrap() = None;
        api
    }

    pub fn set_stats(&self, body: &str) {
        *self.stats_body.lock().unwrap() = Some(body.to_string());
    }

    pub fn set_metrics(&self, body: &str) {
        *self.metrics_body.lock().unwrap() = Some(body.to_string());
    }

    pub fn metrics_calls(&self) -> usize {
        self.metrics_calls.load(Ordering::SeqCst)
    }

    pub fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }

    fn serve<T: serde::de::DeserializeOwned>(body: &Mutex<Option<String>>) -> Result<T, ApiError> {
        let body = body.lock().unwrap().clone();
        match body {
            Some(json) => serde_json::from_str(&json).map_err(|source| ApiError::Decode {
                url: "fake".to_string(),
                source,
            }),
            None => Err(ApiError::Interrupted),
        }
    }
}

impl LaunchApi for FakeApi {
    fn fetch_metrics(&self) -> Result<MetricsPayload, ApiError> {
        self.metrics_calls.fetch_add(1, Ordering::SeqCst);
        Self::serve(&self.metrics_body)
    }

    fn fetch_stats(&self) -> Result<StatsPayload, ApiError> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        Self::serve(&self.stats_body)
    }
}

/// Buffer contents, one line per row
pub fn buffer_text(buffer: &Buffer) -> String {
    let width = buffer.area.width.max(1) as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Draw a component onto a fresh test terminal and return the screen text
pub fn render<C: Component>(component: &mut C, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| {
            component.draw(frame, frame.area()).unwrap();
        })
        .unwrap();
    buffer_text(terminal.backend().buffer())
}

/// Send ticks until `done` holds or two seconds pass
pub fn tick_until<C: Component>(component: &mut C, done: impl Fn(&C) -> bool) {
    for _ in 0..200 {
        component.update(crate::action::Action::Tick).unwrap();
        if done(component) {
            return;
        }
        thread::sleep(Duration::from_millis(10));
    }
}
