//! spacex-tui - SpaceX launch statistics in the terminal
//!
//! This is the main entry point for the spacex-tui application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod services;
#[cfg(test)]
mod testing;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::model::View;
use crate::services::ApiClient;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    let config = Config::resolve();
    let log_guard = logging::init(&config)?;

    let result = run(&config);
    match &result {
        Ok(()) => tracing::info!("exited cleanly"),
        Err(err) => tracing::error!(error = ?err, "exiting with error"),
    }

    // Flush buffered log lines before the error is reported
    drop(log_guard);
    result
}

fn run(config: &Config) -> Result<()> {
    match Config::ensure_exists() {
        Ok(true) => tracing::info!("wrote default config"),
        Ok(false) => {}
        Err(e) => tracing::warn!(error = %e, "could not write default config"),
    }
    let api = ApiClient::new(&config.api_base_url, config.request_timeout())?;
    tracing::info!(
        api_base_url = api.base_url(),
        timeout_secs = ?config.request_timeout_secs,
        "starting"
    );

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    let mut app = App::new(Arc::new(api));
    let result = app
        .mount()
        .and_then(|_| open_start_view(&mut app, std::env::args().nth(1)))
        .and_then(|_| run_app(&mut tui, &mut app));
    app.unmount();

    // Cleanup terminal
    tui.exit()?;
    result
}

/// An optional first argument names the view to open instead of landing
fn open_start_view(app: &mut App, id: Option<String>) -> Result<()> {
    let Some(id) = id else {
        return Ok(());
    };
    match View::parse(&id) {
        Some(view) => {
            app.update(Action::Navigate(view))?;
        }
        None => tracing::warn!(id = %id, "unknown start view"),
    }
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!(error = %e, "draw failed");
            }
        })?;

        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // An action may produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            // No event - send a tick so pending fetches are polled
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;

    fn app_with(api: Arc<FakeApi>) -> App {
        let mut app = App::new(api);
        app.mount().unwrap();
        app
    }

    #[test]
    fn test_start_view_argument_opens_that_view() {
        let api = Arc::new(FakeApi::new());
        let mut app = app_with(api.clone());

        open_start_view(&mut app, Some("metrics".to_string())).unwrap();
        assert_eq!(app.navigator.current(), View::Metrics);
        assert_eq!(api.metrics_calls() + api.stats_calls(), 1);
    }

    #[test]
    fn test_unknown_start_view_stays_on_landing() {
        let api = Arc::new(FakeApi::new());
        let mut app = app_with(api.clone());

        open_start_view(&mut app, Some("launchpad".to_string())).unwrap();
        assert_eq!(app.navigator.current(), View::Landing);

        open_start_view(&mut app, None).unwrap();
        assert_eq!(app.navigator.current(), View::Landing);
        assert_eq!(api.metrics_calls() + api.stats_calls(), 0);
    }
}
