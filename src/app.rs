//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! It owns the navigator and makes sure exactly one view is mounted at a time.

use crate::action::Action;
use crate::component::Component;
use crate::components::{HelpDialog, LandingView, MetricsView, QuitDialog, VisualizationView};
use crate::model::{Modal, ModalStack, Navigator, View};
use crate::services::LaunchApi;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{layout::Rect, Frame};
use std::sync::Arc;

pub struct App {
    pub navigator: Navigator,
    pub modals: ModalStack,
    pub should_quit: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Views
    // ─────────────────────────────────────────────────────────────────────────
    pub landing: LandingView,
    pub visualization: VisualizationView,
    pub metrics: MetricsView,

    // ─────────────────────────────────────────────────────────────────────────
    // Dialogs
    // ─────────────────────────────────────────────────────────────────────────
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

impl App {
    pub fn new(api: Arc<dyn LaunchApi>) -> Self {
        Self {
            navigator: Navigator::new(),
            modals: ModalStack::new(),
            should_quit: false,
            landing: LandingView::new(),
            visualization: VisualizationView::new(Arc::clone(&api)),
            metrics: MetricsView::new(api),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
        }
    }

    fn view_mut(&mut self, view: View) -> &mut dyn Component {
        match view {
            View::Landing => &mut self.landing,
            View::Visualization => &mut self.visualization,
            View::Metrics => &mut self.metrics,
        }
    }

    fn active_view(&mut self) -> &mut dyn Component {
        self.view_mut(self.navigator.current())
    }

    /// Unmount the view we left before mounting the one we entered
    fn transition(&mut self, from: View) -> Result<()> {
        self.view_mut(from).unmount();
        self.active_view().mount()
    }
}

impl Component for App {
    fn mount(&mut self) -> Result<()> {
        self.active_view().mount()
    }

    fn unmount(&mut self) {
        self.active_view().unmount();
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        match self.modals.top().cloned() {
            Some(Modal::QuitConfirm) => return self.quit_dialog.handle_key_event(key),
            Some(Modal::Help) => return self.help_dialog.handle_key_event(key),
            None => {}
        }

        match key.code {
            KeyCode::Char('q') => Ok(Some(Action::OpenQuitDialog)),
            KeyCode::Char('?') => Ok(Some(Action::OpenHelp)),
            _ => self.active_view().handle_key_event(key),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if !self.modals.is_empty() {
            return Ok(None);
        }
        self.active_view().handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            tracing::debug!(%action, view = %self.navigator.current(), "update");
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => return self.active_view().update(action),
            Action::ForceQuit => {
                tracing::info!("quit");
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::Navigate(view) => {
                let from = self.navigator.current();
                if self.navigator.navigate_to(view) {
                    self.transition(from)?;
                }
            }
            Action::Back => {
                let from = self.navigator.current();
                if self.navigator.back() {
                    self.transition(from)?;
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => {
                if self.modals.pop() == Some(Modal::QuitConfirm) {
                    return Ok(Some(Action::ForceQuit));
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Everything else belongs to whatever has focus
            // ─────────────────────────────────────────────────────────────────
            _ => {
                return match self.modals.top().cloned() {
                    Some(Modal::Help) => self.help_dialog.update(action),
                    Some(Modal::QuitConfirm) => Ok(None),
                    None => self.active_view().update(action),
                };
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.active_view().draw(frame, area)?;

        for modal in self.modals.iter() {
            match modal {
                Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
                Modal::Help => self.help_dialog.draw(frame, area)?,
            }
        }
        Ok(())
    }
}
