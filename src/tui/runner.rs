//! Dashboard runner
//!
//! Redraws on every shared-state change and polls the keyboard between
//! changes. Submissions and exports go through the coordinator handle; the
//! loop itself never waits on the network.

use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::Event;
use tracing::{info, warn};

use crate::adapters::NOTHING_TO_EXPORT;
use crate::coordinator::CoordinatorHandle;
use crate::error::{AgriError, Result};
use crate::tui::app::DashboardApp;
use crate::tui::event::KeyAction;
use crate::tui::{init_terminal, restore_terminal, ui};

/// Keyboard poll period
const KEY_POLL: Duration = Duration::from_millis(50);

pub struct DashboardRunner {
    handle: CoordinatorHandle,
    app: DashboardApp,
    export_path: PathBuf,
}

impl DashboardRunner {
    pub fn new(handle: CoordinatorHandle, export_path: PathBuf) -> Self {
        let app = DashboardApp::new(handle.default_city());
        Self {
            handle,
            app,
            export_path,
        }
    }

    /// Preset the form (e.g. from command-line flags)
    pub fn with_inputs(mut self, farmer: Option<String>, city: Option<String>) -> Self {
        if let Some(farmer) = farmer {
            self.app.farmer_input = farmer;
        }
        if let Some(city) = city {
            self.app.city_input = city;
        }
        self
    }

    /// Run the dashboard until the user quits
    pub async fn run(mut self) -> Result<()> {
        info!("Starting dashboard...");

        let mut terminal = init_terminal()
            .map_err(|e| AgriError::Internal(format!("Failed to init terminal: {}", e)))?;

        let mut changes = self.handle.subscribe();
        self.app.apply_snapshot(&self.handle.snapshot());

        let result = loop {
            if let Err(e) = terminal.draw(|f| ui::render(f, &self.app)) {
                break Err(AgriError::Internal(format!("Failed to render: {}", e)));
            }

            tokio::select! {
                change = changes.next_change() => {
                    if change.is_none() {
                        warn!("shared state closed, leaving dashboard");
                        break Ok(());
                    }
                    self.app.apply_snapshot(&self.handle.snapshot());
                }
                _ = tokio::time::sleep(KEY_POLL) => {
                    while crossterm::event::poll(Duration::from_millis(0)).unwrap_or(false) {
                        match crossterm::event::read() {
                            Ok(Event::Key(key)) => self.handle_key(KeyAction::from(key)).await,
                            // resize is picked up by the draw at the top of the loop
                            Ok(_) => {}
                            Err(e) => warn!(error = %e, "failed to read terminal event"),
                        }
                    }
                }
            }

            if !self.app.is_running() {
                break Ok(());
            }
        };

        restore_terminal()
            .map_err(|e| AgriError::Internal(format!("Failed to restore terminal: {}", e)))?;

        info!("Dashboard stopped");
        result
    }

    async fn handle_key(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.app.quit(),
            KeyAction::NextField => self.app.next_field(),
            KeyAction::Help => self.app.toggle_help(),
            KeyAction::Input(c) => self.app.push_char(c),
            KeyAction::Backspace => self.app.pop_char(),
            KeyAction::Submit => self.submit(),
            KeyAction::Export => self.export().await,
            KeyAction::None => {}
        }
    }

    fn submit(&mut self) {
        self.app.notice = None;
        // The task reports through the status message; nothing to await here.
        if let Err(e) = self
            .handle
            .submit(&self.app.farmer_input, &self.app.city_input)
        {
            warn!(error = %e, "submission rejected");
        }
        if self.app.city_input.trim().is_empty() {
            self.app.city_input = self.handle.default_city().to_string();
        }
    }

    async fn export(&mut self) {
        match self.handle.export(&self.export_path).await {
            Ok(n) => {
                let notice = format!(
                    "Exported {} recommendations to {}",
                    n,
                    self.export_path.display()
                );
                info!("{}", notice);
                self.app.set_notice(notice);
            }
            Err(AgriError::Validation(msg)) if msg == NOTHING_TO_EXPORT => {
                self.app.set_notice(NOTHING_TO_EXPORT);
            }
            Err(e) => {
                warn!(category = e.category(), error = %e, "export failed");
                self.app.set_notice(format!("Export failed: {}", e));
            }
        }
    }
}
