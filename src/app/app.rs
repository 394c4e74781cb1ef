use std::io;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};

use crossterm::event;
use ratatui::prelude::*;
use tracing::info;
use turbine_core::worker::spawn_request;
use turbine_core::{LifecycleEvent, RandomnessService};

use crate::app::actions::{Action, ActionResult, apply_action};
use crate::app::events::handle_event;
use crate::infra::constants::{EVENT_POLL_BUSY_MS, EVENT_POLL_IDLE_MS, RENDER_THROTTLE_MS, SPINNER_FRAME_MS};
use crate::infra::now_ms;
use crate::state::State;
use crate::ui;

pub struct App {
    pub state: State,
    service: Arc<dyn RandomnessService>,
    /// Last render time for throttling
    last_render_ms: u64,
    /// Last spinner animation update time
    last_spinner_ms: u64,
}

impl App {
    pub fn new(state: State, service: Arc<dyn RandomnessService>) -> Self {
        Self { state, service, last_render_ms: 0, last_spinner_ms: 0 }
    }

    pub fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tx: Sender<LifecycleEvent>,
        rx: Receiver<LifecycleEvent>,
    ) -> io::Result<()> {
        loop {
            let current_ms = now_ms();

            // === INPUT FIRST ===
            if event::poll(Duration::ZERO)? {
                let evt = event::read()?;

                let Some(action) = handle_event(&evt, &self.state) else {
                    info!("quit requested");
                    break;
                };
                self.handle_action(action, &tx);

                if self.state.dirty {
                    terminal.draw(|frame| ui::render(frame, &self.state))?;
                    self.state.dirty = false;
                    self.last_render_ms = current_ms;
                }
            }

            // === BACKGROUND PROCESSING ===
            self.process_lifecycle_events(&rx);
            self.check_readiness_timeout();
            self.update_spinner_animation();

            if self.state.dirty && current_ms.saturating_sub(self.last_render_ms) >= RENDER_THROTTLE_MS {
                terminal.draw(|frame| ui::render(frame, &self.state))?;
                self.state.dirty = false;
                self.last_render_ms = current_ms;
            }

            let poll_ms = if self.state.session.is_busy() { EVENT_POLL_BUSY_MS } else { EVENT_POLL_IDLE_MS };
            let _ = event::poll(Duration::from_millis(poll_ms))?;
        }

        Ok(())
    }

    fn handle_action(&mut self, action: Action, tx: &Sender<LifecycleEvent>) {
        match apply_action(&mut self.state, action) {
            ActionResult::Nothing => {}
            ActionResult::StartRequest(ticket) => {
                // Detached: there is no cancellation, the session drops late events
                let _ = spawn_request(self.service.clone(), ticket, tx.clone());
            }
        }
    }

    fn process_lifecycle_events(&mut self, rx: &Receiver<LifecycleEvent>) {
        while let Ok(evt) = rx.try_recv() {
            if self.state.session.apply(evt) {
                self.state.dirty = true;
            }
        }
    }

    fn check_readiness_timeout(&mut self) {
        let timeout = self.state.config.service.readiness_timeout();
        if self.state.session.check_readiness_timeout(Instant::now(), timeout) {
            self.state.dirty = true;
        }
    }

    fn update_spinner_animation(&mut self) {
        if !self.state.session.is_busy() {
            return;
        }
        let now = now_ms();
        if now.saturating_sub(self.last_spinner_ms) < SPINNER_FRAME_MS {
            return;
        }
        self.last_spinner_ms = now;
        self.state.spinner_frame = self.state.spinner_frame.wrapping_add(1);
        self.state.dirty = true;
    }
}
