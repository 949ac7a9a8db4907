//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Async results arrive through an "inbox" channel:
//! - Spawned tasks send `UiEvent`s to `inbox_tx`
//! - The runtime drains `inbox_rx` each frame to collect results
//!
//! Cancellation uses the token carried by the spawning effect: once the
//! reducer cancels it, the task's result event is never delivered.

use std::future::Future;
use std::io::Stdout;

use anyhow::{Context, Result};
use crossterm::event;
use deskmon_core::api::ApiClient;
use deskmon_core::config::Config;
use deskmon_core::session;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Target frame rate for animation updates (60fps = ~16ms per frame).
pub const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(16);

/// Poll duration when idle (no request in flight, no pending timers).
/// Longer timeout reduces CPU usage when nothing is happening.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(100);

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is guaranteed to be restored on drop or panic.
pub struct TuiRuntime {
    /// Terminal instance.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state.
    pub state: AppState,
    /// API client shared by all spawned requests.
    client: ApiClient,
    /// Inbox sender - spawned tasks send events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - runtime drains this each frame.
    inbox_rx: UiEventReceiver,
    /// Last time a Tick event was emitted.
    last_tick: std::time::Instant,
    /// Last time a terminal event was received (for fast tick during interaction).
    last_terminal_event: std::time::Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime.
    pub fn new(config: &Config) -> Result<Self> {
        // Build the client before touching the terminal so a bad URL
        // reports cleanly instead of garbling the alternate screen
        let client = ApiClient::from_config(config)?;
        let state = AppState::new(config);

        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        // Create inbox channel for async event collection
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = std::time::Instant::now();
        Ok(Self {
            terminal,
            state,
            client,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop.
    pub fn run(&mut self) -> Result<()> {
        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                // Track terminal activity for fast tick mode
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = std::time::Instant::now();
                }

                // Only Tick triggers render - this caps frame rate at tick cadence.
                // Other events update state but batch renders to the next Tick.
                let marks_dirty = matches!(&event, UiEvent::Tick);

                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            // Only render if something changed
            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from the terminal and the inbox.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast polling while a request or timer is pending so their
        // results land promptly, or during recent typing so input echoes
        // at frame rate. Slow polling otherwise to save CPU.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.is_busy() || recent_terminal_activity;

        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Drain inbox - async results arrive here
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Calculate time until next tick for poll duration.
        // This ensures we wake up exactly when Tick is due.
        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());

        // Poll terminal events:
        // - If we already have events to process, do non-blocking poll
        // - Otherwise, block until next tick is due
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(std::time::Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        // Emit Tick after poll - we've now waited until the tick interval elapsed
        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = std::time::Instant::now();
        }

        Ok(events)
    }

    /// Executes effects returned by the reducer.
    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Executes a single effect.
    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::OpenBrowser { url } => {
                // DESKMON_NO_BROWSER keeps tests and remote shells from
                // spawning a real browser
                if std::env::var("DESKMON_NO_BROWSER").is_ok() {
                    tracing::info!(%url, "browser launch suppressed");
                } else {
                    let _ = open::that(&url);
                }
            }
            UiEffect::PersistSession { session } => {
                if let Err(err) = session::save(&session) {
                    tracing::warn!(error = %err, "failed to persist session");
                }
            }
            UiEffect::SubmitLogin { request, cancel } => {
                let client = self.client.clone();
                self.spawn_cancellable(cancel, async move {
                    let result = client.login(&request).await;
                    UiEvent::LoginOutcome { result }
                });
            }
            UiEffect::SubmitRegister { request, cancel } => {
                let client = self.client.clone();
                self.spawn_cancellable(cancel, async move {
                    let result = client.register(&request).await;
                    UiEvent::RegisterOutcome { result }
                });
            }
            UiEffect::ScheduleNavigate {
                delay,
                route,
                cancel,
            } => {
                self.spawn_cancellable(cancel, async move {
                    tokio::time::sleep(delay).await;
                    UiEvent::NavigateDue { route }
                });
            }
            UiEffect::ScheduleLaunch { delay, cancel } => {
                self.spawn_cancellable(cancel, async move {
                    tokio::time::sleep(delay).await;
                    UiEvent::LaunchDue
                });
            }
            UiEffect::CancelTask { token } => {
                token.cancel();
            }
        }
    }

    /// Spawns a future whose result event is dropped if the token fires first.
    fn spawn_cancellable<F>(&self, cancel: CancellationToken, f: F)
    where
        F: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {}
                event = f => {
                    let _ = tx.send(event);
                }
            }
        });
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
