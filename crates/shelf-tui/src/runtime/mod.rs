//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Spawned tasks send their `UiEvent` result to `inbox_tx`
//! - Runtime drains `inbox_rx` each frame to collect results
//!
//! Structure:
//! - `mod.rs`: Core runtime (TuiRuntime, event loop, effect dispatch)
//! - `inbox.rs`: Inbox channel types
//! - `handlers/`: Effect handler implementations (network calls, session file)

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use shelf_core::api::CatalogClient;
use shelf_core::session::SessionStore;
use tokio::sync::mpsc;

use crate::common::{TaskCompleted, TaskId, TaskKind};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick interval while requests are in flight (spinner animation).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Tick interval when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is guaranteed to be restored on drop or panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state (split: tui + overlay).
    pub state: AppState,
    client: CatalogClient,
    store: SessionStore,
    /// `config.toml` that receives `last_identifier`.
    config_path: PathBuf,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    /// Last time a Tick event was emitted.
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime and takes over the terminal.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(
        state: AppState,
        client: CatalogClient,
        store: SessionStore,
        config_path: PathBuf,
    ) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            client,
            store,
            config_path,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if reading terminal input or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        self.dispatch_event(UiEvent::Started);

        let mut dirty = true;
        while !self.state.tui.should_quit {
            let events = self.collect_events()?;
            if !events.is_empty() {
                dirty = true;
            }
            for event in events {
                self.dispatch_event(event);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from the inbox and the terminal, plus the tick.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.state.tui.tasks.is_any_running() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Block until the next tick unless there is already work to reduce.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async task and reports its result as `TaskCompleted`.
    fn spawn_task<Fut>(&self, kind: TaskKind, id: TaskId, fut: Fut)
    where
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let completed = TaskCompleted {
                id,
                result: Box::new(fut.await),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    /// Executes a single effect by dispatching to the appropriate handler.
    fn execute_effect(&mut self, effect: UiEffect) {
        let client = self.client.clone();
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }

            // Network effects (spawned)
            UiEffect::CheckSession { task, token } => {
                self.spawn_task(
                    TaskKind::SessionCheck,
                    task,
                    handlers::check_session(client, token),
                );
            }
            UiEffect::SignIn {
                task,
                identifier,
                secret,
            } => {
                self.spawn_task(
                    TaskKind::SignIn,
                    task,
                    handlers::sign_in(client, identifier, secret),
                );
            }
            UiEffect::FetchProducts { task, token } => {
                self.spawn_task(
                    TaskKind::ProductList,
                    task,
                    handlers::fetch_products(client, token),
                );
            }
            UiEffect::CreateProduct {
                task,
                token,
                payload,
            } => {
                self.spawn_task(
                    TaskKind::ProductSave,
                    task,
                    handlers::create_product(client, token, payload),
                );
            }
            UiEffect::UpdateProduct {
                task,
                token,
                id,
                payload,
            } => {
                self.spawn_task(
                    TaskKind::ProductSave,
                    task,
                    handlers::update_product(client, token, id, payload),
                );
            }
            UiEffect::DeleteProduct { task, token, id } => {
                self.spawn_task(
                    TaskKind::ProductDelete,
                    task,
                    handlers::delete_product(client, token, id),
                );
            }

            // Local file effects (inline)
            UiEffect::PersistSession { session } => {
                if let Some(event) = handlers::persist_session(&self.store, &session) {
                    self.dispatch_event(event);
                }
            }
            UiEffect::ClearSession => handlers::clear_session(&self.store),
            UiEffect::PersistIdentifier { identifier } => {
                handlers::persist_identifier(&self.config_path, &identifier);
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
