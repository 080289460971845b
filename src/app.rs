//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, the navigation session, fetches, and rendering.

use crate::api::{ApiClient, OddsApi};
use crate::config::Config;
use crate::error::Result;
use crate::events::{EventHandler, PollTimer};
use crate::loader;
use crate::market::OutcomeOrder;
use crate::state::{Action, Notification, RequestTag, Store};
use crate::ui::Ui;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action sender, cloned into fetch tasks and poll timers.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Backend client.
    api: Arc<dyn OddsApi>,
    /// Auto-refresh period; `None` disables polling.
    poll_interval: Option<Duration>,
    tick_rate: Duration,
    outcome_order: OutcomeOrder,
    mouse: bool,
}

impl App {
    /// Create a new application.
    pub async fn new(config: Config) -> Result<Self> {
        // Fail before touching the terminal
        let api: Arc<dyn OddsApi> = Arc::new(ApiClient::new(config.api.clone())?);
        let event_handler = EventHandler::new(&config.keybindings, config.ui.mouse_support)?;

        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        if config.ui.mouse_support {
            execute!(stdout, EnableMouseCapture)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let store = Store::new(action_tx.clone(), &config.feeds);

        Ok(Self {
            terminal,
            store,
            event_handler,
            action_tx,
            action_rx,
            api,
            poll_interval: config.ui.poll_interval(),
            tick_rate: config.ui.tick_rate(),
            outcome_order: config.ui.outcome_order,
            mouse: config.ui.mouse_support,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        // Initial connection test
        match self.api.health().await {
            Ok(()) => self.store.reduce(Action::SetConnected(true)),
            Err(e) => {
                tracing::warn!(error = %e, "backend health check failed");
                self.store.reduce(Action::SetConnected(false));
                self.store
                    .dispatch(Action::ShowNotification(Notification::error(e.notice())))?;
            }
        }

        // Load the first view
        self.sync_session();

        let mut tick = tokio::time::interval(self.tick_rate);

        // Main event loop
        loop {
            // Render UI
            self.terminal.draw(|frame| {
                Ui::render(frame, &self.store);
            })?;

            let view = self.store.app.current_view;
            tokio::select! {
                // Handle terminal events
                result = self.event_handler.next(view) => {
                    if let Some(action) = result? {
                        self.handle_action(action);
                    }
                }

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                _ = tick.tick() => {
                    self.handle_action(Action::Tick);
                }
            }

            // Check if we should quit
            if self.store.app.should_quit {
                break;
            }
        }

        self.store.session.cancel_timer();
        tracing::info!("shutting down");
        Ok(())
    }

    /// Handle an action.
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Refresh => match self.store.session.reissue() {
                Some(tag) => self.spawn_fetch(tag),
                None => self.sync_session(),
            },
            Action::Poll(tag) => {
                if self.store.session.is_current(&tag)
                    && let Some(tag) = self.store.session.reissue()
                {
                    self.spawn_fetch(tag);
                } else {
                    tracing::debug!(poll_target = ?tag.target, "ignoring poll for old navigation");
                }
            }
            action if action.is_navigation() => {
                self.store.reduce(action);
                self.sync_session();
            }
            action => self.store.reduce(action),
        }
    }

    /// Point the session at what the current view shows. A changed target
    /// starts a new navigation: the old timer stops, older responses become
    /// stale, and the new target is fetched right away.
    fn sync_session(&mut self) {
        let Some(target) = self.store.poll_target() else {
            self.store.session.cancel_timer();
            return;
        };
        if self.store.session.target() == Some(&target) {
            return;
        }

        tracing::debug!(poll_target = ?target, "navigating");
        let tag = self.store.session.begin(target);
        if let Some(period) = self.poll_interval {
            let timer = PollTimer::spawn(tag.clone(), period, self.action_tx.clone());
            self.store.session.arm(timer);
        }
        self.spawn_fetch(tag);
    }

    /// Fetch the tag's target in the background; the result comes back as
    /// `Action::Loaded`.
    fn spawn_fetch(&mut self, tag: RequestTag) {
        self.store.reduce(Action::SetLoading(true));

        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();
        let order = self.outcome_order;
        tokio::spawn(async move {
            let payload = loader::load(api.as_ref(), &tag.target, order).await;
            if tx.send(Action::Loaded(tag, payload)).is_err() {
                tracing::debug!("fetch finished after shutdown");
            }
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        if self.mouse {
            let _ = execute!(self.terminal.backend_mut(), DisableMouseCapture);
        }
        let _ = self.terminal.show_cursor();
    }
}
