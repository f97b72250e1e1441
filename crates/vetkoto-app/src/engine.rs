//! Engine - orchestration shared by every frontend
//!
//! Owns the TEA state, the message channel, the shutdown signal and the
//! service handles actions run against. The TUI runner feeds it input and
//! renders `engine.state`; tests drive it directly.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use vetkoto_core::SchemaRegistry;
use vetkoto_remote::{CsvConverter, RemoteStore};

use crate::config::Settings;
use crate::message::Message;
use crate::process;
use crate::section::SectionLoader;
use crate::services::Services;
use crate::signals;
use crate::state::AppState;

/// Capacity of the message channel
const CHANNEL_CAPACITY: usize = 256;

/// Orchestration engine for VetKoto.
pub struct Engine<S> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the message channel. Clone it for input sources.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half; the frontend drains it between frames.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Send `true` to stop background loops such as the tick timer.
    pub shutdown_tx: watch::Sender<bool>,
    pub shutdown_rx: watch::Receiver<bool>,

    services: Services<S>,
}

impl<S> Engine<S>
where
    S: RemoteStore + Send + Sync + 'static,
{
    /// Create an engine over `store`.
    ///
    /// Must be called inside a tokio runtime: the signal handler is spawned here.
    pub fn new(
        settings: Settings,
        registry: SchemaRegistry,
        store: Arc<S>,
        converter: CsvConverter,
    ) -> Self {
        let sections = SectionLoader::new(settings.ui.sections_dir.clone());
        let export_dir = settings.export.directory();
        let services = Services::new(store, registry.clone(), converter, sections, export_dir);
        Self::with_services(settings, services)
    }

    pub fn with_services(settings: Settings, services: Services<S>) -> Self {
        let state = AppState::new(settings, services.registry.clone());
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        signals::spawn_signal_handler(msg_tx.clone());

        Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            services,
        }
    }

    /// Navigate to the configured start section.
    pub fn start(&mut self) {
        let index = self.state.active_section;
        info!("Starting on section '{}'", self.state.active_section_id());
        self.process_message(Message::GoToSection(index));
    }

    /// Process a single message through the TEA update cycle.
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(&mut self.state, msg, &self.msg_tx, &self.services);
    }

    /// Drain and process every pending message; returns how many ran.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message and process it.
    ///
    /// Returns false once every sender is gone.
    pub async fn process_next(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.process_message(msg);
                true
            }
            None => false,
        }
    }

    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    pub fn services(&self) -> &Services<S> {
        &self.services
    }

    pub fn store(&self) -> &S {
        self.services.store.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Signal background loops to stop.
    pub fn shutdown(&mut self) {
        debug!("Engine shutting down");
        let _ = self.shutdown_tx.send(true);
    }
}
