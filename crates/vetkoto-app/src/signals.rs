//! SIGINT/SIGTERM handling
//!
//! The first signal asks for a clean quit, which still goes through the quit
//! confirmation when `confirm_quit` is on. A repeated signal quits outright.

use tokio::sync::mpsc;

use vetkoto_core::prelude::*;

use crate::message::Message;

/// Spawn the task that turns OS signals into quit messages.
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        let mut listener = match SignalListener::new() {
            Ok(listener) => listener,
            Err(e) => {
                error!("Signal handler error: {}", e);
                return;
            }
        };

        let mut received = 0;
        loop {
            if let Err(e) = listener.next().await {
                error!("Signal handler error: {}", e);
                return;
            }
            received += 1;
            info!("Shutdown signal received ({})", received);
            if tx.send(quit_message(received)).await.is_err() {
                return;
            }
        }
    });
}

fn quit_message(received: usize) -> Message {
    if received == 1 {
        Message::RequestQuit
    } else {
        Message::Quit
    }
}

#[cfg(unix)]
struct SignalListener {
    sigint: tokio::signal::unix::Signal,
    sigterm: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl SignalListener {
    fn new() -> Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        let sigint = signal(SignalKind::interrupt())
            .map_err(|e| Error::terminal(format!("Failed to create SIGINT handler: {}", e)))?;
        let sigterm = signal(SignalKind::terminate())
            .map_err(|e| Error::terminal(format!("Failed to create SIGTERM handler: {}", e)))?;
        Ok(Self { sigint, sigterm })
    }

    async fn next(&mut self) -> Result<()> {
        tokio::select! {
            _ = self.sigint.recv() => debug!("Received SIGINT"),
            _ = self.sigterm.recv() => debug!("Received SIGTERM"),
        }
        Ok(())
    }
}

#[cfg(windows)]
struct SignalListener;

#[cfg(windows)]
impl SignalListener {
    fn new() -> Result<Self> {
        Ok(Self)
    }

    async fn next(&mut self) -> Result<()> {
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| Error::terminal(format!("Failed to listen for Ctrl+C: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::handler::update;
    use crate::state::{AppState, UiMode};
    use vetkoto_core::SchemaRegistry;

    #[test]
    fn test_first_signal_requests_quit() {
        assert!(matches!(quit_message(1), Message::RequestQuit));
        assert!(matches!(quit_message(2), Message::Quit));
        assert!(matches!(quit_message(5), Message::Quit));
    }

    #[test]
    fn test_signal_quit_respects_confirmation() {
        let mut state = AppState::new(Settings::default(), SchemaRegistry::clinic());
        assert!(state.settings.behavior.confirm_quit);

        update(&mut state, quit_message(1));
        assert_eq!(state.ui_mode(), UiMode::ConfirmDialog);
        assert!(!state.should_quit());

        update(&mut state, quit_message(2));
        assert!(state.should_quit());
    }

    #[tokio::test]
    async fn test_signal_handler_stays_quiet_without_signal() {
        let (tx, mut rx) = mpsc::channel::<Message>(1);
        spawn_signal_handler(tx);

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
        assert!(rx.try_recv().is_err());
    }
}
