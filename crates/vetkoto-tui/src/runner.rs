//! Main TUI runner - terminal lifecycle and event loop

use ratatui::layout::Rect;

use vetkoto_app::Engine;
use vetkoto_core::prelude::*;
use vetkoto_remote::RemoteStore;

use super::{event, render, terminal};

/// Run the dashboard until the user quits or a signal arrives.
pub async fn run<S>(mut engine: Engine<S>) -> Result<()>
where
    S: RemoteStore + Send + Sync + 'static,
{
    terminal::install_panic_hook();

    let mut term = ratatui::init();
    if let Err(e) = terminal::enable_mouse() {
        warn!("{}", e);
    }

    info!(
        "VetKoto starting on section '{}'",
        engine.state.active_section_id()
    );
    engine.start();

    let result = run_loop(&mut term, &mut engine);

    engine.shutdown();
    terminal::disable_mouse();
    ratatui::restore();

    result
}

fn run_loop<S>(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine<S>) -> Result<()>
where
    S: RemoteStore + Send + Sync + 'static,
{
    while !engine.should_quit() {
        // Results of background tasks and signals
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &engine.state))?;

        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        if let Some(message) = event::poll(&engine.state, area)? {
            engine.process_message(message);
        }
    }

    Ok(())
}
