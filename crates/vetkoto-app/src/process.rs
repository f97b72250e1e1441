//! Message processing
//!
//! Runs a message through the TEA update function, following any chained
//! messages and dispatching the actions they produce.

use tokio::sync::mpsc;

use vetkoto_remote::RemoteStore;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::services::Services;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<S>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    services: &Services<S>,
) where
    S: RemoteStore + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), services);
        }

        msg = result.message;
    }
}
