//! Outbound command channel with correlation ids.
//!
//! Result-bearing commands get a monotonically increasing string id and a
//! pending resolver; everything else is posted and forgotten. A command whose
//! result never arrives resolves to `None` after [`COMMAND_TIMEOUT`], so the
//! caller is never left hanging and never sees an error.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::warn;

use bridge_traits::CommandTransport;
use core_async::sync::oneshot;
use core_async::time::{timeout, Duration};
use core_protocol::{Command, CommandArg, CommandEnvelope};

/// How long a result-bearing command may stay unanswered.
pub const COMMAND_TIMEOUT: Duration = Duration::from_millis(5000);

/// Serializes commands onto a [`CommandTransport`] and correlates results
/// back to their callers.
pub struct CommandChannel {
    transport: Arc<dyn CommandTransport>,
    pending: Mutex<HashMap<String, oneshot::Sender<Value>>>,
    next_id: AtomicU64,
}

impl CommandChannel {
    pub fn new(transport: Arc<dyn CommandTransport>) -> Self {
        Self {
            transport,
            pending: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Sends a command and, for result-bearing commands, awaits its result.
    ///
    /// Returns `None` when the command is fire-and-forget, the transport is
    /// not ready, the result was JSON `null`, or the timeout elapsed.
    pub async fn send(&self, command: Command, args: Vec<CommandArg>) -> Option<Value> {
        if !self.transport.is_ready() {
            warn!(
                command = command.wire_name(),
                "command dropped: transport not ready"
            );
            return None;
        }

        if !command.needs_result() {
            self.post(command, CommandEnvelope::new(command, args));
            return None;
        }

        let id = (self.next_id.fetch_add(1, Ordering::Relaxed) + 1).to_string();
        let (sender, receiver) = oneshot::channel();
        self.pending.lock().insert(id.clone(), sender);

        if !self.post(command, CommandEnvelope::new(command, args).with_id(id.clone())) {
            self.pending.lock().remove(&id);
            return None;
        }

        match timeout(COMMAND_TIMEOUT, receiver).await {
            Ok(Ok(value)) if !value.is_null() => Some(value),
            Ok(Ok(_)) => None,
            // resolver dropped without answering (channel cleared)
            Ok(Err(_)) => None,
            Err(_) => {
                self.pending.lock().remove(&id);
                warn!(
                    command = command.wire_name(),
                    id = %id,
                    timeout_ms = COMMAND_TIMEOUT.as_millis() as u64,
                    "command timed out; substituting default result"
                );
                None
            }
        }
    }

    /// Delivers a result to the pending command with this id.
    ///
    /// Returns `false` when the id is unknown or already resolved; each id
    /// resolves at most once.
    pub fn resolve(&self, id: &str, value: Value) -> bool {
        match self.pending.lock().remove(id) {
            Some(sender) => sender.send(value).is_ok(),
            None => false,
        }
    }

    /// Resolves every pending command to the null sentinel.
    ///
    /// Called on teardown so no waiter outlives the channel.
    pub fn fail_all_pending(&self) {
        let drained: Vec<_> = self.pending.lock().drain().collect();
        for (_, sender) in drained {
            let _ = sender.send(Value::Null);
        }
    }

    fn post(&self, command: Command, envelope: CommandEnvelope) -> bool {
        let payload = match serde_json::to_string(&envelope) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(command = command.wire_name(), %error, "failed to serialize command");
                return false;
            }
        };
        match self.transport.post(payload) {
            Ok(()) => true,
            Err(error) => {
                warn!(command = command.wire_name(), %error, "failed to post command");
                false
            }
        }
    }
}
