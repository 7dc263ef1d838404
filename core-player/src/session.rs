//! Wiring between a facade and a concrete transport.

use std::sync::Arc;

use tracing::warn;

use bridge_traits::{CommandTransport, PlayerController};

use crate::command_channel::CommandChannel;
use crate::controller::WebviewPlayerController;
use crate::event_channel::EventChannel;
use crate::events::{PlayerEvent, PlayerEventKind, Subscription};
use crate::facade::YoutubePlayer;
use crate::internal::ControllerBinding;
use core_protocol::PlayerError;

/// One live connection between a [`YoutubePlayer`] and a platform transport.
///
/// The embedding layer constructs a session when the player-hosting context
/// is available, feeds every inbound payload to
/// [`PlayerSession::handle_message`], and calls [`PlayerSession::close`] on
/// teardown.
pub struct PlayerSession {
    player: YoutubePlayer,
    events: EventChannel,
    _ready_subscription: Subscription,
}

impl PlayerSession {
    /// Binds the player to a transport.
    ///
    /// The hosting context may be torn down and recreated behind the same
    /// transport (a webview reload); each `ready` announcement re-pushes the
    /// configured progress cadence so the fresh context picks it up.
    pub fn connect(player: YoutubePlayer, transport: Arc<dyn CommandTransport>) -> Self {
        let channel = Arc::new(CommandChannel::new(transport));
        let controller: Arc<dyn PlayerController> =
            Arc::new(WebviewPlayerController::new(Arc::clone(&channel)));
        player.bind_controller(Arc::clone(&controller));

        let registry = player.event_registry();
        let events = EventChannel::new(channel, Arc::clone(&registry));

        let ready_player = player.clone();
        let ready_subscription = registry.subscribe(PlayerEventKind::Ready, move |_| {
            let interval_ms = ready_player.progress_interval_ms();
            if interval_ms == 0 {
                return;
            }
            let controller = Arc::clone(&controller);
            core_async::spawn(async move {
                if let Err(error) = controller.update_progress_interval(interval_ms).await {
                    warn!(%error, "failed to re-push progress interval");
                }
            });
        });

        Self {
            player,
            events,
            _ready_subscription: ready_subscription,
        }
    }

    /// Routes one raw payload from the hosting context.
    pub fn handle_message(&self, payload: &str) {
        self.events.handle_raw(payload);
    }

    /// Reports that the hosting context failed to load (error 1001).
    pub fn report_load_failure(&self) {
        self.player
            .event_registry()
            .emit(&PlayerEvent::Error(PlayerError::webview_loading()));
    }

    pub fn player(&self) -> &YoutubePlayer {
        &self.player
    }

    /// Destroys the bound player. Idempotent, like
    /// [`YoutubePlayer::destroy`].
    pub async fn close(&self) {
        self.player.destroy().await;
    }
}
