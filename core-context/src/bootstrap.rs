//! Idempotent loading of the official player script.

use std::sync::Arc;

use futures::future::{FutureExt, Shared};
use parking_lot::Mutex;
use tracing::warn;

use bridge_traits::ApiBootstrap;
use core_protocol::PlayerError;

#[cfg(not(target_arch = "wasm32"))]
type LoadFuture = futures::future::BoxFuture<'static, Result<(), PlayerError>>;
#[cfg(target_arch = "wasm32")]
type LoadFuture = futures::future::LocalBoxFuture<'static, Result<(), PlayerError>>;

/// Shares one load of the official player script across the whole context.
///
/// The first caller runs the underlying loader; concurrent callers await the
/// same in-flight future; later callers get the cached outcome. A failed
/// load is cached too: there is no automatic retry, the embedding layer
/// decides whether to rebuild the context. Failures surface as error 1003.
pub struct SharedBootstrap {
    loader: Arc<dyn ApiBootstrap>,
    inflight: Mutex<Option<Shared<LoadFuture>>>,
}

impl SharedBootstrap {
    pub fn new(loader: Arc<dyn ApiBootstrap>) -> Self {
        Self {
            loader,
            inflight: Mutex::new(None),
        }
    }

    /// Ensures the player script is loaded, running the loader at most once.
    pub async fn ensure_loaded(&self) -> Result<(), PlayerError> {
        let shared = {
            let mut slot = self.inflight.lock();
            match &*slot {
                Some(shared) => shared.clone(),
                None => {
                    let loader = Arc::clone(&self.loader);
                    let future: LoadFuture = Box::pin(async move {
                        loader.load().await.map_err(|error| {
                            warn!(%error, "player script load failed");
                            PlayerError::api_load_failed()
                        })
                    });
                    let shared = future.shared();
                    *slot = Some(shared.clone());
                    shared
                }
            }
        };
        shared.await
    }
}
