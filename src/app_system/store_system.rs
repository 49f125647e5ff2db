use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use super::config::StoreConfig;
use crate::actor_framework::ResourceActor;
use crate::clients::{CartClient, WeakCartClient};
use crate::domain::{Cart, Catalog, SessionId};
use crate::error::{StoreError, StoreResult};
use crate::session::StoreSession;

/// Bookkeeping for one spawned cart actor. The weak handle lets the actor
/// stop as soon as its session is dropped or closed.
struct CartEntry {
    cart: WeakCartClient,
    handle: JoinHandle<()>,
}

impl CartEntry {
    fn is_live(&self) -> bool {
        !self.handle.is_finished() && self.cart.upgrade().is_some()
    }
}

/// The storefront system: one shared catalog and one cart actor per session.
///
/// Responsible for starting cart actors, handing out sessions, and shutdown.
pub struct StoreSystem {
    catalog: Arc<Catalog>,
    config: StoreConfig,
    next_session: u64,
    carts: Vec<CartEntry>,
}

impl StoreSystem {
    /// A system serving the built-in plant catalog with default settings.
    pub fn new() -> Self {
        Self::with_catalog(Catalog::plants(), StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self::with_catalog(Catalog::plants(), config)
    }

    pub fn with_catalog(catalog: Catalog, config: StoreConfig) -> Self {
        info!(items = catalog.len(), "Starting store system");
        Self {
            catalog: Arc::new(catalog),
            config,
            next_session: 1,
            carts: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Starts a cart actor for a fresh browsing session.
    #[instrument(skip(self))]
    pub fn open_session(&mut self) -> StoreSession {
        self.prune();

        let session_id = SessionId::new(format!("session_{}", self.next_session));
        self.next_session += 1;

        let (cart_actor, cart_resource_client) =
            ResourceActor::new(self.config.cart_buffer_size, Cart::new(session_id.clone()));
        let cart_client = CartClient::new(cart_resource_client);
        let handle = tokio::spawn(cart_actor.run());
        self.carts.push(CartEntry {
            cart: cart_client.downgrade(),
            handle,
        });

        info!(%session_id, "Session opened");
        StoreSession::new(cart_client, Arc::clone(&self.catalog))
    }

    /// Sessions whose cart is still held by a shopper.
    pub fn session_count(&self) -> usize {
        self.carts.iter().filter(|entry| entry.is_live()).count()
    }

    /// Forgets cart actors that already stopped.
    fn prune(&mut self) {
        let before = self.carts.len();
        self.carts.retain(|entry| !entry.handle.is_finished());
        let pruned = before - self.carts.len();
        if pruned > 0 {
            debug!(pruned, "Dropped finished cart actors");
        }
    }

    /// Stops every cart actor still running and waits for them to finish.
    pub async fn shutdown(self) -> StoreResult<()> {
        info!(sessions = self.session_count(), "Shutting down system...");

        for entry in self.carts {
            // Sessions that were dropped or closed already stopped their actor.
            if let Some(client) = entry.cart.upgrade() {
                if let Err(e) = client.shutdown().await {
                    warn!(session_id = %entry.cart.session_id(), error = %e, "Cart actor already closed");
                }
            }
            if let Err(e) = entry.handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(StoreError::TaskFailed(format!("{e:?}")));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for StoreSystem {
    fn default() -> Self {
        Self::new()
    }
}
