use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Entity with Snapshots and Actions)
// =============================================================================

/// Trait that any domain state must implement to be owned by a [`ResourceActor`].
///
/// The actor is the single owner of the entity. Every mutation goes through
/// [`Entity::handle_action`], and observers only ever see [`Entity::Snapshot`]
/// values published after an action succeeds.
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Id: Clone + Send + Sync + Display + Debug;
    type Snapshot: Clone + PartialEq + Send + Sync + Debug + 'static;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    type Error: std::error::Error + Clone + Send + Sync + 'static;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Build the immutable view handed to observers
    fn snapshot(&self) -> Self::Snapshot;

    /// Handle a domain-specific action. A rejected action must leave the
    /// entity unchanged.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Transport-level failures, wrapping the entity's own error type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError<E> {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped the response")]
    ActorDropped,
    #[error("{0}")]
    Entity(E),
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, E>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Snapshot {
        respond_to: Response<T::Snapshot, T::Error>,
    },
    Action {
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
    Shutdown,
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    entity: T,
    publisher: watch::Sender<T::Snapshot>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(buffer_size: usize, entity: T) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, snapshots) = watch::channel(entity.snapshot());
        let client = ResourceClient::new(entity.id().clone(), sender, snapshots);
        let actor = Self {
            receiver,
            entity,
            publisher,
        };
        (actor, client)
    }

    /// Processes requests one at a time until shut down or every client is gone.
    #[instrument(name = "resource_actor", skip(self), fields(id = %self.entity.id()))]
    pub async fn run(mut self) {
        info!("Actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.entity.snapshot()));
                }
                ResourceRequest::Action { action, respond_to } => {
                    self.handle_action(action, respond_to);
                }
                ResourceRequest::Shutdown => {
                    info!("Actor shutting down");
                    break;
                }
            }
        }
        info!("Actor stopped");
    }

    fn handle_action(&mut self, action: T::Action, respond_to: Response<T::ActionResult, T::Error>) {
        debug!(?action, "Processing action");
        let result = self.entity.handle_action(action);
        match &result {
            Ok(_) => self.publish(),
            Err(e) => warn!(error = %e, "Action rejected"),
        }
        let _ = respond_to.send(result);
    }

    /// Publishes a fresh snapshot if the entity actually changed.
    fn publish(&self) {
        let snapshot = self.entity.snapshot();
        let published = self.publisher.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
        if published {
            debug!("Snapshot published");
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    id: T::Id,
    sender: mpsc::Sender<ResourceRequest<T>>,
    snapshots: watch::Receiver<T::Snapshot>,
}

impl<T: Entity> ResourceClient<T> {
    pub(crate) fn new(
        id: T::Id,
        sender: mpsc::Sender<ResourceRequest<T>>,
        snapshots: watch::Receiver<T::Snapshot>,
    ) -> Self {
        Self {
            id,
            sender,
            snapshots,
        }
    }

    pub fn id(&self) -> &T::Id {
        &self.id
    }

    /// Asks the actor for its current state. Ordered after every request sent before it.
    pub async fn snapshot(&self) -> Result<T::Snapshot, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response
            .await
            .map_err(|_| FrameworkError::ActorDropped)?
            .map_err(FrameworkError::Entity)
    }

    pub async fn perform_action(
        &self,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Action { action, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response
            .await
            .map_err(|_| FrameworkError::ActorDropped)?
            .map_err(FrameworkError::Entity)
    }

    pub async fn shutdown(&self) -> Result<(), FrameworkError<T::Error>> {
        self.sender
            .send(ResourceRequest::Shutdown)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }

    /// A receiver that wakes on the next published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<T::Snapshot> {
        let mut receiver = self.snapshots.clone();
        receiver.borrow_and_update();
        receiver
    }

    /// A handle that does not keep the actor alive.
    pub fn downgrade(&self) -> WeakResourceClient<T> {
        WeakResourceClient {
            id: self.id.clone(),
            sender: self.sender.downgrade(),
            snapshots: self.snapshots.clone(),
        }
    }
}

/// Non-owning counterpart of [`ResourceClient`]. Once every strong client is
/// dropped the actor's mailbox closes and its run loop ends.
#[derive(Clone)]
pub struct WeakResourceClient<T: Entity> {
    id: T::Id,
    sender: mpsc::WeakSender<ResourceRequest<T>>,
    snapshots: watch::Receiver<T::Snapshot>,
}

impl<T: Entity> WeakResourceClient<T> {
    pub fn id(&self) -> &T::Id {
        &self.id
    }

    /// `None` once no strong client is left.
    pub fn upgrade(&self) -> Option<ResourceClient<T>> {
        let sender = self.sender.upgrade()?;
        Some(ResourceClient::new(self.id.clone(), sender, self.snapshots.clone()))
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
